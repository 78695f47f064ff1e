//! Error types for query-parameter signing.

/// Errors produced while constructing a [`Signer`](crate::Signer) or signing
/// a URI.
///
/// Verification never returns these: it is total over arbitrary input and
/// reports every anomaly as a plain `false`.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The algorithm name is not in the plain-digest capability table.
    #[error("the {0:?} hash algorithm is not supported")]
    UnsupportedAlgorithm(String),

    /// The algorithm name (after the `hmac-` prefix) is not in the keyed
    /// capability table.
    #[error("the {0:?} HMAC algorithm is not supported")]
    UnsupportedHmacAlgorithm(String),

    /// The query string parsed to an empty parameter mapping.
    #[error("there are no parameters to sign")]
    NoParameters,

    /// The query already carries the reserved sign parameter.
    #[error("the uri is signed already")]
    AlreadySigned,

    /// A non-array parameter name occurs more than once in the raw query,
    /// so the parsed mapping would not represent what the URI shows.
    #[error("the uri has doubled parameters and cannot be signed")]
    DoubledParameters,

    /// The URI type rejected the rewritten query string.
    #[error("invalid uri: {0}")]
    InvalidUri(String),
}

/// Convenience result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;
