//! Signing and verification of query parameters.
//!
//! A [`Signer`] owns the reserved sign-parameter name, the shared secret,
//! and the digest algorithm. Signing canonicalizes the query parameters,
//! digests them, and appends the url-safe-encoded result as
//! `sign_param=<signature>`; verification recomputes the digest from a
//! signed URI and compares.
//!
//! The two operations deliberately fail differently: signing raises a
//! categorized [`SignError`] so misuse is distinguishable from bad data,
//! while verification runs against untrusted input and reports every
//! anomaly as a plain `false`.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::algorithm::{self, AlgorithmSpec};
use crate::encoding;
use crate::error::SignError;
use crate::query::{ParamMap, ParamValue, canonical_query, has_doubled_params, parse_params};
use crate::uri::QueryUri;

/// The algorithm used when none is specified.
pub const DEFAULT_ALGORITHM: &str = "sha1";

/// Signs and verifies URI query parameters with a shared secret.
///
/// Configuration is immutable after construction; a single instance can be
/// shared across threads and reused for any number of sign/verify calls.
///
/// # Examples
///
/// ```
/// use urisign::Signer;
///
/// let signer = Signer::with_algorithm("sig", "s0me$ecret!", "hmac-sha256").unwrap();
///
/// let uri: http::Uri = "https://example.com/dl?file=report.pdf".parse().unwrap();
/// let signed = signer.sign(uri).unwrap();
/// assert!(signer.verify(&signed));
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    sign_param: String,
    secret_key: String,
    algorithm: AlgorithmSpec,
}

impl Signer {
    /// Create a signer using the default `sha1` algorithm.
    pub fn new(sign_param: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let spec = algorithm::resolve(DEFAULT_ALGORITHM).expect("default algorithm is registered");
        Self {
            sign_param: sign_param.into(),
            secret_key: secret_key.into(),
            algorithm: spec,
        }
    }

    /// Create a signer with an explicit algorithm name.
    ///
    /// The name is case-insensitive; an `hmac-` prefix selects keyed mode
    /// (`hmac-sha256`), a bare name selects a plain digest with the secret
    /// folded in as a stand-in parameter (`sha1`, `md5`, ...).
    ///
    /// # Errors
    ///
    /// [`SignError::UnsupportedAlgorithm`] or
    /// [`SignError::UnsupportedHmacAlgorithm`] when the name is not in the
    /// capability table. This is the only algorithm validation: sign and
    /// verify never fail on algorithm selection.
    pub fn with_algorithm(
        sign_param: impl Into<String>,
        secret_key: impl Into<String>,
        algorithm_name: &str,
    ) -> Result<Self, SignError> {
        Ok(Self {
            sign_param: sign_param.into(),
            secret_key: secret_key.into(),
            algorithm: algorithm::resolve(algorithm_name)?,
        })
    }

    /// Capability probe: is this algorithm name accepted by
    /// [`Signer::with_algorithm`]?
    #[must_use]
    pub fn is_algorithm_supported(algorithm_name: &str) -> bool {
        algorithm::is_supported(algorithm_name)
    }

    /// Sign the query parameters of a URI, returning the URI with the
    /// signature appended.
    ///
    /// The original query text is preserved verbatim; only
    /// `&{sign_param}={signature}` is appended.
    ///
    /// # Errors
    ///
    /// [`SignError::NoParameters`], [`SignError::AlreadySigned`], or
    /// [`SignError::DoubledParameters`] per the query contents, and
    /// [`SignError::InvalidUri`] if the URI type rejects the rewritten
    /// query.
    pub fn sign<U: QueryUri>(&self, uri: U) -> Result<U, SignError> {
        let signed_query = self.sign_query(uri.query_str())?;
        uri.with_query_str(&signed_query)
    }

    /// Verify the signature carried by a URI's query parameters.
    ///
    /// Never fails: missing, malformed, ambiguous, or mismatched input all
    /// verify as `false`.
    #[must_use]
    pub fn verify<U: QueryUri>(&self, uri: &U) -> bool {
        self.verify_query(uri.query_str())
    }

    /// Sign a raw query string, returning the query with the signature
    /// appended.
    ///
    /// # Errors
    ///
    /// [`SignError::NoParameters`], [`SignError::AlreadySigned`], or
    /// [`SignError::DoubledParameters`] per the query contents.
    pub fn sign_query(&self, query: &str) -> Result<String, SignError> {
        let params = parse_params(query);

        if params.is_empty() {
            return Err(SignError::NoParameters);
        }
        if params.iter().any(|(name, _)| *name == self.sign_param) {
            return Err(SignError::AlreadySigned);
        }
        if has_doubled_params(query) {
            return Err(SignError::DoubledParameters);
        }

        let signature = self.signature_for(params);
        debug!(sign_param = %self.sign_param, params = query.matches('&').count() + 1, "signed query parameters");

        Ok(format!("{query}&{}={signature}", self.sign_param))
    }

    /// Verify a raw query string, returning `false` on any anomaly.
    #[must_use]
    pub fn verify_query(&self, query: &str) -> bool {
        let params = parse_params(query);

        if params.is_empty() {
            debug!("verification failed: no parameters");
            return false;
        }
        let provided = match params.iter().find(|(name, _)| *name == self.sign_param) {
            Some((_, ParamValue::Single(value))) => value.clone(),
            Some((_, ParamValue::List(_))) | None => {
                debug!(sign_param = %self.sign_param, "verification failed: signature parameter missing");
                return false;
            }
        };
        if has_doubled_params(query) {
            debug!("verification failed: doubled parameters");
            return false;
        }

        let expected = self.signature_for(params);
        let matches: bool = expected.as_bytes().ct_eq(provided.as_bytes()).into();
        if !matches {
            debug!(sign_param = %self.sign_param, "verification failed: signature mismatch");
        }
        matches
    }

    /// Compute the url-safe-encoded signature for a parameter mapping.
    ///
    /// Keyed mode digests the canonical query without the sign parameter,
    /// using the secret as the HMAC key. Plain mode has no key input, so the
    /// secret is folded into the digested data as a stand-in value for the
    /// sign parameter itself.
    fn signature_for(&self, mut params: ParamMap) -> String {
        if self.algorithm.keyed {
            params.retain(|(name, _)| *name != self.sign_param);
        } else {
            let stand_in = ParamValue::Single(self.secret_key.clone());
            match params.iter().position(|(name, _)| *name == self.sign_param) {
                Some(i) => params[i].1 = stand_in,
                None => params.push((self.sign_param.clone(), stand_in)),
            }
        }

        let canonical = canonical_query(&params);
        let digest = algorithm::compute(
            self.algorithm,
            self.secret_key.as_bytes(),
            canonical.as_bytes(),
        );

        encoding::encode(&digest)
    }
}
