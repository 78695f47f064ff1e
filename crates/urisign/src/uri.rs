//! Query-carrier abstraction over URI types.
//!
//! The signer only reads and rewrites query strings; the rest of the URI is
//! opaque pass-through. Any type that can expose its raw query and accept a
//! replacement can be signed. An implementation for [`http::Uri`] is
//! provided.

use crate::error::SignError;

/// A URI-like value whose query string can be read and replaced.
pub trait QueryUri: Sized {
    /// The raw query string, without the leading `?`; empty when absent.
    fn query_str(&self) -> &str;

    /// Return the same URI with its query string replaced verbatim.
    ///
    /// # Errors
    ///
    /// [`SignError::InvalidUri`] if the underlying type rejects the
    /// rewritten query.
    fn with_query_str(self, query: &str) -> Result<Self, SignError>;
}

impl QueryUri for http::Uri {
    fn query_str(&self) -> &str {
        self.query().unwrap_or("")
    }

    fn with_query_str(self, query: &str) -> Result<Self, SignError> {
        let mut parts = self.into_parts();

        let path = parts
            .path_and_query
            .as_ref()
            .map_or("", http::uri::PathAndQuery::path);
        let path_and_query = if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        };

        parts.path_and_query = Some(
            path_and_query
                .parse()
                .map_err(|e: http::uri::InvalidUri| SignError::InvalidUri(e.to_string()))?,
        );

        http::Uri::from_parts(parts).map_err(|e| SignError::InvalidUri(e.to_string()))
    }
}
