//! Tamper-evident signing and verification of URI query parameters.
//!
//! Given a URI and a shared secret, this crate deterministically computes a
//! keyed digest over the canonicalized query string, appends it as a
//! reserved parameter, and can later verify that a signed URI's digest
//! matches one recomputed from its parameters. Typical uses are signed
//! download links and webhook callbacks, where the parameters must not be
//! tampered with but no separate signature channel exists.
//!
//! The signature protects the integrity and authenticity of the signed
//! parameters only: it provides no confidentiality, and neither the path,
//! the host, nor the sign parameter's own name are covered.
//!
//! # Usage
//!
//! ```rust
//! use urisign::Signer;
//!
//! let signer = Signer::with_algorithm("sig", "s0me$ecret!", "hmac-sha256").unwrap();
//!
//! let uri: http::Uri = "https://example.com/dl?file=report.pdf&user=42"
//!     .parse()
//!     .unwrap();
//! let signed = signer.sign(uri).unwrap();
//!
//! assert!(signer.verify(&signed));
//!
//! let tampered: http::Uri = signed.to_string().replace("42", "43").parse().unwrap();
//! assert!(!signer.verify(&tampered));
//! ```
//!
//! # Modules
//!
//! - [`signer`] - The [`Signer`]: construction, signing, verification
//! - [`query`] - Query parsing, ambiguity detection, canonical serialization
//! - [`algorithm`] - Digest capability table and digest/HMAC computation
//! - [`encoding`] - Url-safe unpadded base64 codec
//! - [`uri`] - The [`QueryUri`] abstraction and its `http::Uri` adapter
//! - [`error`] - Error taxonomy

pub mod algorithm;
pub mod encoding;
pub mod error;
pub mod query;
pub mod signer;
pub mod uri;

pub use algorithm::{AlgorithmSpec, DigestAlgorithm};
pub use error::{SignError, SignResult};
pub use signer::{DEFAULT_ALGORITHM, Signer};
pub use uri::QueryUri;
