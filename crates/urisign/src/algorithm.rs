//! Digest algorithm registry and computation.
//!
//! Algorithm names are negotiated as case-insensitive strings: a bare name
//! (`sha1`, `md5`, ...) selects a plain digest, and an `hmac-` prefix
//! (`hmac-sha256`, ...) selects the keyed variant of the remainder. The
//! capability check is a static table lookup resolved once at `Signer`
//! construction, never at sign/verify time.

use digest::Digest;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::SignError;

/// The digest primitives available for both plain and keyed signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// MD5 (16-byte digest). Kept for compatibility with existing signed
    /// URLs; not a recommended default.
    Md5,
    /// SHA-1 (20-byte digest). The default algorithm.
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-384 (48-byte digest).
    Sha384,
    /// SHA-512 (64-byte digest).
    Sha512,
}

impl DigestAlgorithm {
    /// Look up a lowercase algorithm name in the capability table.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }
}

/// A resolved algorithm selection: which primitive, and whether it is used
/// as a plain digest or an HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    /// `true` when the digest is keyed (HMAC mode).
    pub keyed: bool,
    /// The underlying digest primitive.
    pub algorithm: DigestAlgorithm,
}

/// Resolve a caller-supplied algorithm name into an [`AlgorithmSpec`].
///
/// Names are case-folded; the `hmac-` prefix selects keyed mode and the
/// remainder is looked up in the same capability table as plain names.
///
/// # Errors
///
/// [`SignError::UnsupportedAlgorithm`] or
/// [`SignError::UnsupportedHmacAlgorithm`] naming the unknown algorithm,
/// depending on the mode it was requested for.
pub fn resolve(name: &str) -> Result<AlgorithmSpec, SignError> {
    let lowered = name.to_lowercase();

    if let Some(bare) = lowered.strip_prefix("hmac-") {
        let algorithm = DigestAlgorithm::from_name(bare)
            .ok_or_else(|| SignError::UnsupportedHmacAlgorithm(bare.to_owned()))?;
        return Ok(AlgorithmSpec {
            keyed: true,
            algorithm,
        });
    }

    let algorithm = DigestAlgorithm::from_name(&lowered)
        .ok_or_else(|| SignError::UnsupportedAlgorithm(lowered.clone()))?;
    Ok(AlgorithmSpec {
        keyed: false,
        algorithm,
    })
}

/// Capability probe: would [`resolve`] accept this name?
#[must_use]
pub fn is_supported(name: &str) -> bool {
    resolve(name).is_ok()
}

/// Compute the raw digest bytes for `data` under `spec`.
///
/// In keyed mode `secret` is the HMAC key; in plain mode it is ignored here
/// (the signer folds it into `data` as a stand-in parameter instead).
#[must_use]
pub fn compute(spec: AlgorithmSpec, secret: &[u8], data: &[u8]) -> Vec<u8> {
    if spec.keyed {
        match spec.algorithm {
            DigestAlgorithm::Md5 => keyed_digest::<Hmac<Md5>>(secret, data),
            DigestAlgorithm::Sha1 => keyed_digest::<Hmac<Sha1>>(secret, data),
            DigestAlgorithm::Sha256 => keyed_digest::<Hmac<Sha256>>(secret, data),
            DigestAlgorithm::Sha384 => keyed_digest::<Hmac<Sha384>>(secret, data),
            DigestAlgorithm::Sha512 => keyed_digest::<Hmac<Sha512>>(secret, data),
        }
    } else {
        match spec.algorithm {
            DigestAlgorithm::Md5 => plain_digest::<Md5>(data),
            DigestAlgorithm::Sha1 => plain_digest::<Sha1>(data),
            DigestAlgorithm::Sha256 => plain_digest::<Sha256>(data),
            DigestAlgorithm::Sha384 => plain_digest::<Sha384>(data),
            DigestAlgorithm::Sha512 => plain_digest::<Sha512>(data),
        }
    }
}

fn plain_digest<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

fn keyed_digest<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can accept any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
