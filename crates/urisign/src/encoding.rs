//! Url-safe, unpadded base64 codec for digest bytes.
//!
//! Signatures travel inside query strings, so the standard base64 alphabet
//! is unusable: `+`, `/`, and `=` all require further escaping. This module
//! encodes with the url-safe alphabet (`-` and `_`) and strips padding, and
//! decodes leniently enough to accept both alphabets with or without
//! trailing padding.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Decoding engine: url-safe alphabet, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as url-safe, unpadded base64.
///
/// The output alphabet is `A-Z a-z 0-9 - _`; the result never contains `+`,
/// `/`, or `=` and can be embedded in a query string verbatim.
///
/// # Examples
///
/// ```
/// use urisign::encoding::encode;
///
/// assert_eq!(encode(b"\xfb\xef\xff"), "--__");
/// assert_eq!(encode(b"A"), "QQ");
/// ```
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode url-safe base64 text back into bytes.
///
/// The standard alphabet is accepted as well (`+` and `/` are translated
/// before decoding) and trailing `=` padding is tolerated. Malformed
/// input decodes to an empty vector rather than an error; callers that need
/// strict validation check for emptiness or expected length.
///
/// # Examples
///
/// ```
/// use urisign::encoding::decode;
///
/// assert_eq!(decode("QQ"), b"A");
/// assert_eq!(decode("not base64!"), Vec::<u8>::new());
/// ```
#[must_use]
pub fn decode(text: &str) -> Vec<u8> {
    let translated: String = text
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    URL_SAFE_LENIENT.decode(translated).unwrap_or_default()
}
