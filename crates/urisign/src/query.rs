//! Query-string parsing, ambiguity detection, and canonical serialization.
//!
//! Signing and verification must hash the exact same byte sequence for the
//! same logical parameter set, regardless of the order parameters appear in
//! the URI. This module owns the three steps that make that deterministic:
//!
//! 1. Parse the raw query into an insertion-ordered name→value(s) mapping
//!    with form-urlencoded decoding. Names ending in `[]` collect repeated
//!    values into a list under the base name.
//! 2. Reject ambiguous queries: a non-array name repeated in the raw string
//!    would be collapsed by parsing, so the mapping would no longer describe
//!    what the URI shows.
//! 3. Serialize the mapping back to a form-urlencoded string with entries
//!    sorted byte-wise by name, list values expanded as indexed `name[i]`
//!    pairs.

use std::collections::HashSet;

use percent_encoding::percent_decode_str;

/// One or more decoded values for a parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A scalar `name=value` parameter.
    Single(String),
    /// Repeated `name[]=value` occurrences, in URI order.
    List(Vec<String>),
}

/// An insertion-ordered parameter mapping.
pub type ParamMap = Vec<(String, ParamValue)>;

/// Parse a raw query string into a [`ParamMap`].
///
/// Decoding follows `application/x-www-form-urlencoded`: pairs split on `&`,
/// names and values split on the first `=`, `+` decoded to space and
/// percent-escapes resolved. A pair without `=` yields an empty value; a
/// pair with an empty name is dropped. A repeated scalar name keeps the last
/// value; an array-style occurrence over an existing scalar replaces it.
///
/// # Examples
///
/// ```
/// use urisign::query::{ParamValue, parse_params};
///
/// let params = parse_params("a=1&b%5B%5D=2&b%5B%5D=3");
/// assert_eq!(params[0], ("a".to_owned(), ParamValue::Single("1".to_owned())));
/// assert_eq!(
///     params[1],
///     ("b".to_owned(), ParamValue::List(vec!["2".to_owned(), "3".to_owned()]))
/// );
/// ```
#[must_use]
pub fn parse_params(query: &str) -> ParamMap {
    let mut params: ParamMap = Vec::new();

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if name.is_empty() {
            continue;
        }

        if let Some(base) = name.strip_suffix("[]") {
            if base.is_empty() {
                continue;
            }
            match params.iter().position(|(n, _)| n == base) {
                Some(i) => match &mut params[i].1 {
                    ParamValue::List(values) => values.push(value.into_owned()),
                    entry @ ParamValue::Single(_) => {
                        *entry = ParamValue::List(vec![value.into_owned()]);
                    }
                },
                None => params.push((base.to_owned(), ParamValue::List(vec![value.into_owned()]))),
            }
        } else {
            match params.iter().position(|(n, _)| *n == name) {
                Some(i) => params[i].1 = ParamValue::Single(value.into_owned()),
                None => params.push((name.into_owned(), ParamValue::Single(value.into_owned()))),
            }
        }
    }

    params
}

/// Detect doubled (ambiguous) parameter names in a raw query string.
///
/// Operates on the undecoded `&`-split pairs, not the parsed mapping: the
/// name is the substring before the first `=`, percent-decoded (`+` is not
/// translated here). A pair with no `=` or an empty name is itself treated
/// as ambiguous. Names ending in the literal suffix `[]` may legitimately
/// repeat and are never flagged; any other name seen twice is doubled.
#[must_use]
pub fn has_doubled_params(query: &str) -> bool {
    let mut seen = HashSet::new();

    for pair in query.split('&') {
        let Some((raw_name, _)) = pair.split_once('=') else {
            return true;
        };
        if raw_name.is_empty() {
            return true;
        }

        let name = percent_decode_str(raw_name).decode_utf8_lossy();

        if name.ends_with("[]") {
            continue;
        }
        if !seen.insert(name.into_owned()) {
            return true;
        }
    }

    false
}

/// Serialize a parameter mapping into its canonical query-string form.
///
/// Entries are sorted ascending by name (stable, byte-wise), then
/// form-urlencoded: scalars as `name=value`, lists as indexed
/// `name[0]=v0&name[1]=v1` pairs with the brackets percent-encoded. Two
/// mappings with equal contents canonicalize to identical strings whatever
/// order they were built in.
///
/// # Examples
///
/// ```
/// use urisign::query::{canonical_query, parse_params};
///
/// let params = parse_params("b=2&a=v%20.");
/// assert_eq!(canonical_query(&params), "a=v+.&b=2");
/// ```
#[must_use]
pub fn canonical_query(params: &ParamMap) -> String {
    let mut sorted: Vec<&(String, ParamValue)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in sorted {
        match value {
            ParamValue::Single(v) => {
                serializer.append_pair(name, v);
            }
            ParamValue::List(values) => {
                for (index, v) in values.iter().enumerate() {
                    serializer.append_pair(&format!("{name}[{index}]"), v);
                }
            }
        }
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str, value: &str) -> (String, ParamValue) {
        (name.to_owned(), ParamValue::Single(value.to_owned()))
    }

    #[test]
    fn test_should_parse_scalars_in_order() {
        let params = parse_params("b=2&a=1");
        assert_eq!(params, vec![single("b", "2"), single("a", "1")]);
    }

    #[test]
    fn test_should_decode_names_and_values() {
        let params = parse_params("p%20q=vA%20e.&r=a+b");
        assert_eq!(params, vec![single("p q", "vA e."), single("r", "a b")]);
    }

    #[test]
    fn test_should_parse_pair_without_equals_as_empty_value() {
        assert_eq!(parse_params("noparam"), vec![single("noparam", "")]);
    }

    #[test]
    fn test_should_drop_empty_names() {
        assert_eq!(parse_params("=v&a=1"), vec![single("a", "1")]);
        assert!(parse_params("").is_empty());
        assert!(parse_params("%5B%5D=v").is_empty());
    }

    #[test]
    fn test_should_keep_last_value_for_repeated_scalar() {
        assert_eq!(parse_params("p=w&p=v"), vec![single("p", "v")]);
    }

    #[test]
    fn test_should_collect_array_parameters() {
        let params = parse_params("param%5B%5D=1&param%5B%5D=2");
        assert_eq!(
            params,
            vec![(
                "param".to_owned(),
                ParamValue::List(vec!["1".to_owned(), "2".to_owned()])
            )]
        );
    }

    #[test]
    fn test_should_replace_scalar_with_array_occurrence() {
        let params = parse_params("p=1&p%5B%5D=2");
        assert_eq!(
            params,
            vec![("p".to_owned(), ParamValue::List(vec!["2".to_owned()]))]
        );
    }

    #[test]
    fn test_should_flag_doubled_scalar_names() {
        assert!(has_doubled_params("param=1&param=2"));
        assert!(!has_doubled_params("param1=1&param2=2"));
    }

    #[test]
    fn test_should_flag_pairs_without_equals() {
        assert!(has_doubled_params("noparam"));
        assert!(has_doubled_params("a=1&noparam"));
        assert!(has_doubled_params("=v"));
        assert!(has_doubled_params(""));
    }

    #[test]
    fn test_should_exempt_array_suffix_names() {
        assert!(!has_doubled_params("param%5B%5D=1&param%5B%5D=2"));
        assert!(!has_doubled_params("param[]=1&param[]=2"));
    }

    #[test]
    fn test_should_flag_doubled_percent_encoded_names() {
        // %70 decodes to `p`, so this doubles the raw name `p`.
        assert!(has_doubled_params("p=1&%70=2"));
    }

    #[test]
    fn test_should_not_translate_plus_in_doubled_check() {
        // `a+b` and `a b` are distinct raw names for the ambiguity check.
        assert!(!has_doubled_params("a+b=1&a%20b=2"));
    }

    #[test]
    fn test_should_sort_canonical_output_by_name() {
        let params = parse_params("b=2&a=1&c=3");
        assert_eq!(canonical_query(&params), "a=1&b=2&c=3");
    }

    #[test]
    fn test_should_sort_names_byte_wise() {
        // Byte-wise order, not numeric: "10" sorts before "9".
        let params = parse_params("9=a&10=b");
        assert_eq!(canonical_query(&params), "10=b&9=a");
    }

    #[test]
    fn test_should_form_encode_canonical_values() {
        let params = parse_params("param2=vA%20e.&param1=value1");
        assert_eq!(canonical_query(&params), "param1=value1&param2=vA+e.");
    }

    #[test]
    fn test_should_expand_lists_with_indexed_names() {
        let params = parse_params("param%5B%5D=1&param%5B%5D=2");
        assert_eq!(
            canonical_query(&params),
            "param%5B0%5D=1&param%5B1%5D=2"
        );
    }

    #[test]
    fn test_should_canonicalize_order_insensitively() {
        let forward = parse_params("param1=value1&param2=vA%20e.");
        let reverse = parse_params("param2=vA%20e.&param1=value1");
        assert_eq!(canonical_query(&forward), canonical_query(&reverse));
    }
}
