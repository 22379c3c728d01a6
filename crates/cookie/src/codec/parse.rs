use crate::config::ParseOptions;
use cookie::Cookie;
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::trace;

/// Parses a `Cookie` header into an ordered `name -> value` mapping.
///
/// The parser is lenient: a segment without `=` or with an empty name is
/// skipped, and when a name appears more than once the first occurrence wins.
/// One pair of surrounding double quotes is removed before decoding.
pub fn parse(header: &str, options: &ParseOptions) -> IndexMap<String, String> {
    let mut cookies = IndexMap::new();

    for pair in Cookie::split_parse(header) {
        let pair = match pair {
            Ok(pair) => pair,
            Err(e) => {
                trace!(cause = %e, "skip malformed cookie pair");
                continue;
            }
        };

        if cookies.contains_key(pair.name()) {
            continue;
        }

        let value = decode(pair.value_trimmed(), options);
        cookies.insert(pair.name().to_owned(), value);
    }

    cookies
}

fn decode(raw: &str, options: &ParseOptions) -> String {
    match &options.decode {
        Some(decoder) => decoder.decode(raw).unwrap_or_else(|| raw.to_owned()),
        None if !raw.contains('%') => raw.to_owned(),
        None if !has_valid_escapes(raw) => raw.to_owned(),
        None => urlencoding::decode(raw).map(Cow::into_owned).unwrap_or_else(|_| raw.to_owned()),
    }
}

/// Every `%` starts a `%XX` escape.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Decoder;

    fn parse_default(header: &str) -> IndexMap<String, String> {
        parse(header, &ParseOptions::default())
    }

    #[test]
    fn test_single_pair() {
        let cookies = parse_default("foo=bar");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["foo"], "bar");
    }

    #[test]
    fn test_multiple_pairs_keep_header_order() {
        let cookies = parse_default("b=2; a=1;c=3");
        let names: Vec<&str> = cookies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(cookies["a"], "1");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let cookies = parse_default("foo=first; foo=second");
        assert_eq!(cookies["foo"], "first");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let cookies = parse_default("Foo=upper; foo=lower");
        assert_eq!(cookies["Foo"], "upper");
        assert_eq!(cookies["foo"], "lower");
    }

    #[test]
    fn test_percent_decoding() {
        let cookies = parse_default("email=a%40b.com; sig=x%2By%2Fz");
        assert_eq!(cookies["email"], "a@b.com");
        assert_eq!(cookies["sig"], "x+y/z");
    }

    #[test]
    fn test_undecodable_value_is_kept_raw() {
        let cookies = parse_default("bad=%ff%fe; mixed=100%25%zz; tail=50%; short=%4");
        assert_eq!(cookies["bad"], "%ff%fe");
        assert_eq!(cookies["mixed"], "100%25%zz");
        assert_eq!(cookies["tail"], "50%");
        assert_eq!(cookies["short"], "%4");
    }

    #[test]
    fn test_quoted_value() {
        let cookies = parse_default("foo=\"bar baz\"");
        assert_eq!(cookies["foo"], "bar baz");
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let cookies = parse_default("novalue; =empty; ok=1; ");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["ok"], "1");
    }

    #[test]
    fn test_value_with_equals() {
        let cookies = parse_default("token=a=b=c");
        assert_eq!(cookies["token"], "a=b=c");
    }

    #[test]
    fn test_custom_decoder() {
        let options = ParseOptions::new().decode(Decoder::new(|raw| Some(raw.to_uppercase())));
        let cookies = parse("foo=bar%20baz", &options);
        assert_eq!(cookies["foo"], "BAR%20BAZ");
    }

    #[test]
    fn test_custom_decoder_may_decline() {
        let options = ParseOptions::new().decode(Decoder::new(|_| None));
        let cookies = parse("foo=bar%20baz", &options);
        assert_eq!(cookies["foo"], "bar%20baz");
    }

    #[test]
    fn test_empty_header() {
        assert!(parse_default("").is_empty());
    }
}
