//! Query string parsing module
//!
//! Looks up single parameters in the raw query of a request URI.

use hyper::Uri;

/// Return the first value bound to `key` in the URI's raw query string.
///
/// Pairs are separated by `&` and split on the first `=`. A pair without
/// `=` never matches. The value gets `+` turned into spaces; no
/// percent-decoding is done.
///
/// # Examples
/// ```
/// use hola_server::http::query::query_param;
/// let uri: hyper::Uri = "/hello?name=Jo+Ann".parse().unwrap();
/// assert_eq!(query_param(&uri, "name").as_deref(), Some("Jo Ann"));
/// ```
pub fn query_param(uri: &Uri, key: &str) -> Option<String> {
    find_param(uri.query()?, key)
}

/// Same as [`query_param`], on a raw query string without the leading `?`
pub fn find_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_simple_match() {
        assert_eq!(query_param(&uri("/hello?name=Ana"), "name").as_deref(), Some("Ana"));
    }

    #[test]
    fn test_plus_becomes_space() {
        assert_eq!(find_param("name=Jo+Ann", "name").as_deref(), Some("Jo Ann"));
        assert_eq!(find_param("name=+", "name").as_deref(), Some(" "));
    }

    #[test]
    fn test_no_percent_decoding() {
        assert_eq!(find_param("name=Jo%20Ann", "name").as_deref(), Some("Jo%20Ann"));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(find_param("name=a&name=b", "name").as_deref(), Some("a"));
        assert_eq!(find_param("x=1&name=b&name=c", "name").as_deref(), Some("b"));
    }

    #[test]
    fn test_value_keeps_later_equals() {
        assert_eq!(find_param("name=a=b", "name").as_deref(), Some("a=b"));
    }

    #[test]
    fn test_empty_value_is_present() {
        assert_eq!(find_param("name=", "name").as_deref(), Some(""));
    }

    #[test]
    fn test_pair_without_equals_is_ignored() {
        assert_eq!(find_param("name", "name"), None);
        assert_eq!(find_param("name&name=Bo", "name").as_deref(), Some("Bo"));
    }

    #[test]
    fn test_key_must_match_exactly() {
        assert_eq!(find_param("names=a&Name=b", "name"), None);
        assert_eq!(find_param("=a", "name"), None);
    }

    #[test]
    fn test_absent_or_empty_query() {
        assert_eq!(query_param(&uri("/hello"), "name"), None);
        assert_eq!(query_param(&uri("/hello?"), "name"), None);
        assert_eq!(find_param("", "name"), None);
        assert_eq!(find_param("&&", "name"), None);
    }
}
