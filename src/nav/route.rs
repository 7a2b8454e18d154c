//! Route string parsing.
//!
//! Routes look like `segment?key=value&key=value`. The segment names a
//! registered destination (or `..` for the parent); everything after the
//! first `?` is query parameters for the destination's controller.

/// Parameters parsed from a route's query string.
///
/// Pairs are kept in parse order. A repeated key takes its last value,
/// matching dictionary-overwrite semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Parse the text after the `?`. Empty segments are skipped and segments
    /// without a `=` are ignored rather than rejected; values are
    /// percent-decoded, keys are taken verbatim.
    fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        for segment in raw.split('&') {
            if segment.is_empty() {
                continue;
            }
            if let Some((key, value)) = segment.split_once('=') {
                pairs.push((key.to_string(), percent_decode(value)));
            }
        }
        Self(pairs)
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` appears at all, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A route string split into its destination segment and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub path: String,
    pub query: Query,
}

impl RouteRequest {
    pub fn parse(route: &str) -> Self {
        match route.split_once('?') {
            Some((path, raw)) => Self {
                path: path.to_string(),
                query: Query::parse(raw),
            },
            None => Self {
                path: route.to_string(),
                query: Query::default(),
            },
        }
    }

    /// `..` routes navigate to the parent instead of naming a destination.
    pub fn is_parent(&self) -> bool {
        self.path.starts_with("..")
    }
}

/// Decode `%XX` escapes in a query value. Malformed escapes pass through
/// literally, and a decode that produces invalid UTF-8 falls back to the raw
/// text; a query value never makes parsing fail.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_segment_has_no_query() {
        let request = RouteRequest::parse("clientes");
        assert_eq!(request.path, "clientes");
        assert!(request.query.is_empty());
        assert!(!request.is_parent());
    }

    #[test]
    fn query_is_split_from_path() {
        let request = RouteRequest::parse("cliente?id=5");
        assert_eq!(request.path, "cliente");
        assert_eq!(request.query.get("id"), Some("5"));
    }

    #[test]
    fn parent_route_carries_parameters() {
        let request = RouteRequest::parse("..?refresh=true");
        assert!(request.is_parent());
        assert_eq!(request.query.get("refresh"), Some("true"));
        assert!(request.query.contains("refresh"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let request = RouteRequest::parse("cliente?&id=5&&x=1&");
        assert_eq!(request.query.get("id"), Some("5"));
        assert_eq!(request.query.get("x"), Some("1"));
        assert_eq!(request.query.iter().count(), 2);
    }

    #[test]
    fn segments_without_equals_are_ignored() {
        let request = RouteRequest::parse("cliente?flag&id=5");
        assert!(!request.query.contains("flag"));
        assert_eq!(request.query.get("id"), Some("5"));
    }

    #[test]
    fn value_may_contain_equals() {
        let request = RouteRequest::parse("cliente?x=1=2");
        assert_eq!(request.query.get("x"), Some("1=2"));
    }

    #[test]
    fn repeated_key_takes_last_value() {
        let request = RouteRequest::parse("cliente?id=1&id=2");
        assert_eq!(request.query.get("id"), Some("2"));
    }

    #[test]
    fn values_are_percent_decoded_keys_are_not() {
        let request = RouteRequest::parse("cliente?addr=Rua%20Azul&na%20me=x");
        assert_eq!(request.query.get("addr"), Some("Rua Azul"));
        assert_eq!(request.query.get("na%20me"), Some("x"));
        assert_eq!(request.query.get("na me"), None);
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%2"), "%2");
        assert_eq!(percent_decode("a%20b%"), "a b%");
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(percent_decode("a+b"), "a+b");
    }

    #[test]
    fn invalid_utf8_decode_falls_back_to_raw() {
        assert_eq!(percent_decode("%ff%fe"), "%ff%fe");
    }
}
