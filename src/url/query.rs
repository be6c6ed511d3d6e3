//! Query-string decoding for listing-row links

use crate::QueryError;

/// Ordered, decoded query parameters with unique keys
///
/// A repeated key keeps the position of its first occurrence and the value of
/// its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, replacing the value of an existing key in place
    pub fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses a raw query string (`k1=v1&k2=v2`) into ordered decoded pairs
///
/// # Rules
///
/// - Segments are separated by `&`; trailing empty segments are dropped
/// - Each segment splits on its first `=`, so values may contain `=`
/// - Keys and values are form-decoded (`+` is a space, `%XX` is a byte)
///
/// # Errors
///
/// * `QueryError::MissingSeparator` - a segment (including an empty one in the
///   middle of the string) has no `=`
/// * `QueryError::Decode` - an escape is invalid or truncated, or the decoded
///   bytes are not UTF-8
///
/// # Example
///
/// ```
/// use shelf_crawler::url::parse_query;
///
/// let params = parse_query("cPath=12&products_id=345&").unwrap();
/// assert_eq!(params.get("products_id"), Some("345"));
/// assert_eq!(params.len(), 2);
/// ```
pub fn parse_query(raw: &str) -> Result<QueryParams, QueryError> {
    let mut segments: Vec<&str> = raw.split('&').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let mut params = QueryParams::new();
    for segment in segments {
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| QueryError::MissingSeparator(segment.to_string()))?;
        params.insert(decode_component(key)?, decode_component(value)?);
    }

    Ok(params)
}

/// Returns the query part of an href
///
/// The fragment is removed. An href without `?` is returned whole, so a bare
/// query string passes through unchanged.
pub fn query_of(href: &str) -> &str {
    let href = href.split_once('#').map_or(href, |(before, _)| before);
    href.split_once('?').map_or(href, |(_, query)| query)
}

/// Decodes one form-encoded component
fn decode_component(input: &str) -> Result<String, QueryError> {
    let decode_error = |reason: &str| QueryError::Decode {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' => {
                let escape = bytes
                    .get(i + 1..i + 3)
                    .ok_or_else(|| decode_error("incomplete escape at end of input"))?;
                if !escape.iter().all(u8::is_ascii_hexdigit) {
                    return Err(decode_error("escape is not hexadecimal"));
                }
                decoded.push(hex_value(escape[0]) << 4 | hex_value(escape[1]));
                i += 3;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| decode_error("decoded bytes are not UTF-8"))
}

/// Value of an ASCII hex digit
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_keep_insertion_order() {
        let params = parse_query("a=1&b=2").unwrap();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_trailing_empty_segments_dropped() {
        let params = parse_query("a=1&").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some("1"));

        let params = parse_query("a=1&&&").unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").unwrap().is_empty());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = parse_query("token=abc=def&x=").unwrap();
        assert_eq!(params.get("token"), Some("abc=def"));
        assert_eq!(params.get("x"), Some(""));
    }

    #[test]
    fn test_form_decoding() {
        let params = parse_query("name=Sofa+%C5%BC%C3%B3%C5%82ta&q=a%26b").unwrap();
        assert_eq!(params.get("name"), Some("Sofa żółta"));
        assert_eq!(params.get("q"), Some("a&b"));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse_query("a=1&flag"),
            Err(QueryError::MissingSeparator("flag".to_string()))
        );
    }

    #[test]
    fn test_empty_middle_segment_is_an_error() {
        assert!(matches!(
            parse_query("a=1&&b=2"),
            Err(QueryError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_invalid_escapes() {
        assert!(matches!(parse_query("a=%zz"), Err(QueryError::Decode { .. })));
        assert!(matches!(parse_query("a=%4"), Err(QueryError::Decode { .. })));
        assert!(matches!(parse_query("a=%ff"), Err(QueryError::Decode { .. })));
        assert!(matches!(parse_query("a=%+1"), Err(QueryError::Decode { .. })));
        assert!(matches!(parse_query("a=%-1"), Err(QueryError::Decode { .. })));
        assert!(matches!(parse_query("%+f=1"), Err(QueryError::Decode { .. })));
    }

    #[test]
    fn test_duplicate_key_last_value_wins_first_position_kept() {
        let params = parse_query("a=1&b=2&a=3").unwrap();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_query_of() {
        assert_eq!(
            query_of("http://shop.example.com/product_info.php?cPath=3&products_id=9#top"),
            "cPath=3&products_id=9"
        );
        assert_eq!(query_of("products_id=9"), "products_id=9");
        assert_eq!(query_of("product_info.php?"), "");
    }
}
