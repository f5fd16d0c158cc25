//! Query-string codec for asset references.
//!
//! Decodes `key=value&key2=value2` strings into an insertion-ordered
//! map and encodes such a map back, percent-encoding values on the way
//! out. The codec is deliberately asymmetric: list values encode as
//! repeated `key[]=item` pairs, but decode does not special-case the
//! `[]` suffix, and decode performs no percent-decoding. Both are
//! known limitations kept for compatibility with the query strings
//! already deployed in the wild.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Insertion-ordered key → value map for one query string.
///
/// Insertion order is what keeps a freshly stamped `v` parameter after
/// any pre-existing keys; updating an existing key keeps its position.
pub type QueryMap = IndexMap<String, QueryValue>;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Key present without `=` (e.g. `?defer`).
    Absent,
    Single(String),
    List(Vec<String>),
}

/// Characters percent-encoded in values, matching `encodeURIComponent`:
/// everything except alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decode a query string into a [`QueryMap`].
///
/// Strips a single leading `?` if present, splits on `&`, then splits
/// each piece on the first `=` only, so values may themselves contain
/// `=`. The last occurrence of a duplicate key wins; the key keeps its
/// first-seen position.
pub fn decode(qs: &str) -> QueryMap {
    let qs = qs.strip_prefix('?').unwrap_or(qs);
    let mut map = QueryMap::new();
    for piece in qs.split('&') {
        match piece.split_once('=') {
            Some((key, value)) => map.insert(key.to_string(), QueryValue::Single(value.into())),
            None => map.insert(piece.to_string(), QueryValue::Absent),
        };
    }
    map
}

/// Encode a [`QueryMap`] back into a query string (no leading `?`).
///
/// Keys are emitted in map order. Value-less keys are skipped entirely
/// unless `keep_empty` is set (then they emit `key=`). List values
/// flatten into one `key[]=item` pair per element, in element order.
/// An empty map encodes to the empty string.
pub fn encode(map: &QueryMap, keep_empty: bool) -> String {
    let mut pairs: Vec<String> = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            QueryValue::Absent => {
                if keep_empty {
                    pairs.push(format!("{key}="));
                }
            }
            QueryValue::Single(v) => {
                pairs.push(format!("{key}={}", utf8_percent_encode(v, COMPONENT)));
            }
            QueryValue::List(items) => {
                for item in items {
                    pairs.push(format!("{key}[]={}", utf8_percent_encode(item, COMPONENT)));
                }
            }
        }
    }
    pairs.join("&")
}
