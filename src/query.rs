//! A codec for `key=value&key=value` query strings.
//!
//! Pairs are separated by `'&'` only; `';'` is ordinary data. `'+'` is
//! ordinary data as well and is never taken for a space.

use crate::pct_enc::{
    encoder::{Data, Query},
    Decode, EString,
};
use alloc::{borrow::ToOwned, string::String, vec::Vec};

/// A key-value pair of a query string.
///
/// A `value` of `None` means the pair has no `'='`, whereas
/// `Some("")` means it has one followed by nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryPair {
    /// The decoded key.
    pub key: String,
    /// The decoded value, if any.
    pub value: Option<String>,
}

impl QueryPair {
    /// Creates a new `QueryPair`.
    #[must_use]
    pub fn new(key: &str, value: Option<&str>) -> Self {
        Self {
            key: key.to_owned(),
            value: value.map(ToOwned::to_owned),
        }
    }
}

/// Decodes a query string into key-value pairs, in order.
///
/// The query is split on `'&'`, empty pieces are skipped, and each piece is
/// split at its first `'='`. Both halves are percent-decoded, with invalid
/// UTF-8 replaced by [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD]. A `'%'` that
/// does not start a valid percent-encoded octet is kept as is.
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
///
/// # Examples
///
/// ```
/// use uriref::query::{decode_query, QueryPair};
///
/// assert_eq!(
///     decode_query("a=1&b&c=&&d=x%20y+z"),
///     [
///         QueryPair::new("a", Some("1")),
///         QueryPair::new("b", None),
///         QueryPair::new("c", Some("")),
///         QueryPair::new("d", Some("x y+z")),
///     ]
/// );
/// assert!(decode_query("").is_empty());
/// ```
#[must_use]
pub fn decode_query(query: &str) -> Vec<QueryPair> {
    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let (key, value) = match piece.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (piece, None),
            };
            QueryPair {
                key: decode(key),
                value: value.map(decode),
            }
        })
        .collect()
}

fn decode(s: &str) -> String {
    Decode::new(s).to_string_lossy().into_owned()
}

/// Encodes key-value pairs into a query string.
///
/// Everything but unreserved characters is percent-encoded, so a space
/// becomes `"%20"`. Pairs are written as `key=value`, or as `key` alone
/// when the value is `None`, and joined with `'&'`.
///
/// A pair with an empty key and no value encodes to nothing,
/// so it does not survive [`decode_query`].
///
/// # Examples
///
/// ```
/// use uriref::query::{encode_query, QueryPair};
///
/// let pairs = [
///     QueryPair::new("a", Some("1")),
///     QueryPair::new("b", None),
///     QueryPair::new("q", Some("x y&z")),
/// ];
/// assert_eq!(encode_query(&pairs), "a=1&b&q=x%20y%26z");
/// ```
#[must_use]
pub fn encode_query(pairs: &[QueryPair]) -> String {
    let mut buf = EString::<Query>::new();
    for (i, pair) in pairs.iter().enumerate() {
        if i != 0 {
            buf.push('&');
        }
        buf.encode_str::<Data>(&pair.key);
        if let Some(value) = &pair.value {
            buf.push('=');
            buf.encode_str::<Data>(value);
        }
    }
    buf.into_string()
}
