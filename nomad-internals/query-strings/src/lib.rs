//! Nomad Query Strings
//! Copyright (c) 2026 Nomad Camper Hire
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! nomad-internals/query-strings
//! Query-string parsing and prefix-preserving reconciliation. Merging a set
//! of named parameters into an existing query string keeps keys matching a
//! preserved prefix (campaign tags and the like) and drops everything else
//! that is not re-supplied, so repeated merges never accumulate stale noise.
//! Output is always sorted and byte-stable for identical input.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Percent-decode one `application/x-www-form-urlencoded` component.
/// `+` means space; bytes that do not form valid UTF-8 are replaced rather
/// than rejected, a query string is never a hard failure.
fn decode_component(raw: &str) -> String {
    let plus_decoded: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    let bytes = urlencoding::decode_binary(plus_decoded.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a query string into key/value pairs, in input order.
///
/// A single leading `?` is tolerated. Empty segments (`a=1&&b=2`) are
/// skipped. A key without `=` yields an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut halves = segment.splitn(2, '=');
            let key = decode_component(halves.next().unwrap_or(""));
            let value = decode_component(halves.next().unwrap_or(""));
            (key, value)
        })
        .collect()
}

/// Serialize sorted key/value pairs as an RFC 3986 percent-encoded query
/// string. Callers hand in a `BTreeMap` so key order is already canonical.
fn serialize_sorted(pairs: &BTreeMap<String, String>) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Merge `params` into `existing`, producing a canonical query string.
///
/// Keys already in `existing` survive only when re-supplied in `params` or
/// when they start with one of `preserved_prefixes`. An empty value in
/// `params` removes the key. Duplicate keys in `existing` collapse to the
/// last occurrence. The result is sorted bytewise, so merging the same
/// input twice returns the identical string.
pub fn merge_query(
    params: &BTreeMap<String, String>,
    existing: &str,
    preserved_prefixes: &[&str],
) -> String {
    let mut merged: BTreeMap<String, String> = BTreeMap::new();

    for (key, value) in parse_query(existing) {
        let preserved = preserved_prefixes.iter().any(|p| key.starts_with(p));
        if params.contains_key(&key) || preserved {
            merged.insert(key, value);
        }
    }

    for (key, value) in params {
        if value.is_empty() {
            merged.remove(key);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    serialize_sorted(&merged)
}
