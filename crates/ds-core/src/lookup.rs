//! Resolving user-supplied tokens to store positions.

use crate::entry::Entry;

/// Resolves `token` to a position in `entries`.
///
/// An exact name match wins over a numeric interpretation, so an entry named
/// `"3"` is found by `"3"` wherever it sits. Otherwise the token is read as a
/// decimal index and accepted if it is in range. Returns `None` if neither
/// applies.
pub fn resolve_token(entries: &[Entry], token: &str) -> Option<usize> {
    if let Some(position) = entries.iter().position(|entry| entry.name == token) {
        return Some(position);
    }

    token
        .parse::<usize>()
        .ok()
        .filter(|&index| index < entries.len())
}
