//! Master redirection.
//!
//! When the backend reports that another controller instance holds
//! mastership, the response becomes a 307 pointing at that instance,
//! keeping the original scheme, path, and query (re-percent-encoded,
//! order preserved).

use crate::query::{self, QueryPair};

/// Build the `Location` value for a not-master redirect.
pub fn master_location(
    scheme: &str,
    host: &str,
    port: u16,
    path: &str,
    pairs: &[QueryPair],
) -> String {
    let mut location = format!("{scheme}://{host}:{port}{path}");
    if !pairs.is_empty() {
        location.push('?');
        location.push_str(&query::encode(pairs));
    }
    location
}
