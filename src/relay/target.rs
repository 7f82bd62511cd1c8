//! Target URL construction.

/// Append `path` to `origin` verbatim.
///
/// No slash collapsing, percent re-encoding, or dot-segment removal takes
/// place; the upstream sees exactly the bytes the client sent.
pub fn build_target(origin: &str, path: &str) -> String {
    let mut target = String::with_capacity(origin.len() + path.len());
    target.push_str(origin);
    target.push_str(path);
    target
}
