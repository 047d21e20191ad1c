//! Subject and issuer URI normalization

/// Ensure a subject is an absolute `http(s)://` URI.
///
/// Empty input is returned unchanged. Anything already starting with
/// `http://` or `https://` is returned unchanged; everything else gets an
/// `https://` prefix. Applying it twice is the same as applying it once.
pub fn normalize_uri(s: &str) -> String {
    if s.is_empty() || s.starts_with("http://") || s.starts_with("https://") {
        return s.to_string();
    }
    format!("https://{}", s)
}

/// Build an issuer URI from a namespace template and a user id.
///
/// The namespace is normalized and joined to the id with exactly one `/`,
/// so `"live.example.org/users"` and `"https://live.example.org/users/"`
/// both yield `https://live.example.org/users/42` for user `42`.
pub fn issuer_uri(namespace: &str, user_id: &str) -> String {
    let base = normalize_uri(namespace.trim_end_matches('/'));
    format!("{}/{}", base, user_id.trim_start_matches('/'))
}
