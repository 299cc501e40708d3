// src/utils/url.rs

//! URL manipulation utilities.

/// Percent-encode every `/`-separated segment of a path independently.
///
/// Segment boundaries survive; anything else that is not URL-safe
/// (spaces, `#`, `?`, non-ASCII) is escaped.
///
/// # Examples
/// ```
/// use mizo_archive::utils::url::encode_path;
///
/// assert_eq!(encode_path("draft day/img 1.jpg"), "draft%20day/img%201.jpg");
/// ```
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip the origin-system prefix from a path.
///
/// Returns the stripped path and whether the prefix was present. Paths
/// without the prefix are returned untouched.
pub fn strip_origin_prefix<'a>(path: &'a str, prefix: &str) -> (&'a str, bool) {
    if prefix.is_empty() {
        return (path, true);
    }
    match path.strip_prefix(prefix) {
        Some(rest) => (rest, true),
        None => (path, false),
    }
}

/// Join an encoded path onto a base URL.
///
/// # Examples
/// ```
/// use mizo_archive::utils::url::join_asset;
///
/// assert_eq!(
///     join_asset("https://example.com/repo/main", "a/b.jpg"),
///     "https://example.com/repo/main/a/b.jpg"
/// );
/// ```
pub fn join_asset(base: &str, encoded_path: &str) -> String {
    format!("{base}/{encoded_path}")
}
