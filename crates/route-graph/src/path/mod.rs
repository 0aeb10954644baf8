/// Path normalization and the segment trie
///
/// The normalizer functions are **pure**: given same input, always produce
/// same output with no side effects. Registration and matching both go
/// through [`normalize_segments`], so `/a/./b/../b/c` and `/a/b/c` address
/// the same route.

use std::borrow::Cow;

pub mod map;
pub use map::{PathMap, SegmentLookupError};

/// Splits a raw path into canonical segments, resolving dot-segments
///
/// **Pure function**: borrows from the input, never allocates strings.
///
/// # Rules
///
/// - Empty segments and `.` are dropped (`//` and `/./` collapse)
/// - `..` removes the last retained segment, and is a no-op at the root
/// - Anything else passes through unchanged, including `.bar` and `..bar`
///
/// # Examples
///
/// ```
/// use route_graph::path::normalize_segments;
///
/// assert_eq!(normalize_segments("/a/./b/../b/c"), vec!["a", "b", "c"]);
/// assert_eq!(normalize_segments("/a/../../../b"), vec!["b"]);
/// assert!(normalize_segments("/").is_empty());
/// ```
pub fn normalize_segments(path: &str) -> Vec<&str> {
    path.split('/').fold(Vec::new(), |mut out, segment| {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            _ => out.push(segment),
        }
        out
    })
}

/// Checks whether a path is already in canonical form
///
/// **Pure function**: No side effects, deterministic output.
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//`
/// - Must not end with `/` (except root `/`)
/// - Must not contain a `.` or `..` segment
///
/// # Examples
///
/// ```
/// use route_graph::path::is_canonical;
///
/// assert!(is_canonical("/"));
/// assert!(is_canonical("/users/123"));
/// assert!(is_canonical("/files/.bar"));
///
/// assert!(!is_canonical(""));
/// assert!(!is_canonical("about"));
/// assert!(!is_canonical("/about/"));
/// assert!(!is_canonical("/about//page"));
/// assert!(!is_canonical("/a/../b"));
/// ```
pub fn is_canonical(path: &str) -> bool {
    if path == "/" {
        return true;
    }

    match path.strip_prefix('/') {
        Some(rest) => rest
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | "..")),
        None => false,
    }
}

/// Renders a path in canonical string form
///
/// Returns `Cow::Borrowed` when the input is already canonical, otherwise a
/// single owned allocation. The empty segment list renders as `/`.
///
/// # Examples
///
/// ```
/// use route_graph::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about");
/// assert!(matches!(path, Cow::Borrowed("/about")));
///
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("/path//to/./page"), "/path/to/page");
/// assert_eq!(normalize_path("/a/.."), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    Cow::Owned(join_segments(&normalize_segments(path)))
}

/// Joins segments back into a rooted path
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    segments.iter().fold(String::new(), |mut out, segment| {
        out.push('/');
        out.push_str(segment.as_ref());
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/a/b/c", &["a", "b", "c"])]
    #[case("a/b", &["a", "b"])]
    #[case("//a///b//", &["a", "b"])]
    #[case("/a/./b/./", &["a", "b"])]
    #[case("/a/b/../c", &["a", "c"])]
    #[case("/a/../../..", &[])]
    #[case("/a/../../../b", &["b"])]
    #[case("/../../", &[])]
    #[case("/.bar/..bar/...", &[".bar", "..bar", "..."])]
    #[case("", &[])]
    #[case("/", &[])]
    fn test_normalize_segments(#[case] path: &str, #[case] expected: &[&str]) {
        assert_eq!(normalize_segments(path), expected);
    }

    #[rstest]
    #[case("/a/./b/../b/c")]
    #[case("/a/../../../b")]
    #[case("x/y//z/.")]
    #[case("/trailing/")]
    #[case("")]
    #[case("/..hidden/../.keep")]
    fn test_normalization_is_idempotent(#[case] path: &str) {
        let once = normalize_path(path);
        assert_eq!(normalize_segments(&once), normalize_segments(path));
        assert_eq!(normalize_path(&once), once);
    }

    #[test]
    fn test_normalize_path_borrows_canonical_input() {
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
        assert!(matches!(normalize_path("/users/123"), Cow::Borrowed(_)));
        assert!(matches!(normalize_path("/users/123/"), Cow::Owned(_)));
    }

    #[test]
    fn test_normalize_path_empty_is_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/./"), "/");
    }

    #[test]
    fn test_join_segments() {
        assert_eq!(join_segments::<&str>(&[]), "/");
        assert_eq!(join_segments(&["a", "b"]), "/a/b");
    }
}
