//! Named request attributes handed to `connect` and `match`
//!
//! A router only reads the attribute it was configured for (`path`,
//! `method`, `command`, ...) and ignores the rest, so one `Attrs` value can
//! travel unchanged through every level of a composed matcher graph.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// An ordered bag of `name → value` attributes
///
/// Keys are kept sorted so diagnostics (e.g. the "received" list of a
/// missing-argument error) are deterministic.
///
/// # Examples
///
/// ```
/// use route_graph::Attrs;
///
/// let attrs = Attrs::new().with("path", "/articles/books").with("method", "GET");
/// assert_eq!(attrs.get("method"), Some("GET"));
/// assert_eq!(attrs.get("command"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    values: BTreeMap<String, String>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a bag holding only a `path` attribute
    pub fn path(path: impl Into<String>) -> Self {
        Self::new().with("path", path)
    }

    /// Shorthand for a bag holding only a `method` attribute
    pub fn method(method: impl Into<String>) -> Self {
        Self::new().with("method", method)
    }

    /// Adds (or replaces) an attribute, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the attribute or a [`Error::MissingArgument`] naming what was supplied
    ///
    /// ```
    /// use route_graph::Attrs;
    ///
    /// let attrs = Attrs::new().with("patch", "/some/path");
    /// let err = attrs.require("path").unwrap_err();
    /// assert!(err.is_missing_argument());
    /// ```
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingArgument {
            expected: key.to_string(),
            received: self.keys().map(str::to_string).collect(),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present() {
        let attrs = Attrs::path("/index");
        assert_eq!(attrs.require("path").unwrap(), "/index");
    }

    #[test]
    fn test_require_missing_lists_received_keys() {
        let attrs = Attrs::new().with("b", "BAZ").with("a2", "x");
        match attrs.require("a") {
            Err(Error::MissingArgument { expected, received }) => {
                assert_eq!(expected, "a");
                assert_eq!(received, vec!["a2".to_string(), "b".to_string()]);
            }
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_from_iter_and_display() {
        let attrs: Attrs = [("path", "/a"), ("method", "GET")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.to_string(), r#"{method="GET", path="/a"}"#);
    }
}
