//! The composition protocol every matcher speaks
//!
//! A matcher resolves one step of a request: it peels off one dispatch key
//! (a path segment run, a method, a command) and lands on a [`Node`]. A
//! handler node ends resolution; a matcher node is asked to continue with
//! the extraction context gathered so far. `match_with` drives that loop.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::attrs::Attrs;
use crate::error::{Error, ErrorKind, MatcherInfo, NoMatch, Result};

/// Boxed matcher stored inside a [`Node`]
pub type BoxMatcher<H> = Box<dyn Matcher<H> + Send + Sync>;

/// What a registration resolves to: a terminal handler or another matcher
///
/// Matchers are owned by the node that holds them, so a matcher graph is
/// always a tree and resolution always terminates.
pub enum Node<H> {
    Handler(H),
    Matcher(BoxMatcher<H>),
}

impl<H> Node<H> {
    pub fn handler(handler: H) -> Self {
        Node::Handler(handler)
    }

    pub fn matcher<M>(matcher: M) -> Self
    where
        M: Matcher<H> + Send + Sync + 'static,
    {
        Node::Matcher(Box::new(matcher))
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, Node::Handler(_))
    }
}

impl<H> From<H> for Node<H> {
    fn from(handler: H) -> Self {
        Node::Handler(handler)
    }
}

impl<H: fmt::Debug> fmt::Debug for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Handler(handler) => f.debug_tuple("Handler").field(handler).finish(),
            Node::Matcher(matcher) => f.debug_tuple("Matcher").field(&matcher.name()).finish(),
        }
    }
}

/// A value extracted while matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// One path segment (or dispatch key)
    Segment(String),
    /// Every remaining path segment, in order (`{*name}` tokens)
    Glob(Vec<String>),
}

impl Capture {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Capture::Segment(value) => Some(value),
            Capture::Glob(_) => None,
        }
    }

    pub fn as_segments(&self) -> Option<&[String]> {
        match self {
            Capture::Glob(values) => Some(values),
            Capture::Segment(_) => None,
        }
    }
}

impl From<&str> for Capture {
    fn from(value: &str) -> Self {
        Capture::Segment(value.to_string())
    }
}

impl From<String> for Capture {
    fn from(value: String) -> Self {
        Capture::Segment(value)
    }
}

impl From<Vec<String>> for Capture {
    fn from(values: Vec<String>) -> Self {
        Capture::Glob(values)
    }
}

/// Values extracted across every level of delegation
///
/// Keys are the capture names declared at registration. When two levels
/// capture the same name, the deeper level wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchInfo {
    captures: HashMap<String, Capture>,
}

impl MatchInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, capture: impl Into<Capture>) {
        self.captures.insert(name.into(), capture.into());
    }

    pub fn get(&self, name: &str) -> Option<&Capture> {
        self.captures.get(name)
    }

    /// Single-segment capture by name
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Capture::as_str)
    }

    /// Glob capture by name
    pub fn get_glob(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Capture::as_segments)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.captures.contains_key(name)
    }

    /// Merges `other` into `self`, overwriting same-named captures
    pub fn merge(&mut self, other: MatchInfo) {
        self.captures.extend(other.captures);
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Capture> {
        self.captures.iter()
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MatchInfo
where
    K: Into<String>,
    V: Into<Capture>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut info = MatchInfo::new();
        for (name, capture) in iter {
            info.insert(name, capture);
        }
        info
    }
}

/// Result of a successful top-level match
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    /// The handler supplied at registration
    pub target: &'r H,
    pub match_info: MatchInfo,
}

impl<'r, H> Clone for RouteMatch<'r, H> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            match_info: self.match_info.clone(),
        }
    }
}

/// The contract shared by every matcher type
///
/// Implementors provide `connect`, `resolve`, `name`, `info` and `error_kind`;
/// recursion through nested matchers comes for free from `match_with`.
pub trait Matcher<H> {
    /// Registers `node` for requests matching `attrs`
    fn connect(&mut self, node: Node<H>, attrs: &Attrs) -> Result<()>;

    /// Resolves a single step, returning the landed node and the updated context
    fn resolve<'r>(&'r self, match_info: MatchInfo, attrs: &Attrs)
        -> Result<(&'r Node<H>, MatchInfo)>;

    /// Matcher type name, as reported in diagnostics
    fn name(&self) -> &'static str;

    /// Snapshot used to annotate no-match failures
    fn info(&self) -> MatcherInfo;

    /// The kind this matcher stamps on its no-match failures
    fn error_kind(&self) -> &ErrorKind;

    /// Builds this matcher's no-match failure
    fn no_match(&self, attrs: &Attrs, reason: String) -> Error {
        let info = self.info();
        debug!(matcher = info.name, kind = %self.error_kind(), %reason, "no match");
        NoMatch::new(self.error_kind().clone(), info, attrs, reason).into()
    }

    /// Resolves `attrs` all the way down to a handler, seeding the context
    fn match_with<'r>(&'r self, match_info: MatchInfo, attrs: &Attrs) -> Result<RouteMatch<'r, H>> {
        let (node, match_info) = self.resolve(match_info, attrs)?;
        match node {
            Node::Handler(target) => Ok(RouteMatch { target, match_info }),
            Node::Matcher(next) => {
                trace!(from = self.name(), to = next.name(), "delegating");
                next.match_with(match_info, attrs)
            }
        }
    }

    /// Resolves `attrs` starting from an empty context
    fn match_route<'r>(&'r self, attrs: &Attrs) -> Result<RouteMatch<'r, H>> {
        self.match_with(MatchInfo::new(), attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolves to its node, capturing a fixed value on the way
    struct Tagging {
        name: &'static str,
        value: &'static str,
        node: Node<&'static str>,
        kind: ErrorKind,
    }

    impl Matcher<&'static str> for Tagging {
        fn connect(&mut self, node: Node<&'static str>, _attrs: &Attrs) -> Result<()> {
            self.node = node;
            Ok(())
        }

        fn resolve<'r>(
            &'r self,
            mut match_info: MatchInfo,
            _attrs: &Attrs,
        ) -> Result<(&'r Node<&'static str>, MatchInfo)> {
            match_info.insert(self.name, self.value);
            Ok((&self.node, match_info))
        }

        fn name(&self) -> &'static str {
            "Tagging"
        }

        fn info(&self) -> MatcherInfo {
            MatcherInfo::new(self.name())
        }

        fn error_kind(&self) -> &ErrorKind {
            &self.kind
        }
    }

    fn tagging(name: &'static str, value: &'static str, node: Node<&'static str>) -> Tagging {
        Tagging {
            name,
            value,
            node,
            kind: ErrorKind::Custom("teapot".into()),
        }
    }

    #[test]
    fn test_nested_match_merges_context() {
        let inner = tagging("id", "123", Node::handler("article"));
        let outer = tagging("category", "books", Node::matcher(inner));

        let m = outer.match_route(&Attrs::new()).unwrap();
        assert_eq!(*m.target, "article");
        assert_eq!(m.match_info.get_str("category"), Some("books"));
        assert_eq!(m.match_info.get_str("id"), Some("123"));
    }

    #[test]
    fn test_deeper_level_overwrites_outer_capture() {
        let inner = tagging("id", "inner", Node::handler("h"));
        let outer = tagging("id", "outer", Node::matcher(inner));

        let m = outer.match_route(&Attrs::new()).unwrap();
        assert_eq!(m.match_info.get_str("id"), Some("inner"));
    }

    #[test]
    fn test_seeded_context_survives() {
        let router = tagging("id", "1", Node::handler("h"));
        let seed: MatchInfo = [("tenant", "acme")].into_iter().collect();

        let m = router.match_with(seed, &Attrs::new()).unwrap();
        assert_eq!(m.match_info.len(), 2);
        assert_eq!(m.match_info.get_str("tenant"), Some("acme"));
    }

    #[test]
    fn test_no_match_uses_configured_kind() {
        let router = tagging("id", "1", Node::handler("h"));
        let attrs = Attrs::new().with("foo", "bar").with("baz", "2");
        let err = router.no_match(&attrs, "nothing here".into());

        let no_match = err.as_no_match().unwrap();
        assert_eq!(no_match.kind, ErrorKind::Custom("teapot".into()));
        assert_eq!(no_match.matcher.name, "Tagging");
        assert_eq!(no_match.attrs, attrs);
    }

    #[test]
    fn test_capture_accessors() {
        let mut info = MatchInfo::new();
        info.insert("id", "7");
        info.insert("rest", vec!["a".to_string(), "b".to_string()]);

        assert_eq!(info.get_str("id"), Some("7"));
        assert_eq!(info.get_glob("id"), None);
        assert_eq!(info.get_glob("rest"), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(info.get_str("rest"), None);
    }
}
