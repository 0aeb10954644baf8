//! Hierarchical path router
//!
//! Routes are registered as `/`-separated token lists and stored in a
//! segment trie. Matching walks the trie one segment at a time with no
//! backtracking: the literal child wins if present, otherwise the first
//! registered pattern that fully matches the segment.

use tracing::{debug, trace};

use crate::attrs::Attrs;
use crate::config::RouterConfig;
use crate::error::{Error, ErrorKind, MatcherInfo, Result};
use crate::matcher::{Capture, MatchInfo, Matcher, Node};
use crate::path::{join_segments, normalize_segments, PathMap};
use crate::route::pattern::{classify_token, SegmentToken};

/// Stands in for the empty segment list of `/`; real segments are never empty
const ROOT_MARKER: &str = "";

/// One trie position: optionally a registered node, optionally deeper segments
struct Slot<H> {
    node: Option<Node<H>>,
    children: Option<PathMap<Slot<H>>>,
}

impl<H> Default for Slot<H> {
    fn default() -> Self {
        Self {
            node: None,
            children: None,
        }
    }
}

/// A router which dispatches on path hierarchies
///
/// # Examples
///
/// ```
/// use route_graph::{Attrs, Matcher, PathRouter};
///
/// let mut router: PathRouter<&str> = PathRouter::new();
/// router.add("/", "index").unwrap();
/// router.add("/articles/{category}/{id:[0-9]+}", "article").unwrap();
///
/// let m = router.match_route(&Attrs::path("/articles/books/123")).unwrap();
/// assert_eq!(*m.target, "article");
/// assert_eq!(m.match_info.get_str("category"), Some("books"));
/// assert_eq!(m.match_info.get_str("id"), Some("123"));
///
/// assert!(router.match_route(&Attrs::path("/articles/books/abc")).unwrap_err().is_no_match());
/// ```
///
/// # Nesting
///
/// A nested matcher receives the same attributes as its parent, and nothing
/// is stripped from the path on the way down. A `PathRouter` registered
/// under another one reading the same key therefore matches the *whole*
/// path again, not the remainder. The outer route must end where the path
/// ends:
///
/// ```
/// use route_graph::{Attrs, Matcher, Node, PathRouter};
///
/// let mut inner: PathRouter<&str> = PathRouter::new();
/// inner.add("/articles/{slug}", "article").unwrap();
///
/// let mut outer: PathRouter<&str> = PathRouter::new();
/// outer.add("/articles/{category}", Node::matcher(inner)).unwrap();
///
/// let m = outer.match_route(&Attrs::path("/articles/books")).unwrap();
/// assert_eq!(m.match_info.get_str("category"), Some("books"));
/// assert_eq!(m.match_info.get_str("slug"), Some("books"));
///
/// // no prefix stripping: the outer route has nothing below `{category}`
/// assert!(outer.match_route(&Attrs::path("/articles/books/123")).is_err());
/// ```
///
/// To split one request across levels, give the inner router its own key
/// with [`PathRouter::with_key`].
pub struct PathRouter<H> {
    path_key: String,
    root: PathMap<Slot<H>>,
    error_kind: ErrorKind,
}

impl<H> PathRouter<H> {
    /// Creates a router reading the `path` attribute
    pub fn new() -> Self {
        Self::with_key("path")
    }

    /// Creates a router reading a custom attribute
    pub fn with_key(path_key: impl Into<String>) -> Self {
        Self {
            path_key: path_key.into(),
            root: PathMap::new(),
            error_kind: ErrorKind::default(),
        }
    }

    pub fn with_config(config: &RouterConfig) -> Self {
        Self::with_key(config.path_key.clone())
    }

    /// Sets the kind stamped on this router's no-match failures
    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = kind;
        self
    }

    pub fn path_key(&self) -> &str {
        &self.path_key
    }

    /// Registers `node` under `path`, building the attribute bag for you
    pub fn add(&mut self, path: &str, node: impl Into<Node<H>>) -> Result<()> {
        let attrs = Attrs::new().with(self.path_key.clone(), path);
        self.connect(node.into(), &attrs)
    }

    /// Registered route templates in canonical form, sorted
    ///
    /// ```
    /// use route_graph::PathRouter;
    ///
    /// let mut router: PathRouter<u8> = PathRouter::new();
    /// router.add("/users/{id}/", 1).unwrap();
    /// router.add("/", 0).unwrap();
    /// assert_eq!(router.routes(), vec!["/", "/users/{id}"]);
    /// ```
    pub fn routes(&self) -> Vec<String> {
        fn walk<H>(map: &PathMap<Slot<H>>, prefix: &mut Vec<String>, out: &mut Vec<String>) {
            for (token, slot) in map.iter() {
                prefix.push(token.to_string());
                if slot.node.is_some() {
                    out.push(join_segments(prefix));
                }
                if let Some(children) = &slot.children {
                    walk(children, prefix, out);
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out.sort();
        out
    }
}

impl<H> Default for PathRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Matcher<H> for PathRouter<H> {
    fn connect(&mut self, node: Node<H>, attrs: &Attrs) -> Result<()> {
        let path = attrs.require(&self.path_key)?;

        let mut segments = normalize_segments(path);
        if segments.is_empty() {
            segments.push(ROOT_MARKER);
        }

        // Parse and validate every token before touching the trie
        let tokens = segments
            .iter()
            .map(|segment| classify_token(segment))
            .collect::<Result<Vec<_>>>()?;
        let last = tokens.len() - 1;
        if let Some(glob) = tokens[..last].iter().find_map(|token| match token {
            SegmentToken::Capture(pattern) if pattern.is_glob() => Some(pattern),
            _ => None,
        }) {
            return Err(Error::InvalidRoute {
                path: path.to_string(),
                reason: format!("glob capture {glob} must be the last segment"),
            });
        }

        debug!(path_key = %self.path_key, path, "registering route");

        let mut map = &mut self.root;
        for (depth, token) in tokens.into_iter().enumerate() {
            let slot = map.slot_mut(token);
            if depth == last {
                slot.node = Some(node);
                return Ok(());
            }
            map = slot.children.get_or_insert_with(PathMap::new);
        }

        Ok(())
    }

    fn resolve<'r>(
        &'r self,
        mut match_info: MatchInfo,
        attrs: &Attrs,
    ) -> Result<(&'r Node<H>, MatchInfo)> {
        let path = attrs.require(&self.path_key)?;
        let segments = normalize_segments(path);

        if segments.is_empty() {
            return match self.root.get_literal(ROOT_MARKER).and_then(|slot| slot.node.as_ref()) {
                Some(node) => Ok((node, match_info)),
                None => Err(self.no_match(attrs, "no route registered for the root path".into())),
            };
        }

        let last = segments.len() - 1;
        let mut captures = MatchInfo::new();
        let mut map = &self.root;
        let mut depth = 0;

        loop {
            let segment = segments[depth];
            let (slot, capture) = map
                .get(segment)
                .map_err(|err| self.no_match(attrs, err.to_string()))?;
            trace!(segment, depth, capture = ?capture.map(|p| p.name()), "descending");

            let mut terminal = depth == last;
            if let Some(pattern) = capture {
                if pattern.is_glob() {
                    let rest = segments[depth..].iter().map(|s| s.to_string()).collect();
                    captures.insert(pattern.name(), Capture::Glob(rest));
                    terminal = true;
                } else {
                    captures.insert(pattern.name(), segment);
                }
            }

            if terminal {
                let node = slot.node.as_ref().ok_or_else(|| {
                    self.no_match(attrs, format!("path ends at {segment:?} but no route ends there"))
                })?;
                match_info.merge(captures);
                return Ok((node, match_info));
            }

            map = slot.children.as_ref().ok_or_else(|| {
                self.no_match(attrs, format!("route ends at {segment:?} but the path continues"))
            })?;
            depth += 1;
        }
    }

    fn name(&self) -> &'static str {
        "PathRouter"
    }

    /// `registered` stays empty; [`PathRouter::routes`] walks the whole trie
    fn info(&self) -> MatcherInfo {
        MatcherInfo::new(self.name()).with_key(self.path_key.clone())
    }

    fn error_kind(&self) -> &ErrorKind {
        &self.error_kind
    }
}
