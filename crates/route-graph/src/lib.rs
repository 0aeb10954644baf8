//! # route-graph
//!
//! A composable route-resolution engine. Small matchers are nested inside
//! each other; a request's named attributes are resolved one matcher at a
//! time until a handler is reached:
//! - Path dispatch over a segment trie (`/articles/{category}/{id:[0-9]+}`)
//! - Glob captures that swallow the rest of a path (`/static/{*path}`)
//! - HTTP-method dispatch with a pre-empting wildcard (`*`)
//! - Flat keyed dispatch for commands and messages
//!
//! ## Path Normalization
//!
//! Registration and matching share one normalizer:
//! - Repeated and trailing slashes collapse: `/a//b/` → `/a/b`
//! - `.` segments are dropped: `/a/./b` → `/a/b`
//! - `..` removes the previous segment and clamps at the root: `/a/../../b` → `/b`
//!
//! ## Matching Rules
//!
//! - A literal child always beats a pattern child
//! - Among patterns, the first registered full match wins
//! - Once a child is chosen there is no backtracking into its siblings
//!
//! ## Nesting
//!
//! Every level of a matcher graph sees the same attributes. Nothing is
//! consumed on the way down: a `PathRouter` nested under another
//! `PathRouter` with the same key re-reads the full path, there is no
//! mount-style prefix stripping. Nest routers that read different
//! attributes (`path` then `method`, or a second path key) to split one
//! request across levels.
//!
//! ## Example
//!
//! ```
//! use route_graph::{Attrs, Matcher, MethodRouter, Node, PathRouter};
//!
//! let mut methods: MethodRouter<&str> = MethodRouter::new();
//! methods.add("GET", "show_article").unwrap();
//!
//! let mut router: PathRouter<&str> = PathRouter::new();
//! router.add("/", "index").unwrap();
//! router.add("/articles/{category}/{id:[0-9]+}", Node::matcher(methods)).unwrap();
//!
//! let attrs = Attrs::path("/articles/books/123").with("method", "GET");
//! let m = router.match_route(&attrs).unwrap();
//! assert_eq!(*m.target, "show_article");
//! assert_eq!(m.match_info.get_str("id"), Some("123"));
//! ```
//!
//! ## Concurrency
//!
//! Matching never mutates a router, so a fully built router can be shared
//! across threads (it is `Sync` whenever its handlers are). `connect` takes
//! `&mut self`, which confines registration to a single owner.

// ============================================================================
// Module Declarations
// ============================================================================

mod attrs;
pub mod config;
mod error;
pub mod http;
mod matcher;
pub mod path;
pub mod route;
pub mod routers;

// ============================================================================
// Re-exports
// ============================================================================

pub use attrs::Attrs;
pub use config::{RouteConfig, RouteTableConfig, RouterConfig};
pub use error::{Error, ErrorKind, MatcherInfo, NoMatch, Result};
pub use http::{HttpError, HttpRouter, HttpRoutes};
pub use matcher::{BoxMatcher, Capture, MatchInfo, Matcher, Node, RouteMatch};
pub use path::{is_canonical, normalize_path, normalize_segments, PathMap, SegmentLookupError};
pub use route::pattern::{classify_token, SegmentPattern, SegmentToken};
pub use routers::{KeyRouter, MethodRouter, PathRouter, UnitRouter};
