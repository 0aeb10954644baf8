//! Framework-agnostic HTTP dispatch
//!
//! Composes a [`PathRouter`] whose leaves are [`MethodRouter`]s and turns
//! the core's failures into 404/405/400-style errors. The translation is
//! driven purely by the [`ErrorKind`] each layer was built with.

use anyhow::Context;
use tracing::debug;

use crate::attrs::Attrs;
use crate::config::{RouteTableConfig, RouterConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::matcher::{Matcher, Node, RouteMatch};
use crate::path::normalize_path;
use crate::routers::{MethodRouter, PathRouter};

/// Request-level failure of [`HttpRouter::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("no route for {path}")]
    NotFound { path: String },

    #[error("method {method} not allowed, try one of {allowed:?}")]
    MethodNotAllowed { method: String, allowed: Vec<String> },

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl HttpError {
    /// The HTTP status code this error maps to
    pub fn status(&self) -> u16 {
        match self {
            HttpError::NotFound { .. } => 404,
            HttpError::MethodNotAllowed { .. } => 405,
            HttpError::BadRequest(_) => 400,
        }
    }

    fn from_route_error(err: Error, config: &RouterConfig) -> Self {
        match err {
            Error::NoMatch(no_match) => match no_match.kind {
                ErrorKind::MethodNotAllowed => HttpError::MethodNotAllowed {
                    method: no_match.attempted().unwrap_or_default().to_string(),
                    allowed: no_match.matcher.registered.clone(),
                },
                _ => HttpError::NotFound {
                    path: no_match
                        .attrs
                        .get(&config.path_key)
                        .unwrap_or_default()
                        .to_string(),
                },
            },
            other => HttpError::BadRequest(other.to_string()),
        }
    }
}

/// Collects `(method, path, handler)` registrations
///
/// Registrations whose paths normalize to the same string share one
/// [`MethodRouter`].
///
/// # Examples
///
/// ```
/// use route_graph::{HttpError, HttpRoutes};
///
/// let router = HttpRoutes::new()
///     .route("GET", "/v1/hello/{name}", "hello_v1")
///     .route("GET", "/v2/hello/{name}", "hello_v2")
///     .route("POST", "/v2/hello/{name}", "greet_v2")
///     .build()
///     .unwrap();
///
/// let m = router.dispatch("/v2/hello/guido", "POST").unwrap();
/// assert_eq!(*m.target, "greet_v2");
/// assert_eq!(m.match_info.get_str("name"), Some("guido"));
///
/// let err = router.dispatch("/v1/hello/clare", "DELETE").unwrap_err();
/// assert_eq!(err.status(), 405);
/// ```
pub struct HttpRoutes<H> {
    config: RouterConfig,
    routes: Vec<(String, Vec<(String, H)>)>,
}

impl<H> HttpRoutes<H> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            routes: Vec::new(),
        }
    }

    /// Adds a registration, builder style
    pub fn route(mut self, method: &str, path: &str, handler: H) -> Self {
        self.add(method, path, handler);
        self
    }

    pub fn add(&mut self, method: &str, path: &str, handler: H) {
        let path = normalize_path(path).into_owned();
        match self.routes.iter_mut().find(|(existing, _)| *existing == path) {
            Some((_, methods)) => methods.push((method.to_string(), handler)),
            None => self.routes.push((path, vec![(method.to_string(), handler)])),
        }
    }

    /// Builds registrations from a route table, naming handlers through `registry`
    pub fn from_config<F>(table: &RouteTableConfig, mut registry: F) -> anyhow::Result<Self>
    where
        F: FnMut(&str) -> Option<H>,
    {
        let mut routes = Self::with_config(table.router.clone());
        for route in &table.routes {
            let handler = registry(&route.handler).with_context(|| {
                format!("Unknown handler {:?} for route {:?}", route.handler, route.path)
            })?;
            routes.add(route.method_or(&table.router.method_wildcard), &route.path, handler);
        }
        Ok(routes)
    }

    pub fn len(&self) -> usize {
        self.routes.iter().map(|(_, methods)| methods.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<H> HttpRoutes<H>
where
    H: Send + Sync + 'static,
{
    /// Compiles the registrations into a matcher graph
    pub fn build(self) -> Result<HttpRouter<H>> {
        let mut paths = PathRouter::with_config(&self.config).with_error_kind(ErrorKind::NotFound);

        for (path, handlers) in self.routes {
            let mut methods = MethodRouter::with_config(&self.config)
                .with_error_kind(ErrorKind::MethodNotAllowed);
            for (method, handler) in handlers {
                methods.add(&method, Node::handler(handler))?;
            }
            paths.add(&path, Node::matcher(methods))?;
        }

        debug!(routes = paths.routes().len(), "built http router");
        Ok(HttpRouter {
            config: self.config,
            paths,
        })
    }
}

impl<H> Default for HttpRoutes<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches `(path, method)` pairs through a path → method matcher graph
pub struct HttpRouter<H> {
    config: RouterConfig,
    paths: PathRouter<H>,
}

impl<H> HttpRouter<H> {
    pub fn dispatch(&self, path: &str, method: &str) -> Result<RouteMatch<'_, H>, HttpError> {
        let attrs = Attrs::new()
            .with(self.config.path_key.clone(), path)
            .with(self.config.method_key.clone(), method);
        self.paths
            .match_route(&attrs)
            .map_err(|err| HttpError::from_route_error(err, &self.config))
    }

    /// Registered path templates, sorted
    pub fn routes(&self) -> Vec<String> {
        self.paths.routes()
    }

    /// The underlying matcher graph
    pub fn matcher(&self) -> &PathRouter<H> {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> HttpRouter<&'static str> {
        HttpRoutes::new()
            .route("GET", "/", "index")
            .route("GET", "/articles/{id:[0-9]+}", "show")
            .route("PUT", "/articles/{id:[0-9]+}/", "update")
            .route("*", "/health", "health")
            .build()
            .unwrap()
    }

    #[test]
    fn test_methods_share_a_path() {
        let router = router();
        assert_eq!(*router.dispatch("/articles/7", "GET").unwrap().target, "show");
        assert_eq!(*router.dispatch("/articles/7", "PUT").unwrap().target, "update");
        assert_eq!(router.routes(), vec!["/", "/articles/{id:[0-9]+}", "/health"]);
    }

    #[test]
    fn test_not_found() {
        let err = router().dispatch("/articles/abc", "GET").unwrap_err();
        assert_eq!(
            err,
            HttpError::NotFound {
                path: "/articles/abc".into()
            }
        );
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let err = router().dispatch("/articles/7", "DELETE").unwrap_err();
        assert_eq!(
            err,
            HttpError::MethodNotAllowed {
                method: "DELETE".into(),
                allowed: vec!["GET".into(), "PUT".into()],
            }
        );
        assert_eq!(err.to_string(), r#"method DELETE not allowed, try one of ["GET", "PUT"]"#);
    }

    #[test]
    fn test_wildcard_method() {
        assert_eq!(*router().dispatch("/health", "OPTIONS").unwrap().target, "health");
    }

    #[test]
    fn test_custom_attribute_names() {
        let config = RouterConfig {
            path_key: "uri".into(),
            method_key: "verb".into(),
            method_wildcard: "ANY".into(),
        };
        let router = HttpRoutes::with_config(config)
            .route("ANY", "/x", "x")
            .build()
            .unwrap();
        assert_eq!(*router.dispatch("/x", "GET").unwrap().target, "x");
        assert_eq!(router.matcher().path_key(), "uri");
    }

    #[test]
    fn test_bad_route_fails_build() {
        let result = HttpRoutes::new().route("GET", "/a/{*rest}/b", "x").build();
        assert!(matches!(result, Err(Error::InvalidRoute { .. })));
    }

    #[test]
    fn test_from_config_unknown_handler() {
        let table = RouteTableConfig::from_toml_str(
            r#"
            [[routes]]
            path = "/"
            handler = "missing"
            "#,
        )
        .unwrap();
        let err = HttpRoutes::<&str>::from_config(&table, |_| None).err().unwrap();
        assert!(err.to_string().contains("missing"));
    }
}
