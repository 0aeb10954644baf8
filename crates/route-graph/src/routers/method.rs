//! HTTP-method dispatch
//!
//! A [`KeyRouter`] keyed by `method` with `*` as its wildcard. Registering
//! under the wildcard makes that handler answer every method, even ones
//! registered explicitly.

use crate::attrs::Attrs;
use crate::config::RouterConfig;
use crate::error::{ErrorKind, MatcherInfo, Result};
use crate::matcher::{MatchInfo, Matcher, Node};
use crate::routers::key::KeyRouter;

pub struct MethodRouter<H> {
    inner: KeyRouter<H>,
}

impl<H> MethodRouter<H> {
    /// Dispatches on `method` with `*` as the wildcard
    pub fn new() -> Self {
        Self::with_keys("method", "*")
    }

    pub fn with_keys(method_key: impl Into<String>, wildcard: impl Into<String>) -> Self {
        Self {
            inner: KeyRouter::new(method_key)
                .with_wildcard(wildcard)
                .named("MethodRouter"),
        }
    }

    pub fn with_config(config: &RouterConfig) -> Self {
        Self::with_keys(config.method_key.clone(), config.method_wildcard.clone())
    }

    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.inner = self.inner.with_error_kind(kind);
        self
    }

    pub fn method_key(&self) -> &str {
        self.inner.key()
    }

    pub fn wildcard(&self) -> &str {
        // always set by the constructors
        self.inner.wildcard().unwrap_or_default()
    }

    /// Registered methods (the wildcard included, if registered), sorted
    pub fn keys(&self) -> Vec<&str> {
        self.inner.keys()
    }

    pub fn add(&mut self, method: &str, node: impl Into<Node<H>>) -> Result<()> {
        self.inner.add(method, node)
    }
}

impl<H> Default for MethodRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Matcher<H> for MethodRouter<H> {
    fn connect(&mut self, node: Node<H>, attrs: &Attrs) -> Result<()> {
        self.inner.connect(node, attrs)
    }

    fn resolve<'r>(
        &'r self,
        match_info: MatchInfo,
        attrs: &Attrs,
    ) -> Result<(&'r Node<H>, MatchInfo)> {
        self.inner.resolve(match_info, attrs)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn info(&self) -> MatcherInfo {
        self.inner.info()
    }

    fn error_kind(&self) -> &ErrorKind {
        self.inner.error_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_connect_resolve() {
        let mut router: MethodRouter<&str> = MethodRouter::new();
        router.add("FOO", "sentinel").unwrap();
        assert_eq!(*router.match_route(&Attrs::method("FOO")).unwrap().target, "sentinel");
    }

    #[test]
    fn test_custom_method_key() {
        let mut router: MethodRouter<&str> = MethodRouter::with_keys("the_method", "*");
        router
            .connect(Node::handler("sentinel"), &Attrs::new().with("the_method", "FOO"))
            .unwrap();
        let m = router.match_route(&Attrs::new().with("the_method", "FOO")).unwrap();
        assert_eq!(*m.target, "sentinel");
    }

    #[test]
    fn test_wildcard_match() {
        let mut router: MethodRouter<&str> = MethodRouter::new();
        router.add("*", "any").unwrap();
        assert_eq!(*router.match_route(&Attrs::method("FOO")).unwrap().target, "any");
    }

    #[test]
    fn test_custom_wildcard() {
        let mut router: MethodRouter<&str> = MethodRouter::with_keys("method", "@#$");
        router.add("@#$", "any").unwrap();
        assert_eq!(router.wildcard(), "@#$");
        assert_eq!(*router.match_route(&Attrs::method("FOO")).unwrap().target, "any");
    }

    #[test]
    fn test_wildcard_preempts_specific_methods() {
        let mut router: MethodRouter<&str> = MethodRouter::new();
        router.add("GET", "get").unwrap();
        router.add("*", "any").unwrap();
        assert_eq!(*router.match_route(&Attrs::method("GET")).unwrap().target, "any");
    }

    #[test]
    fn test_available_keys() {
        let mut router: MethodRouter<()> = MethodRouter::new();
        router.add("POST", ()).unwrap();
        router.add("GET", ()).unwrap();
        assert_eq!(router.keys(), vec!["GET", "POST"]);
    }

    #[test]
    fn test_missing_method_key() {
        let mut router: MethodRouter<()> = MethodRouter::with_keys("a", "*");
        let err = router
            .connect(Node::handler(()), &Attrs::new().with("b", "BAZ"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"expected attribute "a" but received ["b"]"#
        );
    }

    #[test]
    fn test_missing_method_even_with_wildcard() {
        let mut router: MethodRouter<()> = MethodRouter::new();
        router.add("*", ()).unwrap();
        assert!(router.match_route(&Attrs::path("/x")).unwrap_err().is_missing_argument());
    }

    #[test]
    fn test_method_not_found() {
        let mut router: MethodRouter<()> = MethodRouter::new().with_error_kind(ErrorKind::MethodNotAllowed);
        router.add("GET", ()).unwrap();

        let err = router.match_route(&Attrs::method("PATCH")).unwrap_err();
        let no_match = err.as_no_match().unwrap();
        assert_eq!(no_match.kind, ErrorKind::MethodNotAllowed);
        assert_eq!(no_match.matcher.name, "MethodRouter");
        assert_eq!(no_match.matcher.wildcard.as_deref(), Some("*"));
        assert_eq!(no_match.attrs, Attrs::method("PATCH"));
        assert_eq!(no_match.matcher.registered, vec!["GET"]);
    }
}
