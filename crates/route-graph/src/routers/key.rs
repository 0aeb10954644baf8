//! Flat dispatch on a single attribute
//!
//! Used directly for message/command dispatch (`command=subscribe`), and as
//! the engine behind [`crate::MethodRouter`].

use std::collections::HashMap;

use tracing::debug;

use crate::attrs::Attrs;
use crate::error::{ErrorKind, MatcherInfo, Result};
use crate::matcher::{MatchInfo, Matcher, Node};

/// Dispatches on the exact value of one designated attribute
///
/// When a wildcard key is configured and something is registered under it,
/// that registration answers every request, whatever the attribute's value.
///
/// # Examples
///
/// ```
/// use route_graph::{Attrs, KeyRouter, Matcher};
///
/// let mut router: KeyRouter<&str> = KeyRouter::new("command");
/// router.add("subscribe", "do_subscribe").unwrap();
/// router.add("publish", "do_publish").unwrap();
///
/// let m = router.match_route(&Attrs::new().with("command", "publish")).unwrap();
/// assert_eq!(*m.target, "do_publish");
///
/// let err = router.match_route(&Attrs::new().with("command", "ping")).unwrap_err();
/// assert_eq!(err.as_no_match().unwrap().matcher.registered, vec!["publish", "subscribe"]);
/// ```
pub struct KeyRouter<H> {
    name: &'static str,
    key: String,
    wildcard: Option<String>,
    map: HashMap<String, Node<H>>,
    error_kind: ErrorKind,
}

impl<H> KeyRouter<H> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            name: "KeyRouter",
            key: key.into(),
            wildcard: None,
            map: HashMap::new(),
            error_kind: ErrorKind::default(),
        }
    }

    /// Sets the key whose registration pre-empts every other key
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = Some(wildcard.into());
        self
    }

    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = kind;
        self
    }

    /// Renames the matcher in diagnostics
    pub(crate) fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn contains(&self, value: &str) -> bool {
        self.map.contains_key(value)
    }

    /// Registers `node` under `value`, building the attribute bag for you
    pub fn add(&mut self, value: &str, node: impl Into<Node<H>>) -> Result<()> {
        let attrs = Attrs::new().with(self.key.clone(), value);
        self.connect(node.into(), &attrs)
    }

    fn wildcard_node(&self) -> Option<&Node<H>> {
        self.wildcard.as_ref().and_then(|wildcard| self.map.get(wildcard))
    }
}

impl<H> Matcher<H> for KeyRouter<H> {
    fn connect(&mut self, node: Node<H>, attrs: &Attrs) -> Result<()> {
        let value = attrs.require(&self.key)?;
        debug!(matcher = self.name, key = %self.key, value, "registering handler");
        self.map.insert(value.to_string(), node);
        Ok(())
    }

    fn resolve<'r>(
        &'r self,
        match_info: MatchInfo,
        attrs: &Attrs,
    ) -> Result<(&'r Node<H>, MatchInfo)> {
        let value = attrs.require(&self.key)?;

        if let Some(node) = self.wildcard_node() {
            return Ok((node, match_info));
        }

        match self.map.get(value) {
            Some(node) => Ok((node, match_info)),
            None => Err(self.no_match(
                attrs,
                format!("no handler registered for {}={value:?}", self.key),
            )),
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn info(&self) -> MatcherInfo {
        let info = MatcherInfo::new(self.name)
            .with_key(self.key.clone())
            .with_registered(self.keys());
        match &self.wildcard {
            Some(wildcard) => info.with_wildcard(wildcard.clone()),
            None => info,
        }
    }

    fn error_kind(&self) -> &ErrorKind {
        &self.error_kind
    }
}
