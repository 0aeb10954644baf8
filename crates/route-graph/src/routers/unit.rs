//! A matcher with exactly one registration

use crate::attrs::Attrs;
use crate::error::{ErrorKind, MatcherInfo, Result};
use crate::matcher::{MatchInfo, Matcher, Node};

/// Always resolves to its single node, whatever the attributes
///
/// `connect` replaces the node and ignores attributes. The router itself
/// never fails; its error kind only labels failures built through
/// [`Matcher::no_match`] by code wrapping it.
pub struct UnitRouter<H> {
    node: Node<H>,
    error_kind: ErrorKind,
}

impl<H> UnitRouter<H> {
    pub fn new(node: impl Into<Node<H>>) -> Self {
        Self {
            node: node.into(),
            error_kind: ErrorKind::default(),
        }
    }

    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = kind;
        self
    }

    pub fn node(&self) -> &Node<H> {
        &self.node
    }
}

impl<H> Matcher<H> for UnitRouter<H> {
    fn connect(&mut self, node: Node<H>, _attrs: &Attrs) -> Result<()> {
        self.node = node;
        Ok(())
    }

    fn resolve<'r>(
        &'r self,
        match_info: MatchInfo,
        _attrs: &Attrs,
    ) -> Result<(&'r Node<H>, MatchInfo)> {
        Ok((&self.node, match_info))
    }

    fn name(&self) -> &'static str {
        "UnitRouter"
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo::new(self.name())
    }

    fn error_kind(&self) -> &ErrorKind {
        &self.error_kind
    }
}
