//! Segment trie node
//!
//! A `PathMap` stores exact-text children and an ordered list of capture
//! patterns side by side. Lookup checks the exact table first, then the
//! patterns in registration order; the first full match wins.

use std::collections::HashMap;

use crate::error::Result;
use crate::route::pattern::{classify_token, SegmentPattern, SegmentToken};

/// Lookup miss inside a single trie node
///
/// Not a [`crate::Error`]; routers turn it into a no-match failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no entry matches segment {segment:?}")]
pub struct SegmentLookupError {
    pub segment: String,
}

/// One level of the segment trie
///
/// # Examples
///
/// ```
/// use route_graph::path::PathMap;
///
/// let mut map = PathMap::new();
/// map.set("hello", 1).unwrap();
/// map.set("{greeting}", 2).unwrap();
///
/// assert_eq!(map.get("hello").unwrap().0, &1);
/// let (value, capture) = map.get("howdy").unwrap();
/// assert_eq!(value, &2);
/// assert_eq!(capture.unwrap().name(), "greeting");
/// ```
#[derive(Debug)]
pub struct PathMap<V> {
    literals: HashMap<String, V>,
    patterns: Vec<(SegmentPattern, V)>,
}

impl<V> Default for PathMap<V> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            patterns: Vec::new(),
        }
    }
}

impl<V> PathMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under a registration token
    ///
    /// Literal tokens overwrite any previous value with the same text.
    /// Capture tokens (`{...}`) are parsed and appended to the pattern list.
    pub fn set(&mut self, token: &str, value: V) -> Result<()> {
        match classify_token(token)? {
            SegmentToken::Literal(text) => {
                self.literals.insert(text.to_string(), value);
            }
            SegmentToken::Capture(pattern) => self.patterns.push((pattern, value)),
        }
        Ok(())
    }

    /// Looks up a request segment
    ///
    /// Returns the value and, for pattern hits, the capture that matched.
    /// An exact literal hit always beats a pattern, whatever the
    /// registration order.
    pub fn get(&self, segment: &str) -> Result<(&V, Option<&SegmentPattern>), SegmentLookupError> {
        if let Some(value) = self.literals.get(segment) {
            return Ok((value, None));
        }

        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(segment))
            .map(|(pattern, value)| (value, Some(pattern)))
            .ok_or_else(|| SegmentLookupError {
                segment: segment.to_string(),
            })
    }

    /// Exact-text lookup only, patterns are not consulted
    pub fn get_literal(&self, text: &str) -> Option<&V> {
        self.literals.get(text)
    }

    /// Returns the slot for an already-parsed token, creating it if absent
    ///
    /// A capture token reuses an existing pattern entry parsed from the same
    /// token text, so repeated registrations share one subtree.
    pub fn slot_mut(&mut self, token: SegmentToken<'_>) -> &mut V
    where
        V: Default,
    {
        match token {
            SegmentToken::Literal(text) => self.literals.entry(text.to_string()).or_default(),
            SegmentToken::Capture(pattern) => {
                let index = match self.patterns.iter().position(|(p, _)| *p == pattern) {
                    Some(index) => index,
                    None => {
                        self.patterns.push((pattern, V::default()));
                        self.patterns.len() - 1
                    }
                };
                &mut self.patterns[index].1
            }
        }
    }

    /// Every entry as `(token, value)`: literals first, then patterns in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.literals
            .iter()
            .map(|(text, value)| (text.as_str(), value))
            .chain(self.patterns.iter().map(|(pattern, value)| (pattern.token(), value)))
    }

    /// Literal keys, in no particular order
    pub fn literal_keys(&self) -> impl Iterator<Item = &str> {
        self.literals.keys().map(String::as_str)
    }

    /// Capture patterns, in registration order
    pub fn patterns(&self) -> impl Iterator<Item = &SegmentPattern> {
        self.patterns.iter().map(|(pattern, _)| pattern)
    }

    pub fn len(&self) -> usize {
        self.literals.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
