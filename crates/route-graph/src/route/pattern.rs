/// Registration-token grammar for path segments
///
/// Pure functional parsing of route tokens into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// One or more non-slash characters, anchored
static DEFAULT_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[^/]+)$").expect("default segment pattern compiles"));

/// A parsed token: either literal text or a capture
///
/// # Examples
///
/// ```
/// use route_graph::route::pattern::{classify_token, SegmentToken};
///
/// let seg = classify_token("about").unwrap();
/// assert!(matches!(seg, SegmentToken::Literal("about")));
///
/// let seg = classify_token("{id:[0-9]+}").unwrap();
/// assert!(matches!(seg, SegmentToken::Capture(ref p) if p.name() == "id"));
///
/// let seg = classify_token("{*rest}").unwrap();
/// assert!(matches!(seg, SegmentToken::Capture(ref p) if p.is_glob()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentToken<'a> {
    Literal(&'a str),
    Capture(SegmentPattern),
}

/// Returns true for tokens that must be parsed as a capture
pub fn is_capture_token(token: &str) -> bool {
    token.starts_with('{')
}

/// Classifies a token into literal text or a capture (pure function)
///
/// # Parsing Rules
///
/// 1. **Literal**: anything not starting with `{`
/// 2. **Glob**: `{*name}`
/// 3. **Constrained**: `{name:pattern}` (split on the first `:` only)
/// 4. **Named**: `{name}`, pattern defaults to one or more non-slash characters
pub fn classify_token(token: &str) -> Result<SegmentToken<'_>> {
    if is_capture_token(token) {
        SegmentPattern::parse(token).map(SegmentToken::Capture)
    } else {
        Ok(SegmentToken::Literal(token))
    }
}

/// A compiled capture descriptor parsed from `{name}`, `{name:pattern}` or `{*name}`
#[derive(Clone)]
pub struct SegmentPattern {
    token: String,
    name: String,
    regex: Regex,
    glob: bool,
}

impl SegmentPattern {
    /// Parses a capture token
    ///
    /// The pattern is compiled as a full-segment anchor, so `{name:fred}`
    /// matches `fred` but not `freddie`.
    ///
    /// ```
    /// use route_graph::route::pattern::SegmentPattern;
    ///
    /// let pattern = SegmentPattern::parse("{command:(?:he)(?:lp|llo)}").unwrap();
    /// assert_eq!(pattern.name(), "command");
    /// assert_eq!(pattern.pattern(), Some("(?:he)(?:lp|llo)"));
    /// assert!(pattern.is_match("hello"));
    /// assert!(!pattern.is_match("helpme"));
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedToken {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let inner = token
            .strip_prefix('{')
            .ok_or_else(|| malformed("capture tokens start with '{'"))?
            .strip_suffix('}')
            .ok_or_else(|| malformed("capture tokens end with '}'"))?;

        let (glob, inner) = match inner.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };

        let (name, pattern) = match inner.split_once(':') {
            Some((name, pattern)) => (name, Some(pattern)),
            None => (inner, None),
        };

        if name.is_empty() {
            return Err(malformed("capture name is empty"));
        }

        let regex = match pattern {
            Some(pattern) => {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::InvalidPattern {
                    token: token.to_string(),
                    source,
                })?
            }
            None => DEFAULT_SEGMENT.clone(),
        };

        Ok(Self {
            token: token.to_string(),
            name: name.to_string(),
            regex,
            glob,
        })
    }

    /// The capture key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token this pattern was parsed from
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The user-supplied pattern, `None` when the default applies
    pub fn pattern(&self) -> Option<&str> {
        self.token
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .and_then(|inner| inner.split_once(':'))
            .map(|(_, pattern)| pattern)
    }

    /// Whether this capture consumes the rest of the path
    pub fn is_glob(&self) -> bool {
        self.glob
    }

    /// Anchored match against a single segment
    pub fn is_match(&self, segment: &str) -> bool {
        self.regex.is_match(segment)
    }
}

impl PartialEq for SegmentPattern {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for SegmentPattern {}

impl fmt::Debug for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentPattern")
            .field("name", &self.name)
            .field("pattern", &self.regex.as_str())
            .field("glob", &self.glob)
            .finish()
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
