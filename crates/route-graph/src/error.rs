//! Error taxonomy shared by every matcher
//!
//! Matching fails in exactly two ways: a caller forgot a required attribute
//! ([`Error::MissingArgument`]) or nothing registered satisfies the request
//! ([`Error::NoMatch`]). The remaining variants are build-time rejections
//! raised by `connect`.

use std::fmt;

use crate::attrs::Attrs;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required attribute was absent from the call. Always a caller bug.
    #[error("expected attribute {expected:?} but received {received:?}")]
    MissingArgument {
        expected: String,
        received: Vec<String>,
    },

    /// No registered route satisfies the supplied attributes
    #[error("{0}")]
    NoMatch(Box<NoMatch>),

    /// The route cannot be registered as written
    #[error("invalid route {path:?}: {reason}")]
    InvalidRoute { path: String, reason: String },

    /// A `{...}` capture token is not well formed
    #[error("malformed segment token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },

    /// A `{name:pattern}` token carries a pattern that does not compile
    #[error("invalid pattern in segment token {token:?}")]
    InvalidPattern {
        token: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch(_))
    }

    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Error::MissingArgument { .. })
    }

    /// Returns the no-match payload, if this is a no-match failure
    pub fn as_no_match(&self) -> Option<&NoMatch> {
        match self {
            Error::NoMatch(no_match) => Some(no_match),
            _ => None,
        }
    }
}

impl From<NoMatch> for Error {
    fn from(no_match: NoMatch) -> Self {
        Error::NoMatch(Box::new(no_match))
    }
}

/// How a matcher labels the no-match failures it manufactures
///
/// Injected at construction (`with_error_kind`) so integration code can ask
/// one matcher to fail as "not found" and another as "method not allowed"
/// without the core knowing anything about HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    NoMatch,
    NotFound,
    MethodNotAllowed,
    Custom(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NoMatch => f.write_str("no match"),
            ErrorKind::NotFound => f.write_str("not found"),
            ErrorKind::MethodNotAllowed => f.write_str("method not allowed"),
            ErrorKind::Custom(label) => f.write_str(label),
        }
    }
}

/// Snapshot of the matcher instance that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherInfo {
    /// Matcher type name, e.g. `"PathRouter"`
    pub name: &'static str,
    /// The attribute this matcher dispatches on, if any
    pub key: Option<String>,
    /// The wildcard key, for matchers that have one
    pub wildcard: Option<String>,
    /// Keys registered on this matcher, sorted (empty for path routers)
    pub registered: Vec<String>,
}

impl MatcherInfo {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            wildcard: None,
            registered: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = Some(wildcard.into());
        self
    }

    pub fn with_registered<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registered = keys.into_iter().map(Into::into).collect();
        self.registered.sort();
        self
    }
}

/// Payload of a no-match failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatch {
    pub kind: ErrorKind,
    pub matcher: MatcherInfo,
    /// Attributes in play at the failure site
    pub attrs: Attrs,
    pub reason: String,
}

impl NoMatch {
    pub fn new(
        kind: ErrorKind,
        matcher: MatcherInfo,
        attrs: &Attrs,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            matcher,
            attrs: attrs.clone(),
            reason: reason.into(),
        }
    }

    /// The value of the attribute the failing matcher dispatches on
    pub fn attempted(&self) -> Option<&str> {
        self.matcher
            .key
            .as_deref()
            .and_then(|key| self.attrs.get(key))
    }
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} for {}",
            self.kind, self.matcher.name, self.reason, self.attrs
        )
    }
}
