// File: src/config.rs
// Purpose: Router settings and declarative route tables from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Attribute names the built-in routers read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Attribute holding the request path (default: "path")
    #[serde(default = "default_path_key")]
    pub path_key: String,

    /// Attribute holding the request method (default: "method")
    #[serde(default = "default_method_key")]
    pub method_key: String,

    /// Method key that answers every method (default: "*")
    #[serde(default = "default_method_wildcard")]
    pub method_wildcard: String,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,

    /// Omitted means the wildcard method
    #[serde(default)]
    pub method: Option<String>,

    /// Name looked up in the caller's handler registry
    pub handler: String,
}

/// A route table file
///
/// ```toml
/// [router]
/// path_key = "path"
///
/// [[routes]]
/// path = "/articles/{category}/{id:[0-9]+}"
/// method = "GET"
/// handler = "article"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableConfig {
    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

// Default values
fn default_path_key() -> String {
    "path".to_string()
}

fn default_method_key() -> String {
    "method".to_string()
}

fn default_method_wildcard() -> String {
    "*".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            path_key: default_path_key(),
            method_key: default_method_key(),
            method_wildcard: default_method_wildcard(),
        }
    }
}

impl RouteConfig {
    /// The method to register under, falling back to the configured wildcard
    pub fn method_or<'a>(&'a self, wildcard: &'a str) -> &'a str {
        self.method.as_deref().unwrap_or(wildcard)
    }
}

impl RouteTableConfig {
    /// Load a route table from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return an empty table
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route table: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse route table: {:?}", path))
    }

    /// Parse a route table from TOML text; blank text is an empty table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let table: RouteTableConfig = toml::from_str(content)?;
        Ok(table)
    }
}
