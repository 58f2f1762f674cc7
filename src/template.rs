//! # Template Resolution
//!
//! Maps a template identifier to the repository it is cloned from. The
//! lookup table starts with the built-in entries and is extended (or
//! overridden) by the `templates:` section of the configuration file.
//! Identifiers missing from the table fall back to the configured
//! `url_pattern`, if there is one.
//!
//! The reserved identifier `default` never resolves to a URL: it selects the
//! framework's own project generator instead.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::defaults;
use crate::error::{Error, Result};

/// Placeholder replaced by the template identifier in a URL pattern.
pub const PATTERN_PLACEHOLDER: &str = "{template}";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());

// scp-like syntax git accepts: user@host:path
static SCP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+:[\w./~-]+$").unwrap());

/// What a template identifier selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Hand the project over to `vue create`.
    Default,
    /// Clone a remote repository.
    Remote { name: String, url: String },
}

impl Template {
    pub fn name(&self) -> &str {
        match self {
            Template::Default => defaults::DEFAULT_TEMPLATE,
            Template::Remote { name, .. } => name,
        }
    }
}

/// The template table plus the optional URL pattern.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    table: BTreeMap<String, String>,
    pattern: Option<String>,
}

impl TemplateRegistry {
    /// Registry holding only the built-in templates.
    pub fn builtin() -> Self {
        let table = defaults::BUILTIN_TEMPLATES
            .iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect();

        Self {
            table,
            pattern: None,
        }
    }

    /// Built-in templates extended with those from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::builtin();
        for (name, url) in &config.templates {
            registry.table.insert(name.clone(), url.clone());
        }
        registry.pattern = config.url_pattern.clone();
        registry
    }

    /// Template identifiers in presentation order: `default` first, then the
    /// table in sorted order.
    pub fn names(&self) -> Vec<String> {
        std::iter::once(defaults::DEFAULT_TEMPLATE.to_string())
            .chain(self.table.keys().cloned())
            .collect()
    }

    /// Table entries, sorted by identifier.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The configured URL pattern, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Resolve `name` to its clone URL.
    pub fn resolve(&self, name: &str) -> Result<String> {
        if let Some(url) = self.table.get(name) {
            return Ok(url.clone());
        }

        match &self.pattern {
            Some(pattern) if is_valid_name(name) => Ok(expand_pattern(pattern, name)),
            _ => Err(Error::UnknownTemplate {
                template: name.to_string(),
                available: self.names(),
            }),
        }
    }

    /// Look up what `name` selects.
    pub fn lookup(&self, name: &str) -> Result<Template> {
        if name == defaults::DEFAULT_TEMPLATE {
            return Ok(Template::Default);
        }

        let url = self.resolve(name)?;
        Ok(Template::Remote {
            name: name.to_string(),
            url,
        })
    }
}

/// Substitute `name` into `pattern`.
pub fn expand_pattern(pattern: &str, name: &str) -> String {
    pattern.replace(PATTERN_PLACEHOLDER, name)
}

/// Whether `name` is usable as a template identifier.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Whether `url` is something `git clone` can fetch from.
pub fn is_valid_clone_url(url: &str) -> bool {
    if SCP_RE.is_match(url) {
        return true;
    }

    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https" | "ssh" | "git" | "file")
                && (parsed.scheme() == "file" || parsed.host_str().is_some())
        }
        Err(_) => false,
    }
}
