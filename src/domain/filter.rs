//! Metric name selection.
//!
//! Decides which catalog entries become active from an optional whitelist or
//! blacklist. Patterns are classified once, when the configuration is parsed,
//! into exact names or regular expressions.

use crate::error::{BundleError, Result};
use regex::{Regex, RegexBuilder};

/// One whitelist/blacklist entry.
#[derive(Debug, Clone)]
pub enum NamePattern {
    ExactMatch(String),
    PatternMatch(Regex),
}

impl NamePattern {
    // ---

    pub fn exact(name: impl Into<String>) -> Self {
        NamePattern::ExactMatch(name.into())
    }

    /// Compile `pattern` as an unanchored regular expression.
    pub fn regex(pattern: &str) -> Result<Self> {
        // ---
        Regex::new(pattern)
            .map(NamePattern::PatternMatch)
            .map_err(|source| BundleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Parse a configuration entry.
    ///
    /// `/body/` and `/body/i` are regular expressions, everything else is an
    /// exact metric name.
    pub fn parse(raw: &str) -> Result<Self> {
        // ---
        let raw = raw.trim();
        let Some(rest) = raw.strip_prefix('/') else {
            return Ok(Self::exact(raw));
        };

        let (body, case_insensitive) = if let Some(body) = rest.strip_suffix("/i") {
            (body, true)
        } else if let Some(body) = rest.strip_suffix('/') {
            (body, false)
        } else {
            // A lone leading slash is just part of a name.
            return Ok(Self::exact(raw));
        };

        RegexBuilder::new(body)
            .case_insensitive(case_insensitive)
            .build()
            .map(NamePattern::PatternMatch)
            .map_err(|source| BundleError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })
    }

    pub fn matches(&self, name: &str) -> bool {
        // ---
        match self {
            NamePattern::ExactMatch(exact) => exact == name,
            NamePattern::PatternMatch(re) => re.is_match(name),
        }
    }
}

/// Whitelist / blacklist options. At most one of the two may be set.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub whitelist: Option<Vec<NamePattern>>,
    pub blacklist: Option<Vec<NamePattern>>,
}

impl FilterConfig {
    // ---

    pub fn whitelist(patterns: Vec<NamePattern>) -> Self {
        FilterConfig {
            whitelist: Some(patterns),
            blacklist: None,
        }
    }

    pub fn blacklist(patterns: Vec<NamePattern>) -> Self {
        FilterConfig {
            whitelist: None,
            blacklist: Some(patterns),
        }
    }

    /// Fails if both lists are present.
    pub fn validate(&self) -> Result<()> {
        // ---
        if self.whitelist.is_some() && self.blacklist.is_some() {
            return Err(BundleError::Configuration(
                "whitelist and blacklist are mutually exclusive options".to_string(),
            ));
        }
        Ok(())
    }
}

fn matches_any(patterns: &[NamePattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Select the active names out of `all_names`, keeping their original order.
///
/// # Errors
/// Returns [`BundleError::Configuration`] if both a whitelist and a blacklist
/// are configured.
pub fn select_metric_names<'a>(all_names: &[&'a str], config: &FilterConfig) -> Result<Vec<&'a str>> {
    // ---
    config.validate()?;

    let selected = match (&config.whitelist, &config.blacklist) {
        (Some(whitelist), _) => all_names
            .iter()
            .copied()
            .filter(|name| matches_any(whitelist, name))
            .collect(),
        (None, Some(blacklist)) => all_names
            .iter()
            .copied()
            .filter(|name| !matches_any(blacklist, name))
            .collect(),
        (None, None) => all_names.to_vec(),
    };

    Ok(selected)
}
