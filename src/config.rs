// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional comma-separated list.
///
/// Entries are trimmed and empty entries dropped. A missing variable, or one
/// with no entries left, yields `None`.
macro_rules! optional_env_list {
    // ---
    ($key:literal) => {
        std::env::var($key).ok().and_then(|raw| {
            let items: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
            (!items.is_empty()).then_some(items)
        })
    };
}

/// Reads an optional comma-separated list of name patterns.
///
/// Same as [`optional_env_list!`] except that a comma inside a `/.../` entry
/// belongs to the regex, so `/^http_.{1,3}/` stays a single entry.
macro_rules! optional_env_patterns {
    // ---
    ($key:literal) => {
        std::env::var($key).ok().and_then(|raw| {
            let items = split_pattern_list(&raw);
            (!items.is_empty()).then_some(items)
        })
    };
}

/// Split `raw` on commas that are outside `/.../` delimiters.
///
/// An entry is a regex when its first non-blank character is `/`; it runs to
/// the next unescaped `/`. Entries are trimmed and empty ones dropped.
fn split_pattern_list(raw: &str) -> Vec<String> {
    // ---
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_regex = false;
    let mut escaped = false;

    for ch in raw.chars() {
        if in_regex {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '/' {
                in_regex = false;
            }
            continue;
        }
        match ch {
            ',' => items.push(std::mem::take(&mut current)),
            '/' if current.trim().is_empty() => {
                in_regex = true;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    items.push(current);

    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
/// Removes every variable this module reads so each test starts clean.
macro_rules! clear_config_env {
    // ---
    () => {
        for key in [
            "PROM_BUNDLE_WHITELIST",
            "PROM_BUNDLE_BLACKLIST",
            "PROM_BUNDLE_ROUTES_TO_DETAIL",
            "AXUM_METRICS_TYPE",
            "API_BIND_ADDR",
        ] {
            std::env::remove_var(key);
        }
    };
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// All configuration is validated eagerly during initialization.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub metrics: metrics::MetricsConfig,
    pub server: server::ServerConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any pattern fails to parse or the metrics backend
    /// is unknown. This function is intended to be called exactly once at
    /// startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            metrics: metrics::MetricsConfig::from_env()?,
            server: server::ServerConfig::from_env(),
        })
    }
}

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;
    use crate::bundle::BundleConfig;
    use crate::domain::{FilterConfig, NamePattern};

    /// Which registry implementation backs the bundle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        Prometheus,
        Noop,
    }

    impl std::str::FromStr for MetricsBackend {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim() {
                "prom" | "prometheus" => Ok(MetricsBackend::Prometheus),
                "noop" => Ok(MetricsBackend::Noop),
                other => Err(anyhow::anyhow!(
                    "Invalid AXUM_METRICS_TYPE {other:?}: expected \"prom\" or \"noop\""
                )),
            }
        }
    }

    /// Metrics bundle configuration derived from environment variables.
    ///
    /// Whitelist and blacklist are parsed independently; having both is
    /// reported when the bundle is built, not here.
    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        /// Registry backend (`AXUM_METRICS_TYPE`). Defaults to Prometheus.
        pub backend: MetricsBackend,

        /// Filter and long-duration options handed to the bundle.
        pub bundle: BundleConfig,
    }

    impl MetricsConfig {
        /// Builds a [`MetricsConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if a `/regex/` entry fails to compile or the
        /// backend name is unknown.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend = match std::env::var("AXUM_METRICS_TYPE") {
                Ok(raw) => raw.parse()?,
                Err(_) => MetricsBackend::Prometheus,
            };

            let whitelist = parse_patterns(optional_env_patterns!("PROM_BUNDLE_WHITELIST"))?;
            let blacklist = parse_patterns(optional_env_patterns!("PROM_BUNDLE_BLACKLIST"))?;
            let routes_to_detail = optional_env_list!("PROM_BUNDLE_ROUTES_TO_DETAIL");

            Ok(Self {
                backend,
                bundle: BundleConfig {
                    filter: FilterConfig {
                        whitelist,
                        blacklist,
                    },
                    routes_to_detail,
                },
            })
        }
    }

    fn parse_patterns(raw: Option<Vec<String>>) -> Result<Option<Vec<NamePattern>>> {
        // ---
        let Some(raw) = raw else {
            return Ok(None);
        };
        let patterns = raw
            .iter()
            .map(|entry| NamePattern::parse(entry))
            .collect::<crate::error::Result<Vec<_>>>()?;
        Ok(Some(patterns))
    }
}
pub use metrics::{MetricsBackend, MetricsConfig};

// ============================================================
// Server configuration
// ============================================================

mod server {
    /// HTTP listener configuration for the demo binary.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Address to bind. Defaults to `127.0.0.1:8080`.
        pub bind_addr: String,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            // ---
            Self {
                bind_addr: optional_env_parse!("API_BIND_ADDR", String, "127.0.0.1:8080".to_string()),
            }
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Tests
// ============================================================
