//! Configuration schema definitions.
//!
//! This module defines the route table file format.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration: the route table plus ambient settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Route definitions, registered in file order.
    pub routes: Vec<RouteConfig>,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Hot reload settings.
    pub reload: ReloadConfig,
}

/// A single route mapping a path pattern to a handler name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/:id` or `/static/`.
    pub path: String,

    /// Name of the handler the embedding application dispatches to.
    pub handler: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Console,
    /// JSON structured logging.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Console,
        }
    }
}

/// Route file hot reload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Watch the route file and swap in rebuilt routers.
    pub enabled: bool,

    /// Poll interval for the file watcher in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, LogFormat::Console);
        assert!(!config.reload.enabled);
        assert_eq!(config.reload.poll_interval_secs, 2);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            path = "/users/:id"
            handler = "show_user"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.routes,
            vec![RouteConfig {
                path: "/users/:id".into(),
                handler: "show_user".into(),
            }]
        );
        assert_eq!(config.observability.log_format, LogFormat::Json);
        // Unset fields keep their defaults.
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_route_requires_handler() {
        let parsed: Result<RouterConfig, _> = toml::from_str(
            r#"
            [[routes]]
            path = "/a"
            "#,
        );
        assert!(parsed.is_err());
    }
}
