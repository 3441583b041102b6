//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern parses
//! - Detect conflicting routes before the router is built
//! - Validate value ranges (poll interval > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Two routes conflict when their marker paths are equal, so
//!   `/a/:id` and `/a/:name` are reported together

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{Pattern, RouteError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Route pattern does not parse.
    #[error("routes[{index}]: {source}")]
    InvalidRoute { index: usize, source: RouteError },

    /// Route without a handler name.
    #[error("routes[{index}]: handler name is empty")]
    EmptyHandler { index: usize },

    /// Two routes resolve to the same marker path.
    #[error("routes[{index}]: {path:?} conflicts with routes[{first}]")]
    Conflict {
        index: usize,
        first: usize,
        path: String,
    },

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("reload poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        }

        match Pattern::parse(&route.path) {
            Ok(pattern) => {
                if let Some(&first) = seen.get(pattern.path()) {
                    errors.push(ValidationError::Conflict {
                        index,
                        first,
                        path: route.path.clone(),
                    });
                } else {
                    seen.insert(pattern.path().to_string(), index);
                }
            }
            Err(source) => errors.push(ValidationError::InvalidRoute { index, source }),
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.reload.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
