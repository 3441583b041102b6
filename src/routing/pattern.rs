//! Route pattern parsing.
//!
//! Turns a route such as `/users/:id/posts` into the marker path the trie
//! stores (`/users/:/posts`) plus the ordered parameter names (`["id"]`).
//! A route ending in `/` is a catch-all for everything below it.

use crate::routing::node::{PARAM_MARKER, SEPARATOR};
use crate::routing::RouteError;

/// A parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    path: String,
    params: Vec<String>,
}

impl Pattern {
    /// Parse a route string, `:name` segments declaring parameters.
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        if !route.starts_with(SEPARATOR) {
            return Err(RouteError::MissingLeadingSlash {
                route: route.to_string(),
            });
        }

        let mut path = String::with_capacity(route.len());
        let mut params: Vec<String> = Vec::new();

        for (i, segment) in route.split(SEPARATOR).enumerate() {
            if i > 0 {
                path.push(SEPARATOR);
            }
            let Some(name) = segment.strip_prefix(PARAM_MARKER) else {
                if segment.contains(PARAM_MARKER) {
                    return Err(RouteError::MarkerInsideSegment {
                        route: route.to_string(),
                    });
                }
                path.push_str(segment);
                continue;
            };

            check_name(route, name, &params)?;
            params.push(name.to_string());
            path.push_str(PARAM_MARKER);
        }

        Ok(Self {
            source: route.to_string(),
            path,
            params,
        })
    }

    /// Build from an already split marker path and its parameter names.
    pub fn from_parts(path: impl Into<String>, params: Vec<String>) -> Result<Self, RouteError> {
        let path = path.into();
        if !path.starts_with(SEPARATOR) {
            return Err(RouteError::MissingLeadingSlash { route: path });
        }

        let mut markers = 0;
        for segment in path.split(SEPARATOR) {
            if segment == PARAM_MARKER {
                markers += 1;
            } else if segment.contains(PARAM_MARKER) {
                return Err(RouteError::MarkerInsideSegment {
                    route: path.clone(),
                });
            }
        }
        if markers != params.len() {
            return Err(RouteError::ParamCountMismatch {
                route: path,
                markers,
                names: params.len(),
            });
        }
        for (i, name) in params.iter().enumerate() {
            check_name(&path, name, &params[..i])?;
        }

        Ok(Self {
            source: path.clone(),
            path,
            params,
        })
    }

    /// The route as written by the caller.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path with each parameter replaced by the marker.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// True when the route catches everything below its last separator.
    pub fn is_wildcard(&self) -> bool {
        self.path.ends_with(SEPARATOR)
    }

    /// Prefixes that must exist as nodes before the full path is inserted:
    /// for every marker, the path up to it and the path including it. This
    /// keeps each marker in a node of its own.
    pub(crate) fn marker_prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.path
            .match_indices(PARAM_MARKER)
            .flat_map(move |(i, _)| [&self.path[..i], &self.path[..=i]])
    }

    pub(crate) fn into_parts(self) -> (String, String, Vec<String>) {
        (self.source, self.path, self.params)
    }
}

fn check_name(route: &str, name: &str, seen: &[String]) -> Result<(), RouteError> {
    if name.is_empty() {
        return Err(RouteError::EmptyParamName {
            route: route.to_string(),
        });
    }
    if name.contains(PARAM_MARKER) {
        return Err(RouteError::MarkerInsideSegment {
            route: route.to_string(),
        });
    }
    if seen.iter().any(|p| p == name) {
        return Err(RouteError::DuplicateParam {
            route: route.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}
