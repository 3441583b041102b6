//! Route registration and lookup.
//!
//! # Responsibilities
//! - Register routes into the trie (build phase)
//! - Run the priority pass once and freeze the trie
//! - Look up request paths and expose captured parameters by name
//!
//! # Design Decisions
//! - `RouterBuilder` is the only mutable form; `Router` has no way to add
//!   routes, so a built router is safe to share without locks
//! - Duplicate routes are returned as errors; the caller decides whether
//!   that aborts startup
//! - Explicit `None` on no match rather than a silent default

use std::fmt;

use crate::config::RouteConfig;
use crate::observability::metrics;
use crate::routing::pattern::Pattern;
use crate::routing::tree::Tree;
use crate::routing::RouteError;

/// Name under which a wildcard remainder is exposed.
pub const WILDCARD_PARAM: &str = "*";

/// Collects routes before the router is frozen.
#[derive(Debug, Clone)]
pub struct RouterBuilder<H> {
    tree: Tree<H>,
    routes: usize,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self {
            tree: Tree::new(),
            routes: 0,
        }
    }
}

impl<H> RouterBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a route such as `/users/:id`.
    pub fn route(&mut self, route: &str, handler: H) -> Result<&mut Self, RouteError> {
        let pattern = Pattern::parse(route)?;
        self.register(pattern, handler)?;
        Ok(self)
    }

    /// Register an already parsed pattern.
    ///
    /// Fails if a handler is already registered for the same marker path,
    /// e.g. `/users/:id` after `/users/:name`.
    pub fn register(&mut self, pattern: Pattern, handler: H) -> Result<(), RouteError> {
        for prefix in pattern.marker_prefixes() {
            self.tree.insert(prefix, Vec::new(), None)?;
        }

        let (source, path, params) = pattern.into_parts();
        tracing::debug!(route = %source, path = %path, params = ?params, "Registering route");

        match self.tree.insert(&path, params, Some(handler)) {
            Ok(()) => {
                self.routes += 1;
                metrics::record_route_registered();
                Ok(())
            }
            Err(RouteError::Duplicate { .. }) => {
                tracing::warn!(route = %source, "Duplicate route rejected");
                Err(RouteError::Duplicate { route: source })
            }
            Err(e) => Err(e),
        }
    }

    /// Number of routes registered so far.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Order siblings by priority and freeze the trie.
    pub fn build(mut self) -> Router<H> {
        self.tree.prioritize();
        tracing::info!(
            routes = self.routes,
            nodes = self.tree.node_count(),
            "Router built"
        );
        Router {
            tree: self.tree,
            routes: self.routes,
        }
    }
}

/// An immutable, prioritized routing table.
#[derive(Debug, Clone)]
pub struct Router<H> {
    tree: Tree<H>,
    routes: usize,
}

impl<H> Router<H> {
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    /// Find the most specific route for `path`.
    pub fn at<'r, 'p>(&'r self, path: &'p str) -> Option<RouteMatch<'r, 'p, H>> {
        let Some(found) = self.tree.find(path) else {
            tracing::trace!(path, "No route matched");
            return None;
        };
        Some(RouteMatch {
            handler: found.handler,
            params: Params {
                names: found.node.params(),
                values: found.values,
                wildcard: found.wildcard,
            },
        })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// The underlying trie, for inspection.
    pub fn tree(&self) -> &Tree<H> {
        &self.tree
    }
}

impl Router<String> {
    /// Build a router whose handlers are the configured handler names.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, RouteError> {
        let mut builder = RouterBuilder::new();
        for route in routes {
            builder.route(&route.path, route.handler.clone())?;
        }
        Ok(builder.build())
    }
}

impl<H: fmt::Debug> fmt::Display for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

/// A matched route with its captured parameters.
#[derive(Debug)]
pub struct RouteMatch<'r, 'p, H> {
    /// Handler registered for the route.
    pub handler: &'r H,
    /// Captured path parameters.
    pub params: Params<'r, 'p>,
}

/// Parameter values captured during a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params<'r, 'p> {
    names: &'r [String],
    values: Vec<&'p str>,
    wildcard: bool,
}

impl<'r, 'p> Params<'r, 'p> {
    /// Values in declaration order, the wildcard remainder last.
    pub fn values(&self) -> &[&'p str] {
        &self.values
    }

    /// Value of a named parameter; `*` names the wildcard remainder.
    pub fn get(&self, name: &str) -> Option<&'p str> {
        if name == WILDCARD_PARAM {
            return self.wildcard();
        }
        let idx = self.names.iter().position(|n| n == name)?;
        self.values.get(idx).copied()
    }

    /// Remainder swallowed by a wildcard route, if one matched.
    pub fn wildcard(&self) -> Option<&'p str> {
        if self.wildcard {
            self.values.last().copied()
        } else {
            None
        }
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &'p str)> + '_ {
        let wildcard: Option<&'r str> = self.wildcard.then_some(WILDCARD_PARAM);
        self.names
            .iter()
            .map(String::as_str)
            .chain(wildcard)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(routes: &[(&str, &'static str)]) -> Router<&'static str> {
        let mut builder = Router::builder();
        for (route, handler) in routes {
            builder.route(route, *handler).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_param_capture() {
        let r = router(&[("/user/:id", "user")]);
        let m = r.at("/user/42").unwrap();
        assert_eq!(*m.handler, "user");
        assert_eq!(m.params.values(), &["42"]);
        assert_eq!(m.params.get("id"), Some("42"));
        assert_eq!(m.params.get("missing"), None);
        assert_eq!(m.params.wildcard(), None);
    }

    #[test]
    fn test_longer_literal_continuation_wins() {
        let r = router(&[("/user/:id/posts", "posts"), ("/user/:id", "user")]);
        let m = r.at("/user/42/posts").unwrap();
        assert_eq!(*m.handler, "posts");
        assert_eq!(m.params.values(), &["42"]);

        let m = r.at("/user/42").unwrap();
        assert_eq!(*m.handler, "user");
    }

    #[test]
    fn test_literal_beats_wildcard() {
        let r = router(&[("/static/", "files"), ("/static/logo.png", "logo")]);
        let m = r.at("/static/logo.png").unwrap();
        assert_eq!(*m.handler, "logo");
        assert!(m.params.is_empty());
        assert_eq!(*r.at("/static/").unwrap().handler, "files");
    }

    #[test]
    fn test_lone_wildcard_swallows_remainder() {
        let r = router(&[("/static/", "files")]);
        let m = r.at("/static/anything/here").unwrap();
        assert_eq!(*m.handler, "files");
        assert_eq!(m.params.values(), &["anything/here"]);
        assert_eq!(m.params.get(WILDCARD_PARAM), Some("anything/here"));
        let pairs: Vec<_> = m.params.iter().collect();
        assert_eq!(pairs, vec![("*", "anything/here")]);
    }

    #[test]
    fn test_shared_prefix_routes_are_independent() {
        let r = router(&[("/team", "team"), ("/teams", "teams")]);
        assert_eq!(*r.at("/team").unwrap().handler, "team");
        assert_eq!(*r.at("/teams").unwrap().handler, "teams");
        assert!(r.at("/teamsx").is_none());
        assert!(r.at("/tea").is_none());
    }

    #[test]
    fn test_duplicate_route_fails() {
        let mut builder = Router::builder();
        builder.route("/a/:id", 1).unwrap();
        let err = builder.route("/a/:name", 2).unwrap_err();
        assert_eq!(
            err,
            RouteError::Duplicate {
                route: "/a/:name".into()
            }
        );
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_wildcard_without_handler_defers_to_param_sibling() {
        // "x/" is an eligible wildcard but holds no handler, so the ":"
        // sibling of "/" gets its turn and its own wildcard catches.
        let r = router(&[("/x/:a/b/", "deep"), ("/:b/", "shallow")]);
        let m = r.at("/x/s/ab").unwrap();
        assert_eq!(*m.handler, "shallow");
        assert_eq!(m.params.values(), &["x", "s/ab"]);
        assert_eq!(m.params.get("b"), Some("x"));
        assert_eq!(m.params.get(WILDCARD_PARAM), Some("s/ab"));

        let m = r.at("/x/s/b/c").unwrap();
        assert_eq!(*m.handler, "deep");
        assert_eq!(m.params.values(), &["s", "c"]);
    }

    #[test]
    fn test_register_from_parts() {
        let mut builder = Router::builder();
        let pattern =
            Pattern::from_parts("/orgs/:/repos/:", vec!["org".into(), "repo".into()]).unwrap();
        builder.register(pattern, "repo").unwrap();
        let r = builder.build();
        let m = r.at("/orgs/rust-lang/repos/cargo").unwrap();
        assert_eq!(m.params.get("org"), Some("rust-lang"));
        assert_eq!(m.params.get("repo"), Some("cargo"));
    }

    #[test]
    fn test_root_route_is_not_a_catch_all() {
        let r = router(&[("/", "index"), ("/about", "about")]);
        assert_eq!(*r.at("/").unwrap().handler, "index");
        assert_eq!(*r.at("/about").unwrap().handler, "about");
        assert!(r.at("/missing").is_none());
    }

    #[test]
    fn test_root_level_wildcard_with_children_does_not_catch() {
        let r = router(&[("/static/", "files"), ("/static/logo.png", "logo")]);
        assert!(r.at("/static/other.css").is_none());
    }

    #[test]
    fn test_nested_wildcard_catches_under_root() {
        let r = router(&[
            ("/", "index"),
            ("/static/", "files"),
            ("/static/logo.png", "logo"),
        ]);
        let m = r.at("/static/css/site.css").unwrap();
        assert_eq!(*m.handler, "files");
        assert_eq!(m.params.wildcard(), Some("css/site.css"));
        assert_eq!(*r.at("/static/logo.png").unwrap().handler, "logo");
    }

    #[test]
    fn test_wildcard_after_param() {
        let r = router(&[("/", "index"), ("/files/:bucket/", "files")]);
        let m = r.at("/files/photos/2024/a.jpg").unwrap();
        assert_eq!(*m.handler, "files");
        assert_eq!(m.params.get("bucket"), Some("photos"));
        assert_eq!(m.params.get("*"), Some("2024/a.jpg"));
        assert_eq!(m.params.len(), 2);
    }

    #[test]
    fn test_literal_preferred_over_param() {
        let r = router(&[("/users/:id", "show"), ("/users/new", "new")]);
        assert_eq!(*r.at("/users/new").unwrap().handler, "new");
        let m = r.at("/users/7").unwrap();
        assert_eq!(*m.handler, "show");
        assert_eq!(m.params.get("id"), Some("7"));
    }

    #[test]
    fn test_param_does_not_match_empty_tail_segment() {
        let r = router(&[("/user/:id", "user")]);
        assert!(r.at("/user/42/extra").is_none());
        assert!(r.at("/user/").is_none());
    }

    #[test]
    fn test_len_and_display() {
        let r = router(&[("/a", "a"), ("/b/:x", "b")]);
        assert_eq!(r.len(), 2);
        assert!(!r.is_empty());
        let printed = r.to_string();
        assert!(printed.contains("Some(\"a\")"));
        assert!(printed.contains("[\"x\"]"));
    }

    #[test]
    fn test_from_config() {
        let routes = vec![
            RouteConfig {
                path: "/health".into(),
                handler: "health".into(),
            },
            RouteConfig {
                path: "/users/:id".into(),
                handler: "show_user".into(),
            },
        ];
        let r = Router::from_config(&routes).unwrap();
        assert_eq!(r.at("/health").unwrap().handler, "health");
        assert_eq!(r.at("/users/9").unwrap().params.get("id"), Some("9"));
    }
}
