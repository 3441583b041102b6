//! Prefix-tree path router.
//!
//! Routes such as `/users/:id` or `/static/` are compiled into a
//! prefix-compressed trie. Lookups return the most specific route together
//! with the captured parameters.
//!
//! ```
//! use trie_router::routing::Router;
//!
//! let mut builder = Router::builder();
//! builder.route("/users/:id", "show_user").unwrap();
//! builder.route("/users/:id/posts", "user_posts").unwrap();
//! let router = builder.build();
//!
//! let m = router.at("/users/42/posts").unwrap();
//! assert_eq!(*m.handler, "user_posts");
//! assert_eq!(m.params.get("id"), Some("42"));
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use routing::{RouteError, RouteMatch, Router, RouterBuilder, SharedRouter};
