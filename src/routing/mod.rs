//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (build phase):
//!     "/users/:id"
//!     → pattern.rs (marker path "/users/:" + names ["id"])
//!     → tree.rs (insert, splitting nodes on partial prefixes)
//!     → router.rs build() (priority pass, freeze)
//!
//! Incoming request path:
//!     → router.rs at()
//!     → tree.rs (walk siblings in priority order)
//!     → Return: handler + params, or None
//! ```
//!
//! # Design Decisions
//! - Trie built once, immutable afterwards (thread-safe without locks)
//! - Literal siblings with more descendants are tried first, parameters last
//! - A segment ending in `/` catches the rest of the path when nothing more
//!   specific matches
//! - Reloading means building a new router and swapping it (`shared.rs`)

pub mod error;
pub mod node;
pub mod pattern;
pub mod router;
pub mod shared;
pub mod tree;

pub use error::RouteError;
pub use node::Node;
pub use pattern::Pattern;
pub use router::{Params, RouteMatch, Router, RouterBuilder, WILDCARD_PARAM};
pub use shared::SharedRouter;
pub use tree::Tree;
