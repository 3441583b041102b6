//! Route registration errors.

use thiserror::Error;

/// Errors raised while parsing or registering a route.
///
/// Lookups never fail; an unmatched path is simply `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A handler is already registered for this path.
    #[error("route {route:?} is already registered")]
    Duplicate { route: String },

    /// Nothing to insert.
    #[error("route path is empty")]
    EmptyPath,

    /// Routes are absolute.
    #[error("route {route:?} must start with '/'")]
    MissingLeadingSlash { route: String },

    /// A `:` segment without a name.
    #[error("route {route:?} declares a parameter without a name")]
    EmptyParamName { route: String },

    /// `:` appears somewhere other than the start of a segment.
    #[error("route {route:?}: a parameter must span a whole segment")]
    MarkerInsideSegment { route: String },

    /// Two parameters share a name.
    #[error("route {route:?} declares parameter {name:?} more than once")]
    DuplicateParam { route: String, name: String },

    /// Marker path and name list disagree.
    #[error("route {route:?} has {markers} parameter markers but {names} names")]
    ParamCountMismatch {
        route: String,
        markers: usize,
        names: usize,
    },
}
