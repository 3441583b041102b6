//! Metrics collection.
//!
//! # Metrics
//! - `router_routes_registered_total` (counter): routes accepted by builders
//! - `router_routes` (gauge): routes in the most recently published router
//! - `router_reloads_total` (counter): reloads by outcome
//! - `router_lookups_total` (counter): lookups by outcome
//!
//! # Design Decisions
//! - Uses the `metrics` facade only; recording is a no-op until the
//!   embedding application installs a recorder
//! - Lookups inside `Router::at` are not instrumented; callers record them

use ::metrics::{counter, gauge};

pub fn record_route_registered() {
    counter!("router_routes_registered_total").increment(1);
}

pub fn record_route_count(routes: usize) {
    gauge!("router_routes").set(routes as f64);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("router_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_lookup(found: bool) {
    let outcome = if found { "hit" } else { "miss" };
    counter!("router_lookups_total", "outcome" => outcome).increment(1);
}
