//! Hot-swappable router handle.
//!
//! A built `Router` cannot change. To pick up new routes, build a fresh
//! router and `store` it; readers holding an older snapshot keep using it
//! until they drop it.
//!
//! ```text
//! lookup:  load() → Arc<Router> → at(path)
//! reload:  RouterBuilder → build() → store(new)
//! ```

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::routing::Router;

/// Shared, atomically replaceable router.
#[derive(Debug)]
pub struct SharedRouter<H> {
    current: Arc<ArcSwap<Router<H>>>,
}

impl<H> Clone for SharedRouter<H> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<H> SharedRouter<H> {
    pub fn new(router: Router<H>) -> Self {
        metrics::record_route_count(router.len());
        Self {
            current: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// Snapshot of the current router. Lock-free.
    pub fn load(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Publish a new router, returning the one it replaced.
    pub fn store(&self, router: Router<H>) -> Arc<Router<H>> {
        let routes = router.len();
        let previous = self.current.swap(Arc::new(router));
        metrics::record_route_count(routes);
        tracing::info!(
            routes,
            previous_routes = previous.len(),
            "Router swapped"
        );
        previous
    }
}
