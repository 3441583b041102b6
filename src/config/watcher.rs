//! Route file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_router, ConfigError};
use crate::observability::metrics;
use crate::routing::SharedRouter;

/// Rebuild the router from `path` and publish it.
///
/// On failure the current router stays in place.
pub fn reload_router(path: &Path, shared: &SharedRouter<String>) -> Result<usize, ConfigError> {
    match load_router(path) {
        Ok((_, router)) => {
            let routes = router.len();
            shared.store(router);
            metrics::record_reload(true);
            Ok(routes)
        }
        Err(e) => {
            metrics::record_reload(false);
            Err(e)
        }
    }
}

/// A watcher that monitors the route file for changes.
pub struct RouteWatcher {
    path: PathBuf,
    router: SharedRouter<String>,
    poll_interval: Duration,
}

impl RouteWatcher {
    /// Create a new RouteWatcher publishing into `router`.
    pub fn new(path: &Path, router: SharedRouter<String>, poll_interval: Duration) -> Self {
        Self {
            path: path.to_path_buf(),
            router,
            poll_interval,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let router = self.router;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route file change detected, reloading...");
                        match reload_router(&path, &router) {
                            Ok(routes) => tracing::info!(routes, "Routes reloaded"),
                            Err(e) => tracing::error!(
                                "Failed to reload routes: {}. Keeping current router.",
                                e
                            ),
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route watcher started");
        Ok(watcher)
    }
}
