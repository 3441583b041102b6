//! Shared utilities for integration tests.

use std::path::PathBuf;

use trie_router::routing::Router;

/// Build a router whose handlers are the given names.
#[allow(dead_code)]
pub fn build_router(routes: &[(&str, &str)]) -> Router<String> {
    let mut builder = Router::builder();
    for (route, handler) in routes {
        builder.route(route, handler.to_string()).unwrap();
    }
    builder.build()
}

/// Turn a route into a concrete request path by filling each parameter
/// with `v<N>`. A trailing wildcard is left as is.
#[allow(dead_code)]
pub fn sample_path(route: &str) -> (String, Vec<String>) {
    let mut values = Vec::new();
    let segments: Vec<String> = route
        .split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                let value = format!("v{}", values.len());
                values.push(value.clone());
                value
            } else {
                segment.to_string()
            }
        })
        .collect();
    (segments.join("/"), values)
}

/// Write a route file to a unique temp path.
#[allow(dead_code)]
pub fn write_route_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "trie-router-it-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}
