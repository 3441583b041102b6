//! routectl: inspect and exercise a route table.
//!
//! ```text
//! routes.toml → load & validate → Router → tree | match | check | repl
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use trie_router::config::watcher::RouteWatcher;
use trie_router::config::{load_config, ConfigError, ObservabilityConfig, RouterConfig};
use trie_router::observability::{logging, metrics};
use trie_router::routing::{Router, SharedRouter};

#[derive(Parser)]
#[command(name = "routectl")]
#[command(about = "Inspect and exercise a trie-router route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prioritized routing tree
    Tree,
    /// Resolve request paths
    Match {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print one JSON object per path
        #[arg(long)]
        json: bool,
    },
    /// Validate the route table and report every problem
    Check,
    /// Resolve paths read from stdin, reloading the table on change if enabled
    Repl {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ParamOutput<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    path: &'a str,
    found: bool,
    handler: Option<&'a str>,
    params: Vec<ParamOutput<'a>>,
    wildcard: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config);
    let observability = config
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    logging::init_logging(&observability)?;

    tracing::debug!(config = %cli.config.display(), "routectl starting");

    match cli.command {
        Commands::Check => check(config),
        Commands::Tree => {
            let (_, router) = build(config)?;
            print!("{router}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { paths, json } => {
            let (_, router) = build(config)?;
            let mut missed = 0;
            for path in &paths {
                if !print_match(&router, path, json)? {
                    missed += 1;
                }
            }
            if missed > 0 {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Repl { json } => {
            let (config, router) = build(config)?;
            let shared = SharedRouter::new(router);

            // Dropping the watcher stops it, so keep it for the whole loop.
            let _watcher = if config.reload.enabled {
                let interval = Duration::from_secs(config.reload.poll_interval_secs);
                Some(RouteWatcher::new(&cli.config, shared.clone(), interval).run()?)
            } else {
                None
            };

            for line in io::stdin().lock().lines() {
                let line = line?;
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                let router = shared.load();
                print_match(&router, path, json)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build(
    config: Result<RouterConfig, ConfigError>,
) -> Result<(RouterConfig, Router<String>), Box<dyn std::error::Error>> {
    let config = config?;
    let router = Router::from_config(&config.routes)?;
    Ok((config, router))
}

fn check(
    config: Result<RouterConfig, ConfigError>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match config {
        Ok(config) => {
            let router = Router::from_config(&config.routes)?;
            println!(
                "OK: {} routes, {} nodes",
                router.len(),
                router.tree().node_count()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(ConfigError::Validation(errors)) => {
            for err in &errors {
                eprintln!("error: {}", err);
            }
            eprintln!("{} problem(s) found", errors.len());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve `path` and print the result. Returns whether a route matched.
fn print_match(
    router: &Router<String>,
    path: &str,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let found = router.at(path);
    metrics::record_lookup(found.is_some());

    let output = match &found {
        Some(m) => MatchOutput {
            path,
            found: true,
            handler: Some(m.handler.as_str()),
            params: m
                .params
                .iter()
                .map(|(name, value)| ParamOutput { name, value })
                .collect(),
            wildcard: m.params.wildcard().is_some(),
        },
        None => MatchOutput {
            path,
            found: false,
            handler: None,
            params: Vec::new(),
            wildcard: false,
        },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    } else if let Some(handler) = output.handler {
        write!(out, "{} -> {}", path, handler)?;
        for param in &output.params {
            write!(out, " {}={}", param.name, param.value)?;
        }
        writeln!(out)?;
    } else {
        writeln!(out, "{} -> no match", path)?;
    }

    Ok(output.found)
}
