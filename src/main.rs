//! chassis: module-lifecycle process host
//!
//! A process host that registers named modules, loads them in
//! registration order, and tears them down in reverse order on shutdown
//! signals or fatal errors.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                   CHASSIS                      │
//!                    │                                                │
//!   ServiceConfig    │  ┌──────────┐   register    ┌──────────────┐  │
//!   ─────────────────┼─▶│ Context  │◀──────────────│ caller       │  │
//!                    │  │          │               │ modules      │  │
//!                    │  │ registry │               └──────────────┘  │
//!                    │  └────┬─────┘                                 │
//!                    │       │ load: forward, sequential, fail-fast  │
//!                    │       ▼                                       │
//!                    │  ┌──────────┐  ┌──────────┐  ┌──────────┐     │
//!                    │  │ config   │─▶│ module A │─▶│ module B │ ... │
//!                    │  └──────────┘  └──────────┘  └──────────┘     │
//!                    │       ▲                                       │
//!                    │       │ dispose: reverse, best-effort         │
//!                    │       │                                       │
//!   SIGINT/SIGTERM   │  ┌────┴─────┐     ┌─────────────────────┐     │
//!   ─────────────────┼─▶│ signals  │     │ open-handle dump    │     │
//!   task panic       │  └──────────┘     │ (before exit)       │     │
//!                    │                   └─────────────────────┘     │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use chassis::config::loader::load_service_config;
use chassis::config::schema::ServiceConfig;
use chassis::context::Context;
use chassis::lifecycle::signals::OsSignals;
use chassis::observability::{handles, logging};

#[derive(Parser)]
#[command(name = "chassis")]
#[command(about = "Module-lifecycle process host", long_about = None)]
struct Cli {
    /// Path to the service configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress all diagnostic output.
    #[arg(long)]
    silent: bool,

    /// Dump still-open async handles right before exit.
    #[arg(long)]
    print_open_handles: bool,

    /// Configuration environment name.
    #[arg(long)]
    env: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut service = match &cli.config {
        Some(path) => load_service_config(path)?,
        None => ServiceConfig::default(),
    };
    // CLI flags override the file.
    service.silent |= cli.silent;
    service.print_open_handles |= cli.print_open_handles;
    if let Some(env) = cli.env {
        service.env = env;
    }

    logging::init(&service);

    tracing::info!(
        service = %service.name,
        env = %service.env,
        config_dir = %service.config_dir.display(),
        "chassis v0.1.0 starting"
    );

    let context = Arc::new(Context::new(service.clone()));
    let signals = OsSignals::new()?;

    let report = context.run(signals).await;

    if service.print_open_handles {
        handles::dump();
    }

    tracing::info!(code = report.code, "exit");
    std::process::exit(report.code);
}
