//! site-race server
//!
//! Answers "which of these sites contains this text?" by fetching every site at
//! once and returning the first one confirmed to contain it.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────────┐
//!                         │                     SITE RACE                      │
//!                         │                                                    │
//!   POST /checkText       │  ┌─────────┐    ┌──────────────┐                   │
//!   ──────────────────────┼─▶│  http   │───▶│  coordinator │──┬─▶ prober ──────┼──▶ site A
//!                         │  │ server  │    │  (race)      │  ├─▶ prober ──────┼──▶ site B
//!                         │  └─────────┘    └──────┬───────┘  └─▶ prober ──────┼──▶ site C
//!                         │       ▲                │ first match / all done    │
//!   200 / 204 / 400       │       └────────────────┘                           │
//!   ◀─────────────────────┼                                                    │
//!                         │  ┌──────────────────────────────────────────────┐  │
//!                         │  │ config │ observability │ lifecycle (shutdown)│  │
//!                         │  └──────────────────────────────────────────────┘  │
//!                         └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use site_race::config::{read_config_file, resolve_config, ServiceConfig};
use site_race::lifecycle::startup;
use site_race::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "site-race")]
#[command(about = "Race a set of sites for a piece of text", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => ServiceConfig::default(),
    };

    // Logging comes up before the environment overlay so its warnings are visible.
    init_logging(&config.observability);
    tracing::info!("site-race v{} starting", env!("CARGO_PKG_VERSION"));

    let config = resolve_config(config)?;
    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
