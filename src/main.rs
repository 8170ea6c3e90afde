//! Traefik configuration mapper (v1)
//!
//! Serves a rewritten copy of an upstream's dynamic Traefik configuration.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────────────────┐
//!                 │                      TRAEFIK MAPPER                        │
//!   GET /         │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌────────┐ │
//!  ───────────────┼─▶│  http   │───▶│ upstream │───▶│ resolver │───▶│pipeline│ │
//!                 │  │ server  │    │  fetch   │    │(optional)│    │ rules  │ │
//!                 │  └─────────┘    └────┬─────┘    └────┬─────┘    └───┬────┘ │
//!   JSON          │       ▲              │               │              │      │
//!  ◀──────────────┼───────┴──────────────┼───────────────┼──────────────┘      │
//!                 │                      ▼               ▼                     │
//!                 │            main.json           login + applications        │
//!                 └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from an optional TOML file (`--config`) overlaid with
//! `TRAEFIK_MAPPER_*` environment variables.

use std::path::PathBuf;

use clap::Parser;

use traefik_mapper::config::load_config;
use traefik_mapper::lifecycle::startup;

#[derive(Parser)]
#[command(name = "traefik-mapper")]
#[command(about = "Rewrites an upstream's dynamic Traefik configuration", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Missing base endpoint and other config errors abort before binding
    let config = load_config(cli.config.as_deref())?;

    startup::run(config).await
}
