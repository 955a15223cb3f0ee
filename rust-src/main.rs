//! Habit Pulse CLI
//!
//! Progress analytics and data export for habit tracking.

mod analytics;
mod cli;
mod commands;
mod config;
mod data;
mod export;
mod models;
mod visualization;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};


fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
