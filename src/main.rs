// src/main.rs
use std::process::exit;
use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};

use automater::{App, Args};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Diagnostics go to stderr so reports on stdout stay clean
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(args);

    if let Err(e) = app.run().await {
        error!("Automater failed: {:#}", e);
        exit(1);
    }

    Ok(())
}
