use anyhow::Result;
use clap::Parser;
use std::io;
use tokenfit_rs::app::{AppMode, AppState};
use tokenfit_rs::config::{load_config, CliArgs};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    init_tracing();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    let mode = match args.split_tail {
        Some(index) => AppMode::SplitTail(index),
        None => AppMode::Fit,
    };
    let app = AppState::new(config).with_mode(mode);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(&args.tokens, stdin.lock(), stdout.lock())?;

    Ok(())
}

// Diagnostics go to stderr and only when RUST_LOG is set, e.g.
// `RUST_LOG=tokenfit_rs=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
