use booklog_sync::config::SyncConfig;
use booklog_sync::error::Result;
use booklog_sync::sync::run_sync;
use booklog_sync::watch::start_watching;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = SyncConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Watch) => {
            // initial sync, then follow changes
            run_sync(&config.csv_path, &config.books_path)?;
            start_watching(&config.csv_path, &config.books_path)
        }
        Some(Commands::Sync) | None => {
            run_sync(&config.csv_path, &config.books_path)?;
            Ok(())
        }
    }
}
