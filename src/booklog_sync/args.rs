use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "booklog-sync")]
#[command(about = "Sync a Booklog CSV export into an Obsidian vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the config file
    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the CSV and sync it into the vault once
    Sync,
    /// Watch the CSV for changes and re-sync automatically
    Watch,
}
