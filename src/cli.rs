use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the dotfile backup tool.
#[derive(Parser, Debug)]
#[command(
    name = "dotty",
    about = "Back up your dotfiles of choice into a folder",
    version
)]
pub struct Cli {
    /// Defaults to `backup` when no subcommand is given.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the manifest location (default: ~/.config/dotty/config.json)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy every tracked dotfile into the destination folder
    Backup(BackupOpts),
    /// Add a dotfile to the manifest
    Add(AddOpts),
}

/// Options for the `backup` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct BackupOpts {
    /// Record copy failures and continue instead of aborting the run
    #[arg(long)]
    pub keep_going: bool,
}

/// Options for the `add` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// Path to add to the manifest (stored exactly as written)
    pub path: String,
}
