use anyhow::Result;
use clap::Parser;

use dotty::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = match &args.command {
        Some(cli::Command::Add(_)) => "add",
        _ => "backup",
    };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match args.command {
        Some(cli::Command::Add(opts)) => commands::add::run(&args.global, &opts, &log),
        Some(cli::Command::Backup(opts)) => commands::backup::run(&args.global, &opts, &log),
        // Bare `dotty` backs up, matching the original CLI's default action.
        None => commands::backup::run(&args.global, &cli::BackupOpts::default(), &log),
    }
}
