//! `snek` binary: parse the command line, set up logging, dispatch.
use anyhow::Result;
use clap::Parser;

use snek_cli::cli::{Cli, Command};
use snek_cli::commands;
use snek_cli::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Logger::new(args.command.name());

    match &args.command {
        Command::Update => commands::update::run(&args.global, &log),
        Command::Link(opts) => commands::link::run(&args.global, opts, &log),
        Command::Reveal(opts) => commands::rename::reveal(opts, &log),
        Command::Hide(opts) => commands::rename::hide(opts, &log),
        Command::Version => Ok(()),
    }
}
