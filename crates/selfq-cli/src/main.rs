//! selfQ CLI - protect, recover and check portable encrypted exports
//!
//! A thin command-line front end over `selfq-core`: it reads records as JSON
//! files, writes export artifacts, and reports failures with one exit code
//! per failure family.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::{check, completions, config as config_cmd, inspect, protect, recover};
use crate::errors::CliError;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // A broken config file is reported by the command that needs it.
    let config_level = ctx.config().ok().map(|c| c.logging.level.clone());
    logging::init(cli.quiet, cli.verbose, config_level.as_deref());

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let error = CliError::from_anyhow(&e);
        tracing::debug!(code = error.exit_code(), "command failed: {:#}", e);

        print_error(&ui_ctx, error.message(), error.hint());
        std::process::exit(error.exit_code());
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Protect(args) => protect::handle_protect(ctx, args),
        Commands::Recover(args) => recover::handle_recover(ctx, args),
        Commands::Check(args) => check::handle_check(ctx, args),
        Commands::Inspect(args) => inspect::handle_inspect(ctx, args),
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => config_cmd::handle_init(ctx, *force),
            ConfigCommands::Show { json } => config_cmd::handle_show(ctx, *json),
        },
        Commands::Completions { shell } => completions::handle_completions(*shell),
    }
}
