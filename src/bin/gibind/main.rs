//! gibind CLI - code generators for GObject-Introspection bindings

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gibind::codegen::{EnumError, WrapperError};
use gibind::ops::PreprocessError;
use gibind::util::diagnostic::{emit, Diagnostic};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        emit(&to_diagnostic(&e), color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gibind=debug")
    } else {
        EnvFilter::new("gibind=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Enum(args) => commands::enums::execute(args, &config),
        Commands::Stubs(args) => commands::stubs::execute(args, &config),
        Commands::Parse(args) => commands::parse::execute(args, &config),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Pick the richest rendering available for an error.
fn to_diagnostic(err: &anyhow::Error) -> Diagnostic {
    if let Some(e) = err.downcast_ref::<EnumError>() {
        return e.to_diagnostic();
    }
    if let Some(e) = err.downcast_ref::<WrapperError>() {
        return e.to_diagnostic();
    }
    if let Some(e) = err.downcast_ref::<PreprocessError>() {
        return e.to_diagnostic();
    }
    Diagnostic::error(format!("{:#}", err))
}
