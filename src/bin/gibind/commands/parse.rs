//! `gibind parse` command
//!
//! Prints the function declarations the stub generator would see.

use anyhow::{Context, Result};

use crate::cli::ParseArgs;
use crate::commands::source_options;
use gibind::ops::parse_declarations;
use gibind::util::config::Config;
use gibind::util::fs;

pub fn execute(args: ParseArgs, config: &Config) -> Result<()> {
    let opts = source_options(&args.source, config)?;

    let input = fs::inline_or_stdin(args.source.input)?;
    let declarations = parse_declarations(&input, &opts)?;

    if let Some(ref path) = args.source.save_expanded {
        fs::write_string(path, &declarations.source)?;
    }

    let header = &declarations.header;
    if args.json {
        let json = serde_json::to_string_pretty(header)
            .context("failed to serialize declarations")?;
        println!("{}", json);
        return Ok(());
    }

    for function in &header.functions {
        println!("{};", function);
    }
    for skipped in &header.skipped {
        tracing::debug!("skipped: {}", skipped);
    }

    Ok(())
}
