//! `gibind stubs` command

use anyhow::Result;

use crate::cli::StubsArgs;
use crate::commands::source_options;
use gibind::ops::{parse_declarations, render_stubs};
use gibind::util::config::Config;
use gibind::util::fs;

pub fn execute(args: StubsArgs, config: &Config) -> Result<()> {
    let mut opts = source_options(&args.source, config)?;

    if !args.strip_prefixes.is_empty() {
        opts.wrapper.strip_prefixes = args.strip_prefixes;
    }
    if let Some(receiver) = args.receiver {
        opts.wrapper.receiver = receiver;
    }
    if let Some(receiver_type) = args.receiver_type {
        opts.wrapper.receiver_type = receiver_type;
    }
    if let Some(raw_field) = args.raw_field {
        opts.wrapper.raw_field = raw_field;
    }
    if let Some(namespace) = args.namespace {
        opts.wrapper.namespace = namespace;
    }
    opts.echo_input = args.echo_input;
    opts.keep_going = args.keep_going;

    let input = fs::inline_or_stdin(args.source.input)?;
    let declarations = parse_declarations(&input, &opts)?;

    // Written before rendering so a failing run still leaves the expansion behind
    if let Some(ref path) = args.source.save_expanded {
        fs::write_string(path, &declarations.source)?;
        tracing::debug!("wrote expanded source to {}", path.display());
    }

    let out = render_stubs(declarations, &opts)?;
    if !out.rendered.skipped.is_empty() {
        tracing::info!("skipped {} functions", out.rendered.skipped.len());
    }

    print!("{}", out.text);
    Ok(())
}
