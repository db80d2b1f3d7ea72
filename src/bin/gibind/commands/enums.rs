//! `gibind enum` command

use anyhow::Result;

use crate::cli::EnumArgs;
use gibind::codegen::ConstantStyle;
use gibind::ops::{generate_enum, EnumRequest, EnumSource};
use gibind::util::config::Config;
use gibind::util::fs;

pub fn execute(args: EnumArgs, config: &Config) -> Result<()> {
    let source = match args.preset {
        Some(preset) => EnumSource::Preset(preset.preset()),
        None => EnumSource::Text(fs::file_or_stdin(args.input.as_deref())?),
    };

    let mut options = config.enum_options();
    if args.bare {
        options.constant_style = ConstantStyle::Bare;
    } else if let Some(namespace) = args.namespace {
        options.constant_style = ConstantStyle::Qualified(namespace);
    }
    if let Some(backing_type) = args.backing_type {
        options.backing_type = backing_type;
    }

    let rendered = generate_enum(&EnumRequest {
        name: args.name,
        prefix: args.prefix,
        source,
        options,
    })?;

    print!("{}", rendered);
    Ok(())
}
