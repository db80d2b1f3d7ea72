//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::SourceArgs;
use gibind::ops::StubOptions;
use gibind::util::config::{self, Config};

pub mod completions;
pub mod enums;
pub mod parse;
pub mod stubs;

/// Load the configuration every command starts from.
///
/// An explicit `--config` file is layered over the global and project files
/// and must load cleanly.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = config::global_config_path().unwrap_or_default();
    let mut config = config::load_config(&global, &config::project_config_path(&cwd));

    if let Some(path) = explicit {
        config.merge(Config::load(path)?);
    }

    Ok(config)
}

/// Stub options for the input and preprocessing flags shared by `stubs` and `parse`.
pub fn source_options(source: &SourceArgs, config: &Config) -> Result<StubOptions> {
    let preprocess = if source.no_preprocess {
        None
    } else {
        let mut opts = config.preprocess_options();
        if let Some(ref package) = source.package {
            opts.package = Some(package.clone());
        }
        if let Some(ref cpp) = source.cpp {
            opts.cpp = cpp.clone();
        }
        if let Some(ref pkg_config) = source.pkg_config {
            opts.pkg_config = pkg_config.clone();
        }
        opts.extra_cflags.extend(source.cflags.iter().cloned());
        Some(opts)
    };

    let name_filter = source
        .name_match
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid `--match` pattern")?;

    Ok(StubOptions {
        preprocess,
        wrapper: config.wrapper_options(),
        include: source.include.clone(),
        exclude: source.exclude.clone(),
        name_filter,
        ..Default::default()
    })
}
