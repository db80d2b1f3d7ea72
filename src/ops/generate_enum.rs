//! Implementation of `gibind enum`.

use anyhow::{bail, Result};

use crate::codegen::enums::{parse_identifier_list, render_enum_with, EnumOptions};
use crate::codegen::EnumPreset;

/// Where the constant names come from.
#[derive(Debug, Clone)]
pub enum EnumSource {
    /// A built-in constant list
    Preset(EnumPreset),
    /// Text with one constant per line
    Text(String),
}

/// Options for the enum command.
#[derive(Debug, Clone)]
pub struct EnumRequest {
    /// Enum name (defaults to the preset's)
    pub name: Option<String>,

    /// Shared constant prefix (defaults to the preset's)
    pub prefix: Option<String>,

    pub source: EnumSource,

    pub options: EnumOptions,
}

/// Render the requested enum.
pub fn generate_enum(request: &EnumRequest) -> Result<String> {
    let (default_name, default_prefix, constants) = match request.source {
        EnumSource::Preset(preset) => (
            Some(preset.name),
            Some(preset.prefix),
            preset.constants.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        ),
        EnumSource::Text(ref text) => (None, None, parse_identifier_list(text)),
    };

    let Some(name) = request.name.as_deref().or(default_name) else {
        bail!("an enum name is required: pass `--name` or `--preset`");
    };
    let Some(prefix) = request.prefix.as_deref().or(default_prefix) else {
        bail!("a constant prefix is required: pass `--prefix` or `--preset`");
    };

    if constants.is_empty() {
        tracing::warn!("no constants given for `{}`", name);
    }

    tracing::debug!("rendering `{}` with {} variants", name, constants.len());

    let rendered = render_enum_with(name, prefix, &constants, &request.options)?;
    Ok(rendered)
}
