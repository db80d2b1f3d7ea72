//! Macro expansion of C input through pkg-config and cpp.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::ProcessBuilder;

/// An external tool failed while expanding the input.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum PreprocessError {
    #[error("failed to resolve compiler flags for package `{package}`: {reason}")]
    #[diagnostic(
        code(gibind::preprocess::package_flags),
        help("install the package's development files or pass `--package`")
    )]
    PackageFlags {
        package: String,
        program: String,
        reason: String,
    },

    #[error("failed to preprocess input with `{program}`: {reason}")]
    #[diagnostic(
        code(gibind::preprocess::preprocessor),
        help("pass a working preprocessor with `--cpp`")
    )]
    Preprocessor { program: String, reason: String },
}

impl PreprocessError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            PreprocessError::PackageFlags { program, .. } => diag
                .with_context(format!("while running `{} --cflags`", program))
                .with_suggestion(suggestions::PACKAGE_NOT_FOUND)
                .with_suggestion("Pass `--no-preprocess` to parse the input as is"),
            PreprocessError::Preprocessor { .. } => {
                diag.with_suggestion(suggestions::PREPROCESSOR_FAILED)
            }
        }
    }
}

/// Options for [`preprocess`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// pkg-config package providing include flags (None = no query)
    pub package: Option<String>,

    /// C preprocessor program
    pub cpp: PathBuf,

    /// pkg-config program
    pub pkg_config: PathBuf,

    /// Flags passed to cpp after the package flags
    pub extra_cflags: Vec<String>,
}

/// The result of expanding a chunk of C input.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Flags cpp was invoked with
    pub flags: Vec<String>,

    /// Macro-expanded source
    pub expanded: String,
}

/// Query `pkg-config --cflags <package>`.
pub fn pkg_config_cflags(pkg_config: &Path, package: &str) -> Result<Vec<String>> {
    let stdout = ProcessBuilder::new(pkg_config)
        .args(["--cflags", package])
        .exec_stdout()
        .map_err(|e| PreprocessError::PackageFlags {
            package: package.to_string(),
            program: pkg_config.display().to_string(),
            reason: format!("{:#}", e),
        })?;

    Ok(stdout.split_whitespace().map(str::to_string).collect())
}

/// Expand `input` with the C preprocessor.
///
/// The input is written to a temporary file that is removed again once cpp
/// has run.
pub fn preprocess(input: &str, opts: &PreprocessOptions) -> Result<Preprocessed> {
    let mut flags = match opts.package {
        Some(ref package) => pkg_config_cflags(&opts.pkg_config, package)?,
        None => Vec::new(),
    };
    flags.extend(opts.extra_cflags.iter().cloned());

    let mut file = tempfile::Builder::new()
        .prefix("gibind-")
        .suffix(".c")
        .tempfile()
        .context("failed to create temporary input file")?;
    file.write_all(input.as_bytes())
        .and_then(|_| file.flush())
        .context("failed to write temporary input file")?;

    tracing::debug!("preprocessing {} bytes with {} flags", input.len(), flags.len());

    let expanded = ProcessBuilder::new(&opts.cpp)
        .args(&flags)
        .arg(file.path())
        .exec_stdout()
        .map_err(|e| PreprocessError::Preprocessor {
            program: opts.cpp.display().to_string(),
            reason: format!("{:#}", e),
        })?;

    Ok(Preprocessed { flags, expanded })
}
