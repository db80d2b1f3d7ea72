//! Enum declaration generator.
//!
//! Turns a list of prefixed C constants into an `enum(c_int)` block whose
//! variants refer back to the C constants:
//!
//! ```text
//! const TypeTag = enum(c_int) {
//!     Void = C.GI_TYPE_TAG_VOID,
//!     Boolean = C.GI_TYPE_TAG_BOOLEAN,
//! };
//! ```

use std::fmt::Write as _;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::naming::{escape_identifier, to_pascal};
use crate::util::diagnostic::Diagnostic;

/// How the C constant is referenced on the right-hand side of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantStyle {
    /// `Void = C.GI_TYPE_TAG_VOID`
    Qualified(String),
    /// `Void = GI_TYPE_TAG_VOID`
    Bare,
}

impl Default for ConstantStyle {
    fn default() -> Self {
        ConstantStyle::Qualified("C".to_string())
    }
}

impl ConstantStyle {
    fn reference(&self, constant: &str) -> String {
        match self {
            ConstantStyle::Qualified(namespace) => format!("{}.{}", namespace, constant),
            ConstantStyle::Bare => constant.to_string(),
        }
    }
}

/// Formatting knobs for [`render_enum_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOptions {
    pub constant_style: ConstantStyle,
    /// Integer type the enum is backed by
    pub backing_type: String,
    /// Spaces in front of each variant line
    pub indent: usize,
}

impl Default for EnumOptions {
    fn default() -> Self {
        EnumOptions {
            constant_style: ConstantStyle::default(),
            backing_type: "c_int".to_string(),
            indent: 4,
        }
    }
}

/// Error while rendering an enum.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum EnumError {
    #[error("variant `{variant}` of `{enum_name}` doesn't start with `{prefix}`")]
    #[diagnostic(
        code(gibind::enums::prefix_mismatch),
        help("every constant listed for `{enum_name}` must start with `{prefix}`")
    )]
    PrefixMismatch {
        variant: String,
        enum_name: String,
        prefix: String,
    },

    #[error("variant `{variant}` of `{enum_name}` is empty once `{prefix}` is removed")]
    #[diagnostic(
        code(gibind::enums::empty_variant),
        help("use a shorter prefix than the constant itself")
    )]
    EmptyVariant {
        variant: String,
        enum_name: String,
        prefix: String,
    },
}

impl EnumError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EnumError::PrefixMismatch {
                variant,
                enum_name,
                prefix,
            } => Diagnostic::error(self.to_string())
                .with_context(format!("`{}` expects the prefix `{}`", enum_name, prefix))
                .with_suggestion(format!("Remove `{}` from the constant list", variant))
                .with_suggestion("Pass the prefix the constants actually share with `--prefix`"),
            EnumError::EmptyVariant { enum_name, .. } => Diagnostic::error(self.to_string())
                .with_context(format!("while rendering `{}`", enum_name))
                .with_suggestion("Drop the trailing word from `--prefix`"),
        }
    }
}

/// Variant identifier for `constant`: prefix removed, pascal cased.
pub fn variant_name(enum_name: &str, prefix: &str, constant: &str) -> Result<String, EnumError> {
    let rest = constant
        .strip_prefix(prefix)
        .ok_or_else(|| EnumError::PrefixMismatch {
            variant: constant.to_string(),
            enum_name: enum_name.to_string(),
            prefix: prefix.to_string(),
        })?;

    let ident = to_pascal(rest);
    if ident.is_empty() {
        return Err(EnumError::EmptyVariant {
            variant: constant.to_string(),
            enum_name: enum_name.to_string(),
            prefix: prefix.to_string(),
        });
    }

    Ok(escape_identifier(&ident))
}

/// Render `name` with default options.
pub fn render_enum<S: AsRef<str>>(
    name: &str,
    prefix: &str,
    variants: &[S],
) -> Result<String, EnumError> {
    render_enum_with(name, prefix, variants, &EnumOptions::default())
}

/// Render an enum block mapping each constant in `variants` to a variant.
///
/// Variants keep input order. The first constant not starting with
/// `prefix` aborts rendering; nothing is returned for the rest.
pub fn render_enum_with<S: AsRef<str>>(
    name: &str,
    prefix: &str,
    variants: &[S],
    options: &EnumOptions,
) -> Result<String, EnumError> {
    let mut out = String::new();
    let indent = " ".repeat(options.indent);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "const {} = enum({}) {{", name, options.backing_type);
    for constant in variants {
        let constant = constant.as_ref();
        let variant = variant_name(name, prefix, constant)?;
        let _ = writeln!(
            out,
            "{}{} = {},",
            indent,
            variant,
            options.constant_style.reference(constant)
        );
    }
    out.push_str("};\n");

    Ok(out)
}

/// Split text into constant names: one per line, blank lines ignored.
pub fn parse_identifier_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
