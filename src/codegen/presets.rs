//! Built-in constant lists from the girepository reference docs.

use std::fmt;
use std::str::FromStr;

/// A named list of introspection constants sharing a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumPreset {
    /// Identifier used on the command line
    pub id: &'static str,
    /// Default enum name
    pub name: &'static str,
    /// Prefix shared by every constant
    pub prefix: &'static str,
    pub constants: &'static [&'static str],
}

pub const INFO_TYPE: EnumPreset = EnumPreset {
    id: "info-type",
    name: "InfoType",
    prefix: "GI_INFO_TYPE",
    constants: &[
        "GI_INFO_TYPE_INVALID",
        "GI_INFO_TYPE_FUNCTION",
        "GI_INFO_TYPE_CALLBACK",
        "GI_INFO_TYPE_STRUCT",
        "GI_INFO_TYPE_BOXED",
        "GI_INFO_TYPE_ENUM",
        "GI_INFO_TYPE_FLAGS",
        "GI_INFO_TYPE_OBJECT",
        "GI_INFO_TYPE_INTERFACE",
        "GI_INFO_TYPE_CONSTANT",
        "GI_INFO_TYPE_UNION",
        "GI_INFO_TYPE_VALUE",
        "GI_INFO_TYPE_SIGNAL",
        "GI_INFO_TYPE_VFUNC",
        "GI_INFO_TYPE_PROPERTY",
        "GI_INFO_TYPE_FIELD",
        "GI_INFO_TYPE_ARG",
        "GI_INFO_TYPE_TYPE",
        "GI_INFO_TYPE_UNRESOLVED",
    ],
};

pub const TYPE_TAG: EnumPreset = EnumPreset {
    id: "type-tag",
    name: "TypeTag",
    prefix: "GI_TYPE_TAG",
    constants: &[
        "GI_TYPE_TAG_VOID",
        "GI_TYPE_TAG_BOOLEAN",
        "GI_TYPE_TAG_INT8",
        "GI_TYPE_TAG_UINT8",
        "GI_TYPE_TAG_INT16",
        "GI_TYPE_TAG_UINT16",
        "GI_TYPE_TAG_INT32",
        "GI_TYPE_TAG_UINT32",
        "GI_TYPE_TAG_INT64",
        "GI_TYPE_TAG_UINT64",
        "GI_TYPE_TAG_FLOAT",
        "GI_TYPE_TAG_DOUBLE",
        "GI_TYPE_TAG_GTYPE",
        "GI_TYPE_TAG_UTF8",
        "GI_TYPE_TAG_FILENAME",
        "GI_TYPE_TAG_ARRAY",
        "GI_TYPE_TAG_INTERFACE",
        "GI_TYPE_TAG_GLIST",
        "GI_TYPE_TAG_GSLIST",
        "GI_TYPE_TAG_GHASH",
        "GI_TYPE_TAG_ERROR",
        "GI_TYPE_TAG_UNICHAR",
    ],
};

/// Every built-in preset.
pub const PRESETS: &[EnumPreset] = &[INFO_TYPE, TYPE_TAG];

impl EnumPreset {
    /// Find a preset by its command line identifier.
    pub fn find(id: &str) -> Option<EnumPreset> {
        PRESETS.iter().copied().find(|p| p.id == id)
    }
}

impl fmt::Display for EnumPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for EnumPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnumPreset::find(s).ok_or_else(|| {
            let known: Vec<_> = PRESETS.iter().map(|p| p.id).collect();
            format!("unknown preset `{}` (expected one of: {})", s, known.join(", "))
        })
    }
}
