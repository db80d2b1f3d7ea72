//! Configuration file support for gibind.
//!
//! gibind reads two configuration file locations:
//! - Global: `~/.gibind/config.toml` - User-wide defaults
//! - Project: `.gibind/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command line
//! flags take precedence over both.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codegen::{ConstantStyle, EnumOptions, TypeMap, WrapperOptions};
use crate::ops::PreprocessOptions;
use crate::util::process::{find_pkg_config, find_preprocessor};

/// Package queried for compiler flags when none is configured.
pub const DEFAULT_PACKAGE: &str = "gobject-introspection-1.0";

/// gibind configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preprocessing settings
    pub preprocess: PreprocessConfig,

    /// Wrapper stub settings
    pub stubs: StubsConfig,

    /// Enum settings
    pub enums: EnumsConfig,

    /// Extra C base type to target type mappings
    pub types: BTreeMap<String, String>,
}

/// Preprocessing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// pkg-config package providing the include flags
    pub package: Option<String>,

    /// Path to the C preprocessor
    pub cpp: Option<PathBuf>,

    /// Path to pkg-config
    pub pkg_config: Option<PathBuf>,

    /// Additional preprocessor flags
    pub cflags: Vec<String>,
}

/// Wrapper stub configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Literal prefixes removed from function names
    pub strip_prefixes: Option<Vec<String>>,

    /// Receiver parameter name
    pub receiver: Option<String>,

    /// Receiver parameter type
    pub receiver_type: Option<String>,

    /// Receiver field holding the raw handle
    pub raw_field: Option<String>,

    /// Namespace of the wrapped C functions
    pub namespace: Option<String>,
}

/// Enum configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumsConfig {
    /// Namespace the constants are referenced through
    pub namespace: Option<String>,

    /// Reference constants without a namespace
    pub bare: bool,

    /// Backing integer type
    pub backing_type: Option<String>,

    /// Variant indentation
    pub indent: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Preprocess settings
        if other.preprocess.package.is_some() {
            self.preprocess.package = other.preprocess.package;
        }
        if other.preprocess.cpp.is_some() {
            self.preprocess.cpp = other.preprocess.cpp;
        }
        if other.preprocess.pkg_config.is_some() {
            self.preprocess.pkg_config = other.preprocess.pkg_config;
        }
        if !other.preprocess.cflags.is_empty() {
            self.preprocess.cflags = other.preprocess.cflags;
        }

        // Stub settings
        if other.stubs.strip_prefixes.is_some() {
            self.stubs.strip_prefixes = other.stubs.strip_prefixes;
        }
        if other.stubs.receiver.is_some() {
            self.stubs.receiver = other.stubs.receiver;
        }
        if other.stubs.receiver_type.is_some() {
            self.stubs.receiver_type = other.stubs.receiver_type;
        }
        if other.stubs.raw_field.is_some() {
            self.stubs.raw_field = other.stubs.raw_field;
        }
        if other.stubs.namespace.is_some() {
            self.stubs.namespace = other.stubs.namespace;
        }

        // Enum settings
        if other.enums.namespace.is_some() {
            self.enums.namespace = other.enums.namespace;
        }
        if other.enums.bare {
            self.enums.bare = true;
        }
        if other.enums.backing_type.is_some() {
            self.enums.backing_type = other.enums.backing_type;
        }
        if other.enums.indent.is_some() {
            self.enums.indent = other.enums.indent;
        }

        // Type mappings accumulate
        self.types.extend(other.types);
    }

    /// Wrapper options with configured values applied over the defaults.
    pub fn wrapper_options(&self) -> WrapperOptions {
        let mut options = WrapperOptions::default();

        if let Some(ref prefixes) = self.stubs.strip_prefixes {
            options.strip_prefixes = prefixes.clone();
        }
        if let Some(ref receiver) = self.stubs.receiver {
            options.receiver = receiver.clone();
        }
        if let Some(ref receiver_type) = self.stubs.receiver_type {
            options.receiver_type = receiver_type.clone();
        }
        if let Some(ref raw_field) = self.stubs.raw_field {
            options.raw_field = raw_field.clone();
        }
        if let Some(ref namespace) = self.stubs.namespace {
            options.namespace = namespace.clone();
        }
        options.type_map = TypeMap::default().with_entries(self.types.clone());

        options
    }

    /// Enum options with configured values applied over the defaults.
    pub fn enum_options(&self) -> EnumOptions {
        let mut options = EnumOptions::default();

        if self.enums.bare {
            options.constant_style = ConstantStyle::Bare;
        } else if let Some(ref namespace) = self.enums.namespace {
            options.constant_style = ConstantStyle::Qualified(namespace.clone());
        }
        if let Some(ref backing_type) = self.enums.backing_type {
            options.backing_type = backing_type.clone();
        }
        if let Some(indent) = self.enums.indent {
            options.indent = indent;
        }

        options
    }

    /// Preprocessing options, locating the tools in PATH when unset.
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            package: Some(
                self.preprocess
                    .package
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
            ),
            cpp: self
                .preprocess
                .cpp
                .clone()
                .or_else(find_preprocessor)
                .unwrap_or_else(|| PathBuf::from("cpp")),
            pkg_config: self
                .preprocess
                .pkg_config
                .clone()
                .or_else(find_pkg_config)
                .unwrap_or_else(|| PathBuf::from("pkg-config")),
            extra_cflags: self.preprocess.cflags.clone(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.gibind/config.toml)
/// 2. Global config (~/.gibind/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global gibind config directory (~/.gibind).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".gibind"))
}

/// Get the global config path (~/.gibind/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.gibind/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".gibind").join("config.toml")
}
