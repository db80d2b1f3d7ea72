//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use gibind::codegen::presets::{self, EnumPreset};

/// gibind - code generators for GObject-Introspection bindings
#[derive(Parser)]
#[command(name = "gibind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of .gibind/config.toml
    #[arg(long, global = true, env = "GIBIND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an enum declaration from prefixed C constants
    Enum(EnumArgs),

    /// Render wrapper stubs for C function declarations
    Stubs(StubsArgs),

    /// Show the function declarations found in C input
    Parse(ParseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Built-in constant lists.
#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// GIInfoType constants
    InfoType,
    /// GITypeTag constants
    TypeTag,
}

impl PresetArg {
    pub fn preset(self) -> EnumPreset {
        match self {
            PresetArg::InfoType => presets::INFO_TYPE,
            PresetArg::TypeTag => presets::TYPE_TAG,
        }
    }
}

#[derive(Args)]
pub struct EnumArgs {
    /// Use a built-in constant list
    #[arg(long, value_enum, conflicts_with = "input")]
    pub preset: Option<PresetArg>,

    /// Enum name (defaults to the preset's)
    #[arg(long)]
    pub name: Option<String>,

    /// Prefix shared by every constant (defaults to the preset's)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Reference constants without a namespace
    #[arg(long, conflicts_with = "namespace")]
    pub bare: bool,

    /// Namespace the constants are referenced through
    #[arg(long)]
    pub namespace: Option<String>,

    /// Integer type backing the enum
    #[arg(long)]
    pub backing_type: Option<String>,

    /// File with one constant per line (`-` or absent reads stdin)
    pub input: Option<PathBuf>,
}

/// Input and preprocessing options shared by `stubs` and `parse`.
#[derive(Args)]
pub struct SourceArgs {
    /// C declarations to process (reads stdin when absent)
    pub input: Option<String>,

    /// pkg-config package providing the include flags
    #[arg(long)]
    pub package: Option<String>,

    /// Parse the input as is, without pkg-config or cpp
    #[arg(long)]
    pub no_preprocess: bool,

    /// C preprocessor to run
    #[arg(long)]
    pub cpp: Option<PathBuf>,

    /// pkg-config program to query
    #[arg(long)]
    pub pkg_config: Option<PathBuf>,

    /// Extra flag passed to the preprocessor (repeatable)
    #[arg(long = "cflag", allow_hyphen_values = true)]
    pub cflags: Vec<String>,

    /// Also write the expanded source to this file
    #[arg(long)]
    pub save_expanded: Option<PathBuf>,

    /// Only keep functions whose name matches this regex
    #[arg(long = "match")]
    pub name_match: Option<String>,

    /// Only keep these functions (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Leave out these functions (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,
}

#[derive(Args)]
pub struct StubsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Literal prefix removed from function names (repeatable, first match wins)
    #[arg(long = "strip-prefix")]
    pub strip_prefixes: Vec<String>,

    /// Receiver parameter name
    #[arg(long)]
    pub receiver: Option<String>,

    /// Receiver parameter type
    #[arg(long)]
    pub receiver_type: Option<String>,

    /// Receiver field holding the raw C handle
    #[arg(long)]
    pub raw_field: Option<String>,

    /// Namespace the C functions are called through
    #[arg(long)]
    pub namespace: Option<String>,

    /// Echo the parsed source as comments before the stubs
    #[arg(long)]
    pub echo_input: bool,

    /// Skip functions that cannot be wrapped instead of failing
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the declarations as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
