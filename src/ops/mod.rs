//! High-level operations.
//!
//! This module contains the implementation of gibind commands.

pub mod generate_enum;
pub mod generate_stubs;
pub mod preprocess;

pub use generate_enum::{generate_enum, EnumRequest, EnumSource};
pub use generate_stubs::{
    collect_declarations, echo_comment, generate_stubs, parse_declarations, render_stubs,
    Declarations, StubOptions, StubOutput,
};
pub use preprocess::{
    pkg_config_cflags, preprocess, PreprocessError, PreprocessOptions, Preprocessed,
};
