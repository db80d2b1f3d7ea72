//! gibind - code generators for hand-written GObject-Introspection bindings
//!
//! This crate turns introspection constant lists into enum declarations and
//! C function declarations into receiver-style wrapper stubs.

pub mod bindings;
pub mod codegen;
pub mod ops;
pub mod util;

pub use bindings::{CType, FunctionSignature, HeaderParser, Param, ParsedHeader};
pub use codegen::{
    render_enum, render_enum_with, render_wrapper, EnumError, EnumOptions, WrapperError,
    WrapperOptions,
};
pub use util::config::Config;
