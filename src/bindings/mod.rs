//! C declaration model and parser.
//!
//! This module turns preprocessed C source into the function signatures
//! consumed by [`crate::codegen::wrapper`].

pub mod parser;
pub mod types;

pub use parser::HeaderParser;
pub use types::{CType, FunctionSignature, Param, ParsedHeader};
