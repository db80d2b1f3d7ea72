//! Text generators for hand-written introspection bindings.
//!
//! - [`enums`]: C constant lists to `enum(c_int)` declarations
//! - [`wrapper`]: C function signatures to receiver-style wrapper stubs

pub mod enums;
pub mod naming;
pub mod presets;
pub mod type_map;
pub mod wrapper;

pub use enums::{render_enum, render_enum_with, ConstantStyle, EnumError, EnumOptions};
pub use presets::EnumPreset;
pub use type_map::TypeMap;
pub use wrapper::{render_wrapper, render_wrappers, RenderedWrappers, WrapperError, WrapperOptions};
