//! Type definitions for parsed C declarations.
//!
//! These types represent the function-level information extracted from
//! (preprocessed) C headers and consumed by the wrapper generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declarations recovered from one chunk of C source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedHeader {
    /// Function declarations, in discovery order
    pub functions: Vec<FunctionSignature>,

    /// Statements that looked like declarations but could not be parsed
    pub skipped: Vec<String>,
}

impl ParsedHeader {
    /// Create a new empty parsed header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a function by its C name.
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A C function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name, exactly as declared
    pub name: String,

    /// Return type
    pub return_type: CType,

    /// Declared parameters, in order
    pub params: Vec<Param>,
}

impl FunctionSignature {
    /// Create a new signature with no parameters.
    pub fn new(name: impl Into<String>, return_type: CType) -> Self {
        FunctionSignature {
            name: name.into(),
            return_type,
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, ty: CType) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name (empty for unnamed params)
    pub name: String,

    /// Parameter type
    pub ty: CType,
}

impl Param {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.ty, self.name)
        }
    }
}

/// Shape of a C type as far as the wrapper generator cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CType {
    /// Pointer to another type
    Pointer(Box<CType>),

    /// A plain named type such as `int`, `unsigned long` or `GObject`
    Named {
        qualifiers: Vec<String>,
        name: String,
    },

    /// A shape with no rendering rule (function pointer, array, ...)
    Unsupported(String),
}

impl CType {
    /// An unqualified named type.
    pub fn named(name: impl Into<String>) -> Self {
        CType::Named {
            qualifiers: Vec::new(),
            name: name.into(),
        }
    }

    /// A named type with qualifiers such as `const`.
    pub fn qualified<I, S>(qualifiers: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CType::Named {
            qualifiers: qualifiers.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }

    /// A pointer to `pointee`.
    pub fn pointer(pointee: CType) -> Self {
        CType::Pointer(Box::new(pointee))
    }

    /// Find the first unsupported shape anywhere in this type.
    pub fn unsupported(&self) -> Option<&str> {
        match self {
            CType::Pointer(inner) => inner.unsupported(),
            CType::Named { .. } => None,
            CType::Unsupported(shape) => Some(shape),
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Pointer(inner) => write!(f, "{}*", inner),
            CType::Named { qualifiers, name } => {
                for q in qualifiers {
                    write!(f, "{} ", q)?;
                }
                write!(f, "{}", name)
            }
            CType::Unsupported(shape) => write!(f, "<{}>", shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctype_display() {
        let ty = CType::pointer(CType::qualified(["const"], "char"));
        assert_eq!(ty.to_string(), "const char*");
        assert_eq!(CType::named("int").to_string(), "int");
    }

    #[test]
    fn test_signature_display() {
        let sig = FunctionSignature::new("g_object_get_name", CType::pointer(CType::named("char")))
            .with_param("self", CType::pointer(CType::named("GObject")))
            .with_param("x", CType::named("int"));

        assert_eq!(sig.to_string(), "char* g_object_get_name(GObject* self, int x)");
    }

    #[test]
    fn test_unsupported_is_found_through_pointers() {
        let ty = CType::pointer(CType::pointer(CType::Unsupported("array".into())));
        assert_eq!(ty.unsupported(), Some("array"));
        assert_eq!(CType::named("int").unsupported(), None);
    }

    #[test]
    fn test_parsed_header_lookup() {
        let mut header = ParsedHeader::new();
        header
            .functions
            .push(FunctionSignature::new("g_free", CType::named("void")));

        assert!(header.function("g_free").is_some());
        assert!(header.function("g_malloc").is_none());
    }
}
