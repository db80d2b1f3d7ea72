//! Wrapper stub generator.
//!
//! Each C function becomes a method-style stub whose first parameter is
//! replaced by the receiver:
//!
//! ```text
//! pub fn objectGetName(self: Self, x: c_int) *char {
//! 	return C.g_object_get_name(self.raw, x);
//! }
//! ```

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::naming::{strip_literal_prefix, to_camel};
use super::type_map::TypeMap;
use crate::bindings::{CType, FunctionSignature};
use crate::util::diagnostic::Diagnostic;

/// Naming and rendering knobs for [`render_wrapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperOptions {
    /// Literal prefixes removed from the C name, first match wins
    pub strip_prefixes: Vec<String>,
    /// Name of the receiver parameter
    pub receiver: String,
    /// Type of the receiver parameter
    pub receiver_type: String,
    /// Field of the receiver holding the raw C handle
    pub raw_field: String,
    /// Namespace the C functions are imported under
    pub namespace: String,
    pub type_map: TypeMap,
}

impl Default for WrapperOptions {
    fn default() -> Self {
        WrapperOptions {
            strip_prefixes: vec!["g_".to_string(), "gi_".to_string()],
            receiver: "self".to_string(),
            receiver_type: "Self".to_string(),
            raw_field: "raw".to_string(),
            namespace: "C".to_string(),
            type_map: TypeMap::default(),
        }
    }
}

/// Error while rendering a wrapper stub.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum WrapperError {
    #[error("cannot wrap `{function}`: {declaration} has an unsupported type shape ({shape})")]
    #[diagnostic(
        code(gibind::wrapper::unsupported_type),
        help("write this wrapper by hand or leave `{function}` out with `--exclude`")
    )]
    UnsupportedType {
        function: String,
        declaration: String,
        shape: String,
    },

    #[error("cannot wrap `{function}`: it takes no parameters to use as the receiver")]
    #[diagnostic(
        code(gibind::wrapper::missing_receiver),
        help("only functions taking the wrapped handle as their first argument can become methods")
    )]
    MissingReceiver { function: String },
}

impl WrapperError {
    /// The C function the error is about.
    pub fn function(&self) -> &str {
        match self {
            WrapperError::UnsupportedType { function, .. } => function,
            WrapperError::MissingReceiver { function } => function,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            WrapperError::UnsupportedType { function, .. } => diag
                .with_context("function pointers, arrays and variadic arguments have no stub form")
                .with_suggestion(format!("Exclude it: `--exclude {}`", function))
                .with_suggestion("Pass `--keep-going` to skip functions that cannot be wrapped"),
            WrapperError::MissingReceiver { function } => diag
                .with_suggestion(format!("Exclude it: `--exclude {}`", function))
                .with_suggestion("Pass `--keep-going` to skip functions that cannot be wrapped"),
        }
    }
}

/// Stubs rendered from a batch of signatures.
#[derive(Debug, Default)]
pub struct RenderedWrappers {
    /// Rendered stubs, in input order
    pub stubs: Vec<String>,
    /// Signatures left out because they could not be wrapped
    pub skipped: Vec<WrapperError>,
}

/// The stub name for a C function: prefix stripped, camel cased.
pub fn wrapper_name<S: AsRef<str>>(c_name: &str, strip_prefixes: &[S]) -> String {
    to_camel(strip_literal_prefix(c_name, strip_prefixes))
}

/// Render a C type in the target syntax.
///
/// Pointers render as `*` followed by the pointee; named types as their
/// qualifiers followed by the mapped base name. On failure the unsupported
/// shape description is returned.
pub fn render_type(ty: &CType, types: &TypeMap) -> Result<String, String> {
    match ty {
        CType::Pointer(inner) => Ok(format!("*{}", render_type(inner, types)?)),
        CType::Named { qualifiers, name } => {
            let mut parts: Vec<&str> = qualifiers.iter().map(String::as_str).collect();
            parts.push(types.map(name));
            Ok(parts.join(" "))
        }
        CType::Unsupported(shape) => Err(shape.clone()),
    }
}

/// Render one wrapper stub for `signature`.
///
/// The first parameter is replaced by the receiver and its raw handle is
/// passed in its place; the rest are forwarded by name. Any type without a
/// rendering rule fails the whole stub.
pub fn render_wrapper(
    signature: &FunctionSignature,
    options: &WrapperOptions,
) -> Result<String, WrapperError> {
    let function = &signature.name;
    let unsupported = |declaration: String, shape: String| WrapperError::UnsupportedType {
        function: function.clone(),
        declaration,
        shape,
    };

    let return_type = render_type(&signature.return_type, &options.type_map)
        .map_err(|shape| unsupported("return type".to_string(), shape))?;

    if signature.params.is_empty() {
        return Err(WrapperError::MissingReceiver {
            function: function.clone(),
        });
    }

    let mut decls = vec![format!("{}: {}", options.receiver, options.receiver_type)];
    let mut args = vec![format!("{}.{}", options.receiver, options.raw_field)];

    for (index, param) in signature.params.iter().enumerate() {
        let ty = render_type(&param.ty, &options.type_map).map_err(|shape| {
            let declaration = if param.name.is_empty() {
                format!("parameter #{}", index + 1)
            } else {
                format!("parameter `{}`", param.name)
            };
            unsupported(declaration, shape)
        })?;

        if index == 0 {
            continue;
        }

        // Unnamed params and ones shadowing the receiver get a positional name
        let name = if param.name.is_empty() || param.name == options.receiver {
            format!("arg{}", index)
        } else {
            param.name.clone()
        };
        decls.push(format!("{}: {}", name, ty));
        args.push(name);
    }

    Ok(format!(
        "pub fn {}({}) {} {{\n\treturn {}.{}({});\n}}",
        wrapper_name(function, &options.strip_prefixes),
        decls.join(", "),
        return_type,
        options.namespace,
        function,
        args.join(", ")
    ))
}

/// Render every signature in order.
///
/// Without `keep_going` the first failure is returned and nothing else is.
/// With it, failing signatures are collected in
/// [`RenderedWrappers::skipped`] and rendering continues.
pub fn render_wrappers<'a, I>(
    signatures: I,
    options: &WrapperOptions,
    keep_going: bool,
) -> Result<RenderedWrappers, WrapperError>
where
    I: IntoIterator<Item = &'a FunctionSignature>,
{
    let mut rendered = RenderedWrappers::default();

    for signature in signatures {
        match render_wrapper(signature, options) {
            Ok(stub) => rendered.stubs.push(stub),
            Err(e) if keep_going => {
                tracing::warn!("{}", e);
                rendered.skipped.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_name() -> FunctionSignature {
        FunctionSignature::new("g_object_get_name", CType::pointer(CType::named("char")))
            .with_param("self", CType::pointer(CType::named("GObject")))
            .with_param("x", CType::named("int"))
    }

    fn rendered_params(stub: &str) -> Vec<String> {
        let open = stub.find('(').unwrap();
        let close = stub.find(')').unwrap();
        stub[open + 1..close]
            .split(", ")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_render_object_get_name() {
        let stub = render_wrapper(&get_name(), &WrapperOptions::default()).unwrap();

        assert_eq!(
            stub,
            "pub fn objectGetName(self: Self, x: c_int) *char {\n\treturn C.g_object_get_name(self.raw, x);\n}"
        );
    }

    #[test]
    fn test_param_count_is_preserved() {
        let options = WrapperOptions::default();
        let mut sig = FunctionSignature::new("gi_info_do", CType::named("void"))
            .with_param("info", CType::pointer(CType::named("GIBaseInfo")));

        for n in 1..5 {
            let stub = render_wrapper(&sig, &options).unwrap();
            assert_eq!(rendered_params(&stub).len(), n);
            assert!(stub.starts_with("pub fn infoDo(self: Self"));
            sig = sig.with_param(format!("p{}", n), CType::named("gint"));
        }
    }

    #[test]
    fn test_render_type() {
        let types = TypeMap::default();
        let ty = CType::pointer(CType::pointer(CType::qualified(["const"], "gchar")));
        assert_eq!(render_type(&ty, &types).unwrap(), "**const gchar");
        assert_eq!(render_type(&CType::named("unsigned int"), &types).unwrap(), "c_uint");
        assert_eq!(
            render_type(&CType::Unsupported("array".into()), &types).unwrap_err(),
            "array"
        );
    }

    #[test]
    fn test_exact_prefix_removal() {
        let prefixes = ["g_", "gi_"];
        assert_eq!(wrapper_name("g_get_prgname", &prefixes), "getPrgname");
        assert_eq!(wrapper_name("gi_base_info_ref", &prefixes), "baseInfoRef");
        assert_eq!(wrapper_name("gtk_widget_show", &prefixes), "gtkWidgetShow");
    }

    #[test]
    fn test_unsupported_param_names_declaration() {
        let sig = FunctionSignature::new("g_list_foreach", CType::named("void"))
            .with_param("list", CType::pointer(CType::named("GList")))
            .with_param("func", CType::Unsupported("function pointer".into()));

        let err = render_wrapper(&sig, &WrapperOptions::default()).unwrap_err();
        match &err {
            WrapperError::UnsupportedType {
                function,
                declaration,
                shape,
            } => {
                assert_eq!(function, "g_list_foreach");
                assert_eq!(declaration, "parameter `func`");
                assert_eq!(shape, "function pointer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.function(), "g_list_foreach");
    }

    #[test]
    fn test_unsupported_return_type() {
        let sig = FunctionSignature::new(
            "g_weird",
            CType::pointer(CType::Unsupported("array".into())),
        )
        .with_param("self", CType::pointer(CType::named("GObject")));

        let err = render_wrapper(&sig, &WrapperOptions::default()).unwrap_err();
        assert!(err.to_string().contains("return type"));
    }

    #[test]
    fn test_missing_receiver() {
        let sig = FunctionSignature::new("g_type_init", CType::named("void"));
        let err = render_wrapper(&sig, &WrapperOptions::default()).unwrap_err();
        assert!(matches!(err, WrapperError::MissingReceiver { .. }));
    }

    #[test]
    fn test_unnamed_params_get_synthetic_names() {
        let sig = FunctionSignature::new("g_hash", CType::named("guint"))
            .with_param("", CType::pointer(CType::named("GHashTable")))
            .with_param("", CType::named("int"));

        let stub = render_wrapper(&sig, &WrapperOptions::default()).unwrap();
        assert!(stub.contains("(self: Self, arg1: c_int)"));
        assert!(stub.contains("C.g_hash(self.raw, arg1)"));
    }

    #[test]
    fn test_param_named_like_receiver_is_renamed() {
        let sig = FunctionSignature::new("g_object_bind", CType::named("void"))
            .with_param("source", CType::pointer(CType::named("GObject")))
            .with_param("self", CType::pointer(CType::named("GObject")))
            .with_param("flags", CType::named("guint"));

        let stub = render_wrapper(&sig, &WrapperOptions::default()).unwrap();
        assert_eq!(
            stub,
            "pub fn objectBind(self: Self, arg1: *GObject, flags: guint) void {\n\treturn C.g_object_bind(self.raw, arg1, flags);\n}"
        );

        let options = WrapperOptions {
            receiver: "this".to_string(),
            ..Default::default()
        };
        let stub = render_wrapper(&sig, &options).unwrap();
        assert!(stub.contains("(this: Self, self: *GObject, flags: guint)"));
    }

    #[test]
    fn test_custom_receiver() {
        let options = WrapperOptions {
            receiver: "this".to_string(),
            receiver_type: "*Object".to_string(),
            raw_field: "handle".to_string(),
            namespace: "c".to_string(),
            type_map: TypeMap::identity(),
            ..Default::default()
        };
        let stub = render_wrapper(&get_name(), &options).unwrap();
        assert_eq!(
            stub,
            "pub fn objectGetName(this: *Object, x: int) *char {\n\treturn c.g_object_get_name(this.handle, x);\n}"
        );
    }

    #[test]
    fn test_render_wrappers_aborts_or_keeps_going() {
        let bad = FunctionSignature::new("g_bad", CType::named("void"));
        let sigs = vec![get_name(), bad, get_name()];
        let options = WrapperOptions::default();

        let err = render_wrappers(&sigs, &options, false).unwrap_err();
        assert_eq!(err.function(), "g_bad");

        let rendered = render_wrappers(&sigs, &options, true).unwrap();
        assert_eq!(rendered.stubs.len(), 2);
        assert_eq!(rendered.skipped.len(), 1);
    }
}
