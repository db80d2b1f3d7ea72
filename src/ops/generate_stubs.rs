//! Implementation of `gibind stubs` and `gibind parse`.

use anyhow::Result;
use regex::Regex;

use crate::bindings::{HeaderParser, ParsedHeader};
use crate::codegen::{render_wrappers, RenderedWrappers, WrapperOptions};
use crate::ops::preprocess::{preprocess, PreprocessOptions};
use crate::util::diagnostic::suggestions;

/// Options for the stubs command.
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    /// How to expand the input (None = parse it as is)
    pub preprocess: Option<PreprocessOptions>,

    pub wrapper: WrapperOptions,

    /// Functions to include (empty = all)
    pub include: Vec<String>,

    /// Functions to exclude
    pub exclude: Vec<String>,

    /// Only keep functions whose name matches
    pub name_filter: Option<Regex>,

    /// Skip functions that cannot be wrapped instead of failing
    pub keep_going: bool,

    /// Echo the parsed source as comments ahead of the stubs
    pub echo_input: bool,
}

impl StubOptions {
    fn parser(&self) -> HeaderParser {
        HeaderParser::new()
            .with_include_functions(self.include.clone())
            .with_exclude_functions(self.exclude.clone())
            .with_name_filter(self.name_filter.clone())
    }
}

/// Declarations found in one input.
#[derive(Debug, Clone)]
pub struct Declarations {
    /// The source the parser saw (expanded when preprocessing)
    pub source: String,

    pub header: ParsedHeader,
}

/// Everything the stubs command produced.
#[derive(Debug)]
pub struct StubOutput {
    pub declarations: Declarations,

    pub rendered: RenderedWrappers,

    /// Text to print: optional input echo followed by one stub per function
    pub text: String,
}

/// Expand `input` if requested and parse its function declarations.
pub fn collect_declarations(
    input: &str,
    preprocess_opts: Option<&PreprocessOptions>,
    parser: &HeaderParser,
) -> Result<Declarations> {
    let source = match preprocess_opts {
        Some(opts) => preprocess(input, opts)?.expanded,
        None => input.to_string(),
    };

    let header = parser.parse_content(&source);
    tracing::info!(
        "found {} functions ({} declarations skipped)",
        header.functions.len(),
        header.skipped.len()
    );

    Ok(Declarations { source, header })
}

/// Parse declarations with the filters from `opts`.
pub fn parse_declarations(input: &str, opts: &StubOptions) -> Result<Declarations> {
    collect_declarations(input, opts.preprocess.as_ref(), &opts.parser())
}

/// Generate wrapper stubs for every function declared in `input`.
pub fn generate_stubs(input: &str, opts: &StubOptions) -> Result<StubOutput> {
    let declarations = parse_declarations(input, opts)?;
    render_stubs(declarations, opts)
}

/// Render wrapper stubs for already parsed declarations.
pub fn render_stubs(declarations: Declarations, opts: &StubOptions) -> Result<StubOutput> {
    if declarations.header.functions.is_empty() {
        tracing::warn!("no function declarations found");
        tracing::warn!("help: {}", suggestions::NO_FUNCTIONS);
    }

    let rendered = render_wrappers(
        &declarations.header.functions,
        &opts.wrapper,
        opts.keep_going,
    )?;

    let mut text = String::new();
    if opts.echo_input {
        text.push_str(&echo_comment(&declarations.source));
        text.push('\n');
    }
    for stub in &rendered.stubs {
        text.push_str(stub);
        text.push('\n');
    }

    Ok(StubOutput {
        declarations,
        rendered,
        text,
    })
}

/// The parsed source as a `// input:` comment block.
pub fn echo_comment(source: &str) -> String {
    std::iter::once("input: ")
        .chain(source.lines())
        .map(|line| format!("// {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
