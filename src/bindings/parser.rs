//! C declaration parser for wrapper generation.
//!
//! Works on preprocessed C source (the output of `cpp`) and extracts every
//! function declaration as a [`FunctionSignature`]. Type declarators are
//! reduced to the closed [`CType`] shape; anything without a rendering rule
//! (function pointers, arrays, variadic tails) is kept as
//! [`CType::Unsupported`] so the generator can report it by name.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{CType, FunctionSignature, Param, ParsedHeader};

static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#[^\n]*$").expect("line marker regex is valid"));
static GNU_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:__attribute__|__attribute|__asm__|__asm|asm|__declspec)\s*\(")
        .expect("gnu extension regex is valid")
});
static DROPPED_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:extern|static|inline|__inline|__inline__|register|_Noreturn|_Thread_local|__extension__|__restrict|__restrict__|restrict)\b",
    )
    .expect("keyword regex is valid")
});
static GNU_CONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b__const\b").expect("__const regex is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Builtin type words; a trailing one of these is never a parameter name.
const TYPE_KEYWORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "_Bool",
    "bool", "_Complex",
];

/// Qualifiers that are kept on named types.
const QUALIFIERS: &[&str] = &["const", "volatile"];

/// Elaborated type keywords dropped in front of a tag name.
const TAG_KEYWORDS: &[&str] = &["struct", "union", "enum"];

/// Parser for C function declarations.
#[derive(Debug, Default)]
pub struct HeaderParser {
    /// Functions to include (empty = all)
    include_functions: Vec<String>,
    /// Functions to exclude
    exclude_functions: Vec<String>,
    /// Only keep functions whose name matches
    name_filter: Option<Regex>,
}

impl HeaderParser {
    /// Create a new header parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set functions to include.
    pub fn with_include_functions(mut self, funcs: Vec<String>) -> Self {
        self.include_functions = funcs;
        self
    }

    /// Set functions to exclude.
    pub fn with_exclude_functions(mut self, funcs: Vec<String>) -> Self {
        self.exclude_functions = funcs;
        self
    }

    /// Only keep functions whose name matches `filter`.
    pub fn with_name_filter(mut self, filter: Option<Regex>) -> Self {
        self.name_filter = filter;
        self
    }

    /// Parse source content.
    pub fn parse_content(&self, content: &str) -> ParsedHeader {
        let mut header = ParsedHeader::new();
        let cleaned = self.preprocess(content);

        for statement in split_statements(&cleaned) {
            if !looks_like_function(&statement) {
                continue;
            }

            match parse_declaration(&statement) {
                Ok(sig) => {
                    if self.should_include_function(&sig.name) {
                        tracing::debug!("found function `{}`", sig.name);
                        header.functions.push(sig);
                    }
                }
                Err(reason) => {
                    tracing::debug!("skipping `{}`: {}", statement, reason);
                    header.skipped.push(statement);
                }
            }
        }

        header
    }

    /// Remove everything the declarator parser has no use for.
    fn preprocess(&self, content: &str) -> String {
        let content = LINE_MARKER.replace_all(content, " ");
        let content = strip_comments(&content);
        let content = strip_gnu_calls(&content);
        let content = DROPPED_KEYWORDS.replace_all(&content, " ");
        let content = GNU_CONST.replace_all(&content, "const");
        WHITESPACE.replace_all(&content, " ").trim().to_string()
    }

    /// Check if a function should be included.
    fn should_include_function(&self, name: &str) -> bool {
        if self.exclude_functions.iter().any(|e| e == name) {
            return false;
        }

        if let Some(ref filter) = self.name_filter {
            if !filter.is_match(name) {
                return false;
            }
        }

        if self.include_functions.is_empty() {
            return true;
        }

        self.include_functions.iter().any(|i| i == name)
    }
}

/// Replace comments with a space. String and character literals are copied
/// through untouched, so `"http://..."` survives.
fn strip_comments(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let end = match (bytes[i], bytes.get(i + 1)) {
            (b'"' | b'\'', _) => {
                i = skip_literal(bytes, i) + 1;
                continue;
            }
            (b'/', Some(b'*')) => content[i + 2..]
                .find("*/")
                .map_or(bytes.len(), |p| i + 2 + p + 2),
            (b'/', Some(b'/')) => content[i..].find('\n').map_or(bytes.len(), |p| i + p),
            _ => {
                i += 1;
                continue;
            }
        };

        out.push_str(&content[copied..i]);
        out.push(' ');
        copied = end;
        i = end;
    }

    out.push_str(&content[copied.min(bytes.len())..]);
    out
}

/// Remove `__attribute__((...))`, `__asm__(...)` and friends, including
/// their balanced argument lists. An unbalanced call is left in place.
fn strip_gnu_calls(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(m) = GNU_CALL.find(rest) {
        // The match ends just past the opening parenthesis.
        let open = m.end() - 1;
        let Some(close) = matching_close(rest.as_bytes(), open, b'(', b')') else {
            tracing::debug!("unbalanced `{}` left in place", m.as_str().trim_end_matches('('));
            break;
        };
        out.push_str(&rest[..m.start()]);
        out.push(' ');
        rest = &rest[close..];
    }

    out.push_str(rest);
    out
}

/// Index just past the delimiter closing the one at `open`, skipping string
/// and character literals. `None` if it is never closed.
fn matching_close(bytes: &[u8], open: usize, left: u8, right: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_literal(bytes, i),
            c if c == left => depth += 1,
            c if c == right => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Index of the quote closing the literal opened at `start`.
fn skip_literal(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            c if c == quote => return i,
            _ => {}
        }
        i += 1;
    }

    bytes.len()
}

/// Split cleaned source into top-level statements.
///
/// Function bodies are dropped; the declaration in front of a body becomes
/// a statement of its own. Aggregate bodies stay inside their statement.
fn split_statements(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut paren = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => paren += 1,
            b')' => paren = paren.saturating_sub(1),
            b'"' | b'\'' => i = skip_literal(bytes, i),
            b';' if paren == 0 => {
                statements.push(text[start..i].trim().to_string());
                start = i + 1;
            }
            b'{' if paren == 0 => {
                let Some(end) = matching_close(bytes, i, b'{', b'}') else {
                    // Unterminated body: keep the rest as one statement.
                    break;
                };
                let head = text[start..i].trim();
                if head.ends_with(')') {
                    statements.push(head.to_string());
                    start = end;
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        statements.push(text[start..].trim().to_string());
    }

    statements.retain(|s| !s.is_empty());
    statements
}

/// Cheap filter before tokenizing.
fn looks_like_function(statement: &str) -> bool {
    statement.contains('(')
        && !statement.contains('{')
        && !statement.starts_with("typedef ")
        && !statement.contains('=')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Star,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Ellipsis,
    Other(char),
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(word));
            }
            '*' => tokens.push(Token::Star),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '[' => tokens.push(Token::LBracket),
            ']' => tokens.push(Token::RBracket),
            ',' => tokens.push(Token::Comma),
            '.' => {
                if chars.peek() == Some(&'.') {
                    chars.next();
                    if chars.peek() == Some(&'.') {
                        chars.next();
                    }
                    tokens.push(Token::Ellipsis);
                } else {
                    tokens.push(Token::Other('.'));
                }
            }
            other => tokens.push(Token::Other(other)),
        }
    }

    tokens
}

/// Parse one `<specifiers> name(<params>)` statement.
fn parse_declaration(statement: &str) -> Result<FunctionSignature, String> {
    let tokens = tokenize(statement);

    let open = tokens
        .iter()
        .position(|t| *t == Token::LParen)
        .ok_or("no parameter list")?;

    let name = match open.checked_sub(1).map(|i| &tokens[i]) {
        Some(Token::Ident(name)) if !is_type_word(name) => name.clone(),
        _ => return Err("not a plain function declarator".to_string()),
    };

    let close = matching_token(&tokens, open).ok_or("unbalanced parameter list")?;
    if close + 1 != tokens.len() {
        return Err("unexpected tokens after parameter list".to_string());
    }

    let return_type = parse_type(&tokens[..open - 1]).ok_or("missing return type")?;
    let params = parse_params(&tokens[open + 1..close]);

    Ok(FunctionSignature {
        name,
        return_type,
        params,
    })
}

fn matching_token(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_type_word(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word) || QUALIFIERS.contains(&word) || TAG_KEYWORDS.contains(&word)
}

/// Build a [`CType`] from specifier and abstract declarator tokens.
///
/// Returns `None` when no base type name is present.
fn parse_type(tokens: &[Token]) -> Option<CType> {
    let mut qualifiers: Vec<String> = Vec::new();
    let mut names: Vec<&str> = Vec::new();
    let mut stars = 0usize;

    for token in tokens {
        match token {
            Token::Ident(word) if QUALIFIERS.contains(&word.as_str()) => {
                // Qualifiers on the pointer itself have no rendering.
                if stars == 0 && !qualifiers.contains(word) {
                    qualifiers.push(word.clone());
                }
            }
            Token::Ident(word) if TAG_KEYWORDS.contains(&word.as_str()) => {}
            Token::Ident(word) if stars == 0 => names.push(word),
            Token::Star => stars += 1,
            Token::LParen | Token::RParen => {
                return Some(CType::Unsupported("function pointer".to_string()))
            }
            Token::LBracket | Token::RBracket => {
                return Some(CType::Unsupported("array".to_string()))
            }
            other => return Some(CType::Unsupported(format!("unexpected token {:?}", other))),
        }
    }

    if names.is_empty() {
        return None;
    }

    let mut ty = CType::Named {
        qualifiers,
        name: names.join(" "),
    };
    for _ in 0..stars {
        ty = CType::pointer(ty);
    }
    Some(ty)
}

fn parse_params(tokens: &[Token]) -> Vec<Param> {
    if tokens.is_empty() || matches!(tokens, [Token::Ident(v)] if v == "void") {
        return Vec::new();
    }

    split_params(tokens).into_iter().map(parse_param).collect()
}

fn split_params(tokens: &[Token]) -> Vec<&[Token]> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen | Token::LBracket => depth += 1,
            Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                groups.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&tokens[start..]);

    groups
}

fn parse_param(tokens: &[Token]) -> Param {
    if tokens == [Token::Ellipsis] {
        return Param::new("...", CType::Unsupported("variadic arguments".to_string()));
    }

    if let Some(open) = tokens.iter().position(|t| *t == Token::LParen) {
        // `ret (*name)(args)`
        let name = match tokens.get(open + 1..open + 4) {
            Some([Token::Star, Token::Ident(name), Token::RParen]) => name.clone(),
            _ => String::new(),
        };
        return Param::new(name, CType::Unsupported("function pointer".to_string()));
    }

    if let Some(open) = tokens.iter().position(|t| *t == Token::LBracket) {
        let name = match open.checked_sub(1).map(|i| &tokens[i]) {
            Some(Token::Ident(name)) if !is_type_word(name) && open > 1 => name.clone(),
            _ => String::new(),
        };
        return Param::new(name, CType::Unsupported("array".to_string()));
    }

    let (name, type_tokens) = match tokens.split_last() {
        Some((Token::Ident(name), rest))
            if !is_type_word(name) && rest.iter().any(is_type_part) =>
        {
            (name.clone(), rest)
        }
        _ => (String::new(), tokens),
    };

    let ty = parse_type(type_tokens)
        .unwrap_or_else(|| CType::Unsupported("missing parameter type".to_string()));

    Param::new(name, ty)
}

/// Whether a token can carry a type name (so a following identifier is a
/// declarator name rather than the type itself).
fn is_type_part(token: &Token) -> bool {
    match token {
        Token::Ident(word) => {
            !QUALIFIERS.contains(&word.as_str()) && !TAG_KEYWORDS.contains(&word.as_str())
        }
        Token::Star => true,
        _ => false,
    }
}
