//! Identifier casing helpers shared by the enum and wrapper generators.

/// Uppercase the first character of `word` and lowercase the rest.
///
/// `"VOID"` becomes `"Void"`, `"int8"` becomes `"Int8"`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Convert an underscore separated word list to PascalCase.
///
/// Every piece is passed through [`capitalize`]; empty pieces (from leading,
/// trailing or doubled underscores) contribute nothing.
pub fn to_pascal(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Convert an underscore separated word list to camelCase.
///
/// Underscores are dropped and the character following each one is
/// uppercased. All other characters are kept as they are, so input without
/// underscores comes back unchanged.
pub fn to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;

    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Remove the first matching literal prefix from `name`.
///
/// Prefixes are tried in order. Returns `name` untouched if none match.
pub fn strip_literal_prefix<'a, S: AsRef<str>>(name: &'a str, prefixes: &[S]) -> &'a str {
    prefixes
        .iter()
        .find_map(|p| name.strip_prefix(p.as_ref()))
        .unwrap_or(name)
}

/// Whether `ident` can be used as a bare identifier in the generated source.
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Quote `ident` with `@"..."` when it is not a plain identifier.
pub fn escape_identifier(ident: &str) -> String {
    if is_plain_identifier(ident) {
        ident.to_string()
    } else {
        format!("@\"{}\"", ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("VOID"), "Void");
        assert_eq!(capitalize("gtype"), "Gtype");
        assert_eq!(capitalize("INT8"), "Int8");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_to_pascal() {
        assert_eq!(to_pascal("_VOID"), "Void");
        assert_eq!(to_pascal("GHASH"), "Ghash");
        assert_eq!(to_pascal("_UNI_CHAR"), "UniChar");
        assert_eq!(to_pascal("a__b_"), "AB");
    }

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("object_get_name"), "objectGetName");
        assert_eq!(to_camel("base_info_get_type"), "baseInfoGetType");
        assert_eq!(to_camel("ref"), "ref");
        // Only the first letter of each word is touched.
        assert_eq!(to_camel("get_GType"), "getGType");
    }

    #[test]
    fn test_to_camel_idempotent_without_underscores() {
        for input in ["objectGetName", "ref", "XMLParser", "a1b2", ""] {
            let once = to_camel(input);
            assert_eq!(once, input);
            assert_eq!(to_camel(&once), once);
        }
        let converted = to_camel("g_object_unref");
        assert_eq!(to_camel(&converted), converted);
    }

    #[test]
    fn test_strip_literal_prefix() {
        let prefixes = ["g_", "gi_"];
        assert_eq!(strip_literal_prefix("g_object_get_name", &prefixes), "object_get_name");
        assert_eq!(strip_literal_prefix("gi_base_info_ref", &prefixes), "base_info_ref");
        assert_eq!(strip_literal_prefix("other_fn", &prefixes), "other_fn");
    }

    #[test]
    fn test_strip_literal_prefix_does_not_overstrip() {
        // A character-set strip of "g_" would also eat the leading 'g' of "get".
        let prefixes = ["g_"];
        assert_eq!(strip_literal_prefix("g_get_prgname", &prefixes), "get_prgname");
        assert_eq!(strip_literal_prefix("gtk_init", &prefixes), "gtk_init");
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("Void"), "Void");
        assert_eq!(escape_identifier("8bit"), "@\"8bit\"");
        assert!(!is_plain_identifier(""));
    }
}
