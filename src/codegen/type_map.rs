//! Mapping from C base type names to target type names.

use std::collections::BTreeMap;

/// C builtin spellings and their C-ABI counterparts in the target syntax.
const BUILTIN: &[(&str, &str)] = &[
    ("int", "c_int"),
    ("signed", "c_int"),
    ("signed int", "c_int"),
    ("unsigned", "c_uint"),
    ("unsigned int", "c_uint"),
    ("short", "c_short"),
    ("short int", "c_short"),
    ("signed short", "c_short"),
    ("unsigned short", "c_ushort"),
    ("unsigned short int", "c_ushort"),
    ("long", "c_long"),
    ("long int", "c_long"),
    ("signed long", "c_long"),
    ("unsigned long", "c_ulong"),
    ("unsigned long int", "c_ulong"),
    ("long long", "c_longlong"),
    ("long long int", "c_longlong"),
    ("signed long long", "c_longlong"),
    ("unsigned long long", "c_ulonglong"),
    ("unsigned long long int", "c_ulonglong"),
    ("long double", "c_longdouble"),
    ("float", "f32"),
    ("double", "f64"),
    ("_Bool", "bool"),
];

/// Base type name translation table.
///
/// Names without an entry are rendered unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    entries: BTreeMap<String, String>,
}

impl Default for TypeMap {
    fn default() -> Self {
        TypeMap {
            entries: BUILTIN
                .iter()
                .map(|(c, target)| (c.to_string(), target.to_string()))
                .collect(),
        }
    }
}

impl TypeMap {
    /// A table with no entries; every name renders as written.
    pub fn identity() -> Self {
        TypeMap {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace mappings (later entries win).
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Translate a base type name.
    pub fn map<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mappings() {
        let map = TypeMap::default();
        assert_eq!(map.map("int"), "c_int");
        assert_eq!(map.map("unsigned long"), "c_ulong");
        assert_eq!(map.map("char"), "char");
        assert_eq!(map.map("GObject"), "GObject");
    }

    #[test]
    fn test_extra_entries_override() {
        let map = TypeMap::default().with_entries([("gboolean", "bool"), ("int", "i32")]);
        assert_eq!(map.map("gboolean"), "bool");
        assert_eq!(map.map("int"), "i32");
    }

    #[test]
    fn test_identity() {
        assert_eq!(TypeMap::identity().map("int"), "int");
    }
}
