//! Filesystem and input helpers.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Read everything from `reader` until end of stream.
pub fn read_all(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("failed to read standard input")?;
    Ok(buf)
}

/// Input text given inline, or standard input when absent.
pub fn inline_or_stdin(inline: Option<String>) -> Result<String> {
    match inline {
        Some(text) => Ok(text),
        None => read_all(io::stdin().lock()),
    }
}

/// Contents of `path`, or standard input for `-` or no path.
pub fn file_or_stdin(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => read_to_string(p),
        _ => read_all(io::stdin().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/nested/expanded.c");

        write_string(&path, "int x;\n").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_to_string(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }

    #[test]
    fn test_read_all() {
        let text = read_all("GI_TYPE_TAG_VOID\n".as_bytes()).unwrap();
        assert_eq!(text, "GI_TYPE_TAG_VOID\n");
    }

    #[test]
    fn test_inline_input_wins() {
        let text = inline_or_stdin(Some("void g_free(void *p);".to_string())).unwrap();
        assert_eq!(text, "void g_free(void *p);");
    }

    #[test]
    fn test_file_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tags.txt");
        std::fs::write(&path, "GI_A\n").unwrap();

        assert_eq!(file_or_stdin(Some(&path)).unwrap(), "GI_A\n");
    }
}
