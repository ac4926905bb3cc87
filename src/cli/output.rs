//! Catalog serialization.
//!
//! The catalog is a JSON array of surviving descriptors in first-seen order,
//! pretty-printed with two-space indentation.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::core::MessageDescriptor;

pub fn to_json(messages: &[MessageDescriptor]) -> Result<String> {
    serde_json::to_string_pretty(messages).context("Failed to serialize messages")
}

/// Write the catalog to `out_file`, creating parent directories as needed.
pub fn write_file(messages: &[MessageDescriptor], out_file: &Path) -> Result<()> {
    if let Some(parent) = out_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(out_file, to_json(messages)?)
        .with_context(|| format!("Failed to write file: {}", out_file.display()))
}

/// Write the catalog followed by a newline.
pub fn write_to<W: Write>(messages: &[MessageDescriptor], writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", to_json(messages)?).context("Failed to write messages")
}

pub fn write_stdout(messages: &[MessageDescriptor]) -> Result<()> {
    write_to(messages, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<MessageDescriptor> {
        vec![MessageDescriptor::new("hello", "a.ts").with_default_message("Hi")]
    }

    #[test]
    fn test_write_to_appends_newline() {
        let mut output = Vec::new();
        write_to(&sample(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"hello\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn test_empty_catalog() {
        let mut output = Vec::new();
        write_to(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_file_creates_directories() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("lang").join("en.json");

        write_file(&sample(), &out).unwrap();

        let written: Vec<MessageDescriptor> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, sample());
    }
}
