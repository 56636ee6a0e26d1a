use std::{fs, io::Read, path::Path};

use anyhow::Context;

/// Resolves the input text: inline `--data`, a `--input` file, or stdin.
pub(crate) fn read_input(data: Option<&str>, input: Option<&Path>) -> anyhow::Result<String> {
    if let Some(data) = data {
        return Ok(data.to_string());
    }
    if let Some(path) = input {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}
