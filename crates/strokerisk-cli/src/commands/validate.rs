use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::Value;
use strokerisk_core::validation::{Shape, validate};

/// Validates a JSON object file and prints the coerced value or every
/// field error.
pub fn run(shape: Shape, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let Value::Object(candidate) = value else {
        bail!("{} must contain a JSON object", file.display());
    };

    match validate(shape, &candidate) {
        Ok(parsed) => {
            println!("{}", format!("✓ valid {}", shape).green());
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Err(errors) => {
            println!("{}", format!("✗ invalid {}", shape).red());
            for error in errors.iter() {
                println!("  {}: {}", error.field.bold(), error.message);
            }
            bail!("{} field error(s)", errors.len())
        }
    }
}
