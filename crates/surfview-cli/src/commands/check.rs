//! Batch descriptor validation.

use crate::error::{CliResult, EXIT_ERROR, EXIT_SUCCESS};
use std::fs;
use std::path::{Path, PathBuf};
use surfview::schema::xml;

pub fn run(files: &[PathBuf]) -> CliResult<i32> {
    let mut failed = 0usize;

    for path in files {
        match load_one(path) {
            Ok(summary) => println!("{}: OK ({summary})", path.display()),
            Err(message) => {
                eprintln!("{}: {message}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} documents failed", files.len());
        Ok(EXIT_ERROR)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

// One file, one line; errors are reported per file instead of aborting
// the batch.
fn load_one(path: &Path) -> Result<String, String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let descriptor = xml::load(&source).map_err(|e| e.to_string())?;

    Ok(format!(
        "{}, {} fields, {} versions",
        descriptor.element,
        descriptor.fields.len(),
        descriptor.versions.len()
    ))
}
