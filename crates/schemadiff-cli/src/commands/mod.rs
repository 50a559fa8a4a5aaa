pub mod columns;
pub mod schema;
pub mod summary;

use schemadiff_core::{ExError, ExErrorKind, SchemaDiffError};
use serde::Serialize;
use std::path::Path;

/// Read an input file; a missing path argument reads as empty input
pub(crate) fn read_input(path: Option<&Path>) -> Result<Vec<u8>, ExError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    std::fs::read(path).map_err(|e| {
        ExError::from(e)
            .with_op("read_input")
            .with_entity_id(path.display().to_string())
    })
}

/// Pretty JSON for `--format json`
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, ExError> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| ExError::from(SchemaDiffError::from(e)).with_op("to_json"))
}

/// Write to `output` if given, stdout otherwise
pub(crate) fn emit(output: Option<&Path>, content: &str) -> Result<(), ExError> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                ExError::from(e)
                    .with_op("emit")
                    .with_entity_id(path.display().to_string())
            })?;
            println!("✓ Written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Error for a required input file that does not exist
pub(crate) fn require_file(path: &Path, op: &str) -> Result<(), ExError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op(op)
            .with_entity_id(path.display().to_string())
            .with_message("input file does not exist"))
    }
}
