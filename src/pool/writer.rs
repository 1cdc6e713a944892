//! Writing imported records into a pool directory.
//!
//! Records land in the pool's per-kind directories:
//!
//! ```text
//! <pool>/units/<name>.json
//! <pool>/entities/<name>.json
//! <pool>/parts/<name>.json
//! ```
//!
//! All three records are serialised and all three target paths checked
//! before the first file is created. Each record is staged in a temporary
//! file next to its target and only moved into place once fully written;
//! existing files are never overwritten. If a later record fails, records
//! already placed by this call are removed.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::import::{ImportError, ImportResult, ImportedRecords};

/// Directory of unit records inside a pool.
pub const UNITS_DIR: &str = "units";
/// Directory of entity records inside a pool.
pub const ENTITIES_DIR: &str = "entities";
/// Directory of part records inside a pool.
pub const PARTS_DIR: &str = "parts";

/// Paths of the files written for one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRecords {
    /// Unit record file.
    pub unit: PathBuf,
    /// Entity record file.
    pub entity: PathBuf,
    /// Part record file.
    pub part: PathBuf,
}

/// Turns a record name into a file name.
///
/// Characters that are not portable in file names are replaced by `_`.
#[must_use]
pub fn record_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "unnamed".to_string()
    } else {
        stem
    };
    format!("{stem}.json")
}

/// Returns the paths `records` would be written to inside `pool`.
#[must_use]
pub fn record_paths(pool: &Path, records: &ImportedRecords) -> WrittenRecords {
    WrittenRecords {
        unit: pool.join(UNITS_DIR).join(record_file_name(&records.unit.name)),
        entity: pool
            .join(ENTITIES_DIR)
            .join(record_file_name(&records.entity.name)),
        part: pool
            .join(PARTS_DIR)
            .join(record_file_name(records.part.mpn.value())),
    }
}

/// Writes unit, entity and part into `pool`.
///
/// # Errors
///
/// Returns [`ImportError::OutputExists`] if any target file already exists,
/// [`ImportError::Serialize`] if a record cannot be serialised, or
/// [`ImportError::FileWrite`] if a directory or file cannot be written.
pub fn write_records(pool: &Path, records: &ImportedRecords) -> ImportResult<WrittenRecords> {
    let paths = record_paths(pool, records);

    let outputs = [
        (paths.unit.as_path(), to_json("unit", &records.unit)?),
        (paths.entity.as_path(), to_json("entity", &records.entity)?),
        (paths.part.as_path(), to_json("part", &records.part)?),
    ];

    if let Some((path, _)) = outputs.iter().find(|(path, _)| path.exists()) {
        return Err(ImportError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    let mut written: Vec<&Path> = Vec::with_capacity(outputs.len());
    for (path, contents) in &outputs {
        if let Err(e) = write_new(path, contents) {
            for path in written {
                if let Err(cleanup) = std::fs::remove_file(path) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %cleanup,
                        "Failed to remove partially written record"
                    );
                }
            }
            return Err(e);
        }
        tracing::info!(path = %path.display(), "Wrote record");
        written.push(*path);
    }

    Ok(paths)
}

fn to_json<T: Serialize>(record: &'static str, value: &T) -> ImportResult<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|source| ImportError::Serialize { record, source })?;
    json.push('\n');
    Ok(json)
}

/// Writes `contents` to a new file at `path`.
///
/// The staging file is deleted when dropped, so a failed write or a failed
/// persist leaves nothing behind.
fn write_new(path: &Path, contents: &str) -> ImportResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| ImportError::file_write(dir, e))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| ImportError::file_write(dir, e))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| ImportError::file_write(path, e))?;
    staged
        .persist_noclobber(path)
        .map_err(|e| ImportError::file_write(path, e.error))?;
    Ok(())
}
