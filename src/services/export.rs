//! Saving downloaded exports to disk.

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name the service suggests for JSON exports.
pub const EXPORT_FILE_NAME: &str = "mcq_questions.json";

const MAX_SUFFIX: u32 = 999;

/// Write `bytes` into `dir` without overwriting an earlier export.
///
/// The first free name of `mcq_questions.json`, `mcq_questions (1).json`, ...
/// is used. Returns the path written.
pub fn save_export(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

    for n in 0..=MAX_SUFFIX {
        let path = dir.join(candidate_name(n));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(bytes)
                    .with_context(|| format!("Failed to write export: {:?}", path))?;
                info!("Saved export ({} bytes) to {:?}", bytes.len(), path);
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create export: {:?}", path));
            }
        }
    }

    bail!("Too many existing exports in {:?}", dir)
}

fn candidate_name(n: u32) -> String {
    if n == 0 {
        EXPORT_FILE_NAME.to_string()
    } else {
        format!("mcq_questions ({}).json", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_exports_are_kept() {
        let temp_dir = TempDir::new().unwrap();

        let first = save_export(temp_dir.path(), b"[1]").unwrap();
        let second = save_export(temp_dir.path(), b"[2]").unwrap();
        let third = save_export(temp_dir.path(), b"[3]").unwrap();

        assert_eq!(first.file_name().unwrap(), "mcq_questions.json");
        assert_eq!(second.file_name().unwrap(), "mcq_questions (1).json");
        assert_eq!(third.file_name().unwrap(), "mcq_questions (2).json");
        assert_eq!(std::fs::read(&first).unwrap(), b"[1]");
        assert_eq!(std::fs::read(&third).unwrap(), b"[3]");
    }

    #[test]
    fn test_missing_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports").join("today");

        let path = save_export(&dir, b"{}").unwrap();
        assert!(path.starts_with(&dir));
    }
}
