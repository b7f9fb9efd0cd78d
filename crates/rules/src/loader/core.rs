//! Core [`RuleSetStore`]: load, back up and atomically write rule-set files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{DedupError, Result};
use crate::schema::RuleSet;

/// Timestamp format used in backup file names.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Filesystem access for rule-set documents.
pub struct RuleSetStore {
    /// Directory receiving timestamped copies of input files.
    backup_dir: PathBuf,
}

impl RuleSetStore {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Read and parse a rule-set document.
    pub fn load(&self, path: &Path) -> Result<RuleSet> {
        if !path.exists() {
            return Err(DedupError::InputNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DedupError::InputNotFound(path.to_path_buf()),
            _ => DedupError::Io(e),
        })?;

        let rule_set = RuleSet::from_json_str(&contents)?;
        info!(path = %path.display(), rules = rule_set.rules.len(), "loaded rule-set");
        Ok(rule_set)
    }

    /// Atomically write a rule-set document.
    ///
    /// Writes to a `.tmp` file next to the target first, then renames it over
    /// the final path. Parent directories are created as needed.
    pub fn write(&self, rule_set: &RuleSet, path: &Path) -> Result<()> {
        let json = rule_set.to_json_pretty()?;

        let file_name = path.file_name().ok_or_else(|| {
            DedupError::write_failure(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| DedupError::write_failure(parent, e))?;

        let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
        fs::write(&tmp_path, json).map_err(|e| DedupError::write_failure(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DedupError::write_failure(path, e));
        }

        info!(path = %path.display(), rules = rule_set.rules.len(), "wrote rule-set");
        Ok(())
    }

    /// Copy `input` into the backup directory, stamped with the local time.
    pub fn backup(&self, input: &Path) -> Result<PathBuf> {
        self.backup_at(input, Local::now().naive_local())
    }

    /// Copy `input` into the backup directory under the given timestamp.
    pub fn backup_at(&self, input: &Path, timestamp: NaiveDateTime) -> Result<PathBuf> {
        let name = backup_file_name(input, timestamp).ok_or_else(|| {
            DedupError::write_failure(
                input,
                io::Error::new(io::ErrorKind::InvalidInput, "input path has no file name"),
            )
        })?;

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| DedupError::write_failure(&self.backup_dir, e))?;
        let backup_path = self.backup_dir.join(name);
        fs::copy(input, &backup_path).map_err(|e| DedupError::write_failure(&backup_path, e))?;

        debug!(source = %input.display(), "backup copied");
        info!(path = %backup_path.display(), "created backup");
        Ok(backup_path)
    }
}

/// `<file name>.backup_<YYYY-MM-DD_HH-MM-SS>`, or `None` for paths without a file name.
pub fn backup_file_name(input: &Path, timestamp: NaiveDateTime) -> Option<String> {
    let name = input.file_name()?.to_string_lossy();
    Some(format!(
        "{}.backup_{}",
        name,
        timestamp.format(BACKUP_TIMESTAMP_FORMAT)
    ))
}
