//! Attendance history JSON reading and writing.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use crate::errors::StoreError;
use crate::models::{AttendanceRecord, AttendanceSummary};

/// Read the history file.
///
/// A missing or blank file is an empty history. Content that is not a JSON
/// array is moved aside to a `.corrupt-<timestamp>` sibling and yields an empty
/// history. Records that do not decode are skipped; the file is copied to the
/// same backup name first, since the next write drops them.
pub fn read_history(path: &Path) -> Result<Vec<AttendanceRecord>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw = match serde_json::from_str::<Vec<Value>>(&text) {
        Ok(raw) => raw,
        Err(parse_err) => {
            let backup = backup_path(path);
            tracing::warn!(
                "History file {:?} is corrupt ({}); moving it to {:?}",
                path,
                parse_err,
                backup
            );
            fs::rename(path, &backup).map_err(|e| StoreError::io(path, e))?;
            return Ok(Vec::new());
        }
    };

    let total = raw.len();
    let mut records = Vec::with_capacity(total);
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<AttendanceRecord>(value) {
            Ok(mut record) => {
                record.summary = AttendanceSummary::from_entries(&record.entries);
                records.push(record);
            }
            Err(e) => tracing::warn!("Skipping history record {} in {:?}: {}", index, path, e),
        }
    }

    if records.len() < total {
        let backup = backup_path(path);
        tracing::warn!(
            "{} of {} history records unreadable; copying {:?} to {:?}",
            total - records.len(),
            total,
            path,
            backup
        );
        fs::copy(path, &backup).map_err(|e| StoreError::io(path, e))?;
    }

    Ok(records)
}

/// Rewrite the whole history file.
pub fn write_history(path: &Path, records: &[AttendanceRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::json(path, e))?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

fn backup_path(path: &Path) -> PathBuf {
    let suffix = Utc::now().format("%Y%m%d%H%M%S");
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".corrupt-{}", suffix));
    PathBuf::from(name)
}
