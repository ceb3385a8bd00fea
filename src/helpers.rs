//! Shared helpers for trashinfo naming, timestamps, and path escaping.

use chrono::{DateTime, Local};
use std::path::{Path, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use std::time::SystemTime;

/// File extension used by trash info files.
pub const TRASHINFO_EXTENSION: &str = ".trashinfo";

/// Deletion date format commonly used by Trash info metadata.
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns a user-safe, trimmed path string that can be used in messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Serializes a wall-clock instant into the deletion-date format, local time,
/// second granularity.
pub fn serialize_deletion_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TRASHINFO_TIME_FORMAT)
        .to_string()
}

/// Builds the fixed prefix of a trashinfo record name: `<basename>.<now>.`.
/// The unique random token and the extension are appended at creation time.
pub fn info_file_prefix(original: &Path, now: &str) -> String {
    let base = original
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("item");
    format!("{base}.{now}.")
}

/// Percent-encodes every segment of a path and rejoins them with the path
/// separator, so reserved characters (the separator included) survive a later
/// parse of the record.
pub fn escape_path_segments(path: &Path) -> String {
    path.to_string_lossy()
        .split(MAIN_SEPARATOR)
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR)
}
