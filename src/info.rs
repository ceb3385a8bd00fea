//! Writes the `.trashinfo` sidecar record.

use crate::fs::FileSystem;
use crate::helpers::{escape_path_segments, info_file_prefix, TRASHINFO_EXTENSION};
use std::path::{Path, PathBuf};

/// Creates a uniquely named record under `info_dir` describing where
/// `absolute_path` was deleted from and when, and returns the record's path.
///
/// The record name is `<basename>.<now>.<random>.trashinfo`, collision-free
/// against concurrent and rapid sequential invocations. A record that cannot
/// be fully written is removed again before the error is returned.
pub fn write_trash_info(
    fs: &dyn FileSystem,
    absolute_path: &Path,
    info_dir: &Path,
    now: &str,
) -> crate::Result<PathBuf> {
    let contents = format!(
        "[Trash Info]\nPath={}\nDeletionDate={}\n",
        escape_path_segments(absolute_path),
        now
    );
    fs.create_unique(
        info_dir,
        &info_file_prefix(absolute_path, now),
        TRASHINFO_EXTENSION,
        &contents,
    )
}
