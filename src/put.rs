//! Per-argument trash orchestration.

use crate::errors::CoreError;
use crate::fs::FileSystem;
use crate::helpers::TRASHINFO_EXTENSION;
use crate::info::write_trash_info;
use crate::models::{TrashDirectory, TrashedItem};
use crate::mover::move_tree;
use std::path::Path;

/// Trashes one path: the sidecar record is written first, then the payload is
/// moved to the matching name under `files/`.
///
/// When the move fails the record is removed again (best-effort, so the move
/// error is never masked), leaving the trash directory as it was. Arguments
/// are independent; the caller decides how to aggregate failures.
pub fn trash_one(
    fs: &dyn FileSystem,
    path: &Path,
    trash_dir: &TrashDirectory,
    now: &str,
) -> crate::Result<TrashedItem> {
    let original_path = fs.absolute(path)?;

    let info_path = write_trash_info(fs, &original_path, &trash_dir.info_dir, now)
        .map_err(CoreError::metadata_write)?;

    // The payload shares the record's generated name, minus the extension,
    // so a restore tool can pair them.
    let entry_name = info_path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TRASHINFO_EXTENSION))
        .ok_or_else(|| CoreError::InvalidPath(info_path.display().to_string()))?;
    let trashed_path = trash_dir.files_dir.join(entry_name);

    if let Err(err) = move_tree(fs, path, &trashed_path) {
        let _ = fs.remove_file(&info_path);
        return Err(CoreError::move_failed(err));
    }

    Ok(TrashedItem {
        original_path,
        trashed_path,
        info_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{testing::ScriptedFs, RealFileSystem};
    use std::fs as stdfs;
    use std::path::PathBuf;

    const NOW: &str = "2024-05-01T10:20:30";

    fn trash_in(tmp: &Path) -> TrashDirectory {
        let trash = TrashDirectory::new(tmp.join("Trash"));
        trash.prepare(&RealFileSystem).unwrap();
        trash
    }

    fn entries(dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = stdfs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn trashes_a_file_and_pairs_the_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());
        let victim = tmp.path().join("a.txt");
        stdfs::write(&victim, b"payload").unwrap();

        let item = trash_one(&RealFileSystem, &victim, &trash, NOW).unwrap();

        assert!(!victim.exists());
        assert_eq!(stdfs::read(&item.trashed_path).unwrap(), b"payload");
        assert_eq!(item.original_path, victim);

        // files/<name> and info/<name>.trashinfo share the generated name.
        let payload_name = item.trashed_path.file_name().unwrap().to_str().unwrap();
        let record_name = item.info_path.file_name().unwrap().to_str().unwrap();
        assert_eq!(format!("{payload_name}{TRASHINFO_EXTENSION}"), record_name);
        assert_eq!(item.trashed_path.parent().unwrap(), trash.files_dir);
        assert_eq!(item.info_path.parent().unwrap(), trash.info_dir);
    }

    #[test]
    fn same_basename_in_one_second_yields_two_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());
        stdfs::create_dir_all(tmp.path().join("one")).unwrap();
        stdfs::create_dir_all(tmp.path().join("two")).unwrap();
        stdfs::write(tmp.path().join("one/a.txt"), b"1").unwrap();
        stdfs::write(tmp.path().join("two/a.txt"), b"2").unwrap();

        trash_one(&RealFileSystem, &tmp.path().join("one/a.txt"), &trash, NOW).unwrap();
        trash_one(&RealFileSystem, &tmp.path().join("two/a.txt"), &trash, NOW).unwrap();

        assert_eq!(entries(&trash.files_dir).len(), 2);
        assert_eq!(entries(&trash.info_dir).len(), 2);
    }

    #[test]
    fn failed_move_unwinds_the_record() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());
        let victim = tmp.path().join("a.txt");
        stdfs::write(&victim, b"payload").unwrap();

        // Rename denied and no copies allowed: the move cannot succeed.
        let fs = ScriptedFs::new().deny_rename().copy_budget(0);
        let err = trash_one(&fs, &victim, &trash, NOW).unwrap_err();

        assert!(matches!(err, CoreError::Move(_)));
        assert!(entries(&trash.info_dir).is_empty());
        assert!(entries(&trash.files_dir).is_empty());
        assert_eq!(stdfs::read(&victim).unwrap(), b"payload");
    }

    #[test]
    fn missing_source_leaves_no_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());

        let err = trash_one(
            &RealFileSystem,
            &tmp.path().join("missing"),
            &trash,
            NOW,
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::Move(_)));
        assert!(entries(&trash.info_dir).is_empty());
        assert!(entries(&trash.files_dir).is_empty());
    }

    #[test]
    fn trashes_a_directory_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());
        let victim = tmp.path().join("project");
        stdfs::create_dir_all(victim.join("src")).unwrap();
        stdfs::write(victim.join("src/main.txt"), b"body").unwrap();

        let item = trash_one(&RealFileSystem, &victim, &trash, NOW).unwrap();

        assert!(!victim.exists());
        assert_eq!(
            stdfs::read(item.trashed_path.join("src/main.txt")).unwrap(),
            b"body"
        );
    }

    #[test]
    fn record_points_back_at_the_original() {
        let tmp = tempfile::tempdir().unwrap();
        let trash = trash_in(tmp.path());
        let victim = tmp.path().join("with space.txt");
        stdfs::write(&victim, b"x").unwrap();

        let item = trash_one(&RealFileSystem, &victim, &trash, NOW).unwrap();

        let body = stdfs::read_to_string(&item.info_path).unwrap();
        let escaped = crate::helpers::escape_path_segments(&victim);
        assert!(body.starts_with("[Trash Info]\n"));
        assert!(body.contains(&format!("Path={escaped}\n")));
        assert!(body.contains(&format!("DeletionDate={NOW}\n")));
    }
}
