//! Recursive tree duplication with rollback.

use crate::errors::CoreError;
use crate::fs::FileSystem;
use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Owner write+execute, the bits a directory needs so children can be
/// written into it.
const OWNER_WX: u32 = 0o300;

/// Owner read+write+execute, the bits a widened directory is given while its
/// children are copied.
const OWNER_RWX: u32 = 0o700;

/// Duplicates the tree at `src` to `dst`.
///
/// Regular files are created exclusively (an existing destination fails the
/// copy rather than being overwritten) with their permission bits preserved;
/// symlink targets are recreated verbatim; directories whose owner bits lack
/// write+execute are widened while their children are written and restored,
/// children first, once the walk completes. Any other file type fails the
/// copy.
///
/// On error the walk stops, everything already written at `dst` is removed
/// best-effort, and `src` is left untouched.
pub fn copy_tree(fs: &dyn FileSystem, src: &Path, dst: &Path) -> crate::Result<()> {
    let mut restores: Vec<(PathBuf, u32)> = Vec::new();
    let result = copy_entry(fs, src, dst, &mut restores)
        .and_then(|()| restore_permissions(fs, &restores));
    if let Err(err) = result {
        // Cleanup is advisory; only the walk error is reported.
        let _ = fs.remove_all(dst);
        return Err(err);
    }
    Ok(())
}

fn copy_entry(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
    restores: &mut Vec<(PathBuf, u32)>,
) -> crate::Result<()> {
    let metadata = fs.symlink_metadata(src)?;
    let file_type = metadata.file_type();

    if file_type.is_file() {
        fs.copy_file(src, dst, permission_bits(&metadata))
    } else if file_type.is_symlink() {
        let target = fs.read_link(src)?;
        fs.symlink(&target, dst)
    } else if file_type.is_dir() {
        copy_dir(fs, src, dst, &metadata, restores)
    } else {
        Err(CoreError::UnsupportedFileType(src.to_path_buf()))
    }
}

fn copy_dir(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
    metadata: &Metadata,
    restores: &mut Vec<(PathBuf, u32)>,
) -> crate::Result<()> {
    // Enumerate before creating the destination, so a failure here leaves
    // nothing to clean up under `dst`.
    let children = fs.list_dir(src)?;
    fs.create_dir(dst)?;

    let mode = permission_bits(metadata);
    if mode & OWNER_WX == OWNER_WX {
        fs.set_permissions(dst, mode)?;
    } else {
        // Read-only source directory: widen the destination so children can
        // land in it, and restore the real bits after the walk.
        fs.set_permissions(dst, mode | OWNER_RWX)?;
        restores.push((dst.to_path_buf(), mode));
    }

    for child in children {
        let name = child
            .file_name()
            .ok_or_else(|| CoreError::InvalidPath(child.display().to_string()))?;
        copy_entry(fs, &child, &dst.join(name), restores)?;
    }
    Ok(())
}

/// Applies recorded permission bits deepest-first, after every child has been
/// written.
fn restore_permissions(fs: &dyn FileSystem, restores: &[(PathBuf, u32)]) -> crate::Result<()> {
    for (path, mode) in restores.iter().rev() {
        fs.set_permissions(path, *mode)?;
    }
    Ok(())
}

fn permission_bits(metadata: &Metadata) -> u32 {
    metadata.permissions().mode() & 0o7777
}
