//! Rename-first tree relocation with a copy-and-delete fallback.

use crate::copy::copy_tree;
use crate::fs::FileSystem;
use std::path::Path;

/// Moves the tree at `src` to `dst`.
///
/// A rename is attempted first; within one file system it is atomic and O(1).
/// When it fails, most commonly across devices (the cause is deliberately not
/// inspected), the tree is copied to `dst` and the original removed.
///
/// A failed copy cleans up `dst` and leaves `src` untouched. A failed removal
/// after a successful copy is still an error, but `dst` is kept: the entry is
/// complete and only the original location remains uncleared.
pub fn move_tree(fs: &dyn FileSystem, src: &Path, dst: &Path) -> crate::Result<()> {
    if fs.rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_tree(fs, src, dst)?;
    fs.remove_all(src)
}
