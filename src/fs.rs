use crate::errors::CoreError;
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{symlink, DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem abstraction boundary for the trash engine.
///
/// Keeping this trait narrow makes it easy to write deterministic tests and
/// allows failure-injecting backends when exercising rollback paths.
pub trait FileSystem: Send + Sync {
    /// Returns the current time in wall-clock format.
    fn now(&self) -> SystemTime;

    /// Computes the absolute form of a path lexically, without touching
    /// symlinks.
    fn absolute(&self, path: &Path) -> crate::Result<PathBuf>;

    /// Reads metadata without following a final symlink.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Creates a single directory.
    fn create_dir(&self, path: &Path) -> crate::Result<()>;

    /// Creates a directory and all missing parents with the given mode.
    /// Tolerates directories that already exist.
    fn create_dir_all(&self, path: &Path, mode: u32) -> crate::Result<()>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>>;

    /// Copies one regular file. The destination is created exclusively (the
    /// call fails if it already exists) and ends up with exactly `mode` as
    /// its permission bits; the data is synced before success is reported.
    fn copy_file(&self, src: &Path, dst: &Path, mode: u32) -> crate::Result<()>;

    /// Reads a symlink's target, verbatim.
    fn read_link(&self, path: &Path) -> crate::Result<PathBuf>;

    /// Creates a symlink at `link` pointing at `target`.
    fn symlink(&self, target: &Path, link: &Path) -> crate::Result<()>;

    /// Sets the permission bits of a path.
    fn set_permissions(&self, path: &Path, mode: u32) -> crate::Result<()>;

    /// Renames/moves a path.
    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()>;

    /// Removes a file.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Removes a path of any type: file, symlink, or directory tree.
    fn remove_all(&self, path: &Path) -> crate::Result<()>;

    /// Creates a file in `dir` with a name that is unique across concurrent
    /// and rapid sequential callers, shaped `<prefix><random><suffix>`, and
    /// writes `contents` to it durably. A file that cannot be fully written
    /// is removed before the error is returned.
    fn create_unique(
        &self,
        dir: &Path,
        prefix: &str,
        suffix: &str,
        contents: &str,
    ) -> crate::Result<PathBuf>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn absolute(&self, path: &Path) -> crate::Result<PathBuf> {
        std::path::absolute(path).map_err(|err| CoreError::PathResolution {
            path: path.to_path_buf(),
            source: err,
        })
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| CoreError::io(path, err))
    }

    fn create_dir(&self, path: &Path) -> crate::Result<()> {
        fs::create_dir(path).map_err(|err| CoreError::io(path, err))
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> crate::Result<()> {
        fs::DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(path)
            .map_err(|err| CoreError::io(path, err))
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .map_err(|err| CoreError::io(path, err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| CoreError::io(path, err))
    }

    fn copy_file(&self, src: &Path, dst: &Path, mode: u32) -> crate::Result<()> {
        let mut reader = fs::File::open(src).map_err(|err| CoreError::io(src, err))?;
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(mode)
            .open(dst)
            .map_err(|err| CoreError::io(dst, err))?;
        io::copy(&mut reader, &mut writer).map_err(|err| CoreError::io(dst, err))?;
        // The open mode is subject to the umask; set the exact bits.
        writer
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(|err| CoreError::io(dst, err))?;
        writer.sync_all().map_err(|err| CoreError::io(dst, err))
    }

    fn read_link(&self, path: &Path) -> crate::Result<PathBuf> {
        fs::read_link(path).map_err(|err| CoreError::io(path, err))
    }

    fn symlink(&self, target: &Path, link: &Path) -> crate::Result<()> {
        symlink(target, link).map_err(|err| CoreError::io(link, err))
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> crate::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|err| CoreError::io(path, err))
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()> {
        fs::rename(from, to).map_err(|err| CoreError::io(from, err))
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| CoreError::io(path, err))
    }

    fn remove_all(&self, path: &Path) -> crate::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) => match fs::remove_dir_all(path) {
                Ok(()) => Ok(()),
                Err(_) => Err(CoreError::io(path, err)),
            },
        }
    }

    fn create_unique(
        &self,
        dir: &Path,
        prefix: &str,
        suffix: &str,
        contents: &str,
    ) -> crate::Result<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(dir)
            .map_err(|err| CoreError::io(dir, err))?;
        // Dropping `file` on any early return below unlinks the partial record.
        let staged = file.path().to_path_buf();
        file.write_all(contents.as_bytes())
            .map_err(|err| CoreError::io(&staged, err))?;
        file.as_file()
            .sync_all()
            .map_err(|err| CoreError::io(&staged, err))?;
        let (_file, path) = file
            .keep()
            .map_err(|err| CoreError::io(&staged, err.error))?;
        Ok(path)
    }
}
