use crate::errors::CoreError;
use crate::fs::FileSystem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Snapshot of the process environment, captured once at startup.
pub type EnvVarMap = HashMap<String, String>;

/// The per-user trash location with its `files/` and `info/` subdirectories.
///
/// Both subdirectories must exist before any entry is created; `prepare`
/// establishes them idempotently.
#[derive(Debug, Clone)]
pub struct TrashDirectory {
    pub path: PathBuf,
    pub files_dir: PathBuf,
    pub info_dir: PathBuf,
}

impl TrashDirectory {
    pub fn new(path: PathBuf) -> Self {
        let files_dir = path.join("files");
        let info_dir = path.join("info");
        Self {
            path,
            files_dir,
            info_dir,
        }
    }

    /// Resolves the home trash: `$XDG_DATA_HOME/Trash` when that variable is
    /// set and non-empty, otherwise `$HOME/.local/share/Trash`.
    pub fn from_env(environ: &EnvVarMap) -> crate::Result<Self> {
        if let Some(xdg) = environ.get("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::new(Path::new(xdg).join("Trash")));
        }
        if let Some(home) = environ.get("HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::new(
                Path::new(home).join(".local").join("share").join("Trash"),
            ));
        }
        Err(CoreError::missing("HOME"))
    }

    /// Creates `files/` and `info/` (mode 0755) if absent.
    pub fn prepare(&self, fs: &dyn FileSystem) -> crate::Result<()> {
        fs.create_dir_all(&self.files_dir, 0o755)?;
        fs.create_dir_all(&self.info_dir, 0o755)
    }
}

/// A completed trash entry: where the payload came from and where it and its
/// sidecar record live now.
#[derive(Debug, Clone)]
pub struct TrashedItem {
    pub original_path: PathBuf,
    pub trashed_path: PathBuf,
    pub info_path: PathBuf,
}
