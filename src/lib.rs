//! Core engine for the `trash` command: relocates files into the
//! freedesktop.org per-user trash instead of deleting them, recording enough
//! metadata for a later restore. The binary stays a thin wrapper so the
//! primitives here can be consumed by companion commands.

pub mod copy;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod info;
pub mod models;
pub mod mover;
pub mod put;

pub use copy::copy_tree;
pub use errors::{CoreError, Result};
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{
    escape_path_segments,
    info_file_prefix,
    sanitize_user_path,
    serialize_deletion_time,
    TRASHINFO_EXTENSION,
    TRASHINFO_TIME_FORMAT,
};
pub use info::write_trash_info;
pub use models::{EnvVarMap, TrashDirectory, TrashedItem};
pub use mover::move_tree;
pub use put::trash_one;

/// Re-export a small stable API surface for command binaries.
pub mod prelude {
    pub use crate::{
        errors::{CoreError, Result},
        fs::{FileSystem, RealFileSystem},
        helpers::*,
        models::*,
        put::trash_one,
    };
}
