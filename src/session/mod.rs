//! Project file persistence.
//!
//! Serialises a [`Project`](crate::page::Project) to JSON, optionally
//! gzip-compressed, writes it through a temporary file with one backup
//! generation, and reads it back.

mod options;
mod project_file;

pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, ProjectFileOptions, backup_file_path,
};
pub use project_file::{LoadedProject, load_project, save_project};
