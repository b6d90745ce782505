use crate::config::{SessionCompression, SessionConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Runtime options for writing and reading project files.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFileOptions {
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    /// Keep the previous file as `<name>.bak` when overwriting
    pub keep_backup: bool,
}

impl Default for ProjectFileOptions {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            keep_backup: true,
        }
    }
}

impl From<&SessionConfig> for ProjectFileOptions {
    fn from(session_cfg: &SessionConfig) -> Self {
        Self {
            max_file_size_bytes: session_cfg
                .max_file_size_mb
                .saturating_mul(1024 * 1024)
                .max(1),
            compression: match session_cfg.compress {
                SessionCompression::Auto => CompressionMode::Auto,
                SessionCompression::On => CompressionMode::On,
                SessionCompression::Off => CompressionMode::Off,
            },
            auto_compress_threshold_bytes: session_cfg
                .auto_compress_threshold_kb
                .saturating_mul(1024)
                .max(1),
            keep_backup: session_cfg.keep_backup,
        }
    }
}

/// `score.json` -> `score.json.bak`
pub fn backup_file_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

pub(crate) fn lock_file_path(path: &Path) -> PathBuf {
    with_suffix(path, ".lock")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
