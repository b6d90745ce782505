use super::options::{CompressionMode, ProjectFileOptions, backup_file_path, lock_file_path};
use crate::page::Project;
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    version: u32,
    last_modified: String,
    project: Project,
}

/// A project read back from disk.
#[derive(Debug)]
pub struct LoadedProject {
    pub project: Project,
    /// Whether the file was gzip-compressed
    pub compressed: bool,
    pub last_modified: Option<String>,
}

/// Writes `project` to `path`, replacing any existing file atomically.
///
/// Returns false when the payload exceeds the size limit and nothing was written.
pub fn save_project(project: &Project, path: &Path, options: &ProjectFileOptions) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let lock_path = lock_file_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock project file {}", lock_path.display()))?;

    let result = save_project_inner(project, path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock project file {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn save_project_inner(project: &Project, path: &Path, options: &ProjectFileOptions) -> Result<bool> {
    let payload = ProjectFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        project: project.clone(),
    };

    let mut bytes =
        serde_json::to_vec_pretty(&payload).context("failed to serialise project")?;

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };
    if should_compress {
        bytes = compress_bytes(&bytes)?;
    }

    // The limit applies to what lands on disk
    if bytes.len() as u64 > options.max_file_size_bytes {
        warn!(
            "Project data size {} bytes exceeds the configured limit of {} bytes; skipping save",
            bytes.len(),
            options.max_file_size_bytes
        );
        return Ok(false);
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!("failed to open temporary project file {}", tmp_path.display())
            })?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write project payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary project file")?;
    }

    if path.exists() && options.keep_backup {
        let backup_path = backup_file_path(path);
        if backup_path.exists() {
            fs::remove_file(&backup_path).ok();
        }
        fs::rename(path, &backup_path).with_context(|| {
            format!(
                "failed to rotate previous project file {} -> {}",
                path.display(),
                backup_path.display()
            )
        })?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary project file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    info!(
        "Project saved to {} ({} bytes, compression={})",
        path.display(),
        bytes.len(),
        should_compress
    );
    Ok(true)
}

/// Reads a project file. Missing or oversized files yield `Ok(None)`.
pub fn load_project(path: &Path, options: &ProjectFileOptions) -> Result<Option<LoadedProject>> {
    if !path.exists() {
        debug!("No project file at {}", path.display());
        return Ok(None);
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat project file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Project file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Ok(None);
    }

    let lock_path = lock_file_path(path);
    let lock_file = open_lock(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_project_inner(path);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock project file {}: {}",
            lock_path.display(),
            err
        )
    });

    result.map(Some)
}

fn load_project_inner(path: &Path) -> Result<LoadedProject> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .with_context(|| format!("failed to open project file {}", path.display()))?
        .read_to_end(&mut file_bytes)
        .context("failed to read project file")?;

    let compressed = is_gzip(&file_bytes);
    let json = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress project file")?;
        out
    } else {
        file_bytes
    };

    let file: ProjectFile =
        serde_json::from_slice(&json).context("failed to parse project json")?;
    if file.version > CURRENT_VERSION {
        warn!(
            "Project file {} has version {} (newer than {}); unknown fields are ignored",
            path.display(),
            file.version,
            CURRENT_VERSION
        );
    }

    let mut project = file.project;
    project.normalize();
    info!(
        "Loaded project '{}' from {} ({} pages)",
        project.title,
        path.display(),
        project.page_count()
    );

    Ok(LoadedProject {
        project,
        compressed,
        last_modified: Some(file.last_modified).filter(|s| !s.is_empty()),
    })
}

fn open_lock(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress project payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed project payload")
}

pub(crate) fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let base = target.as_os_str().to_owned();
    let mut counter = 0u32;
    loop {
        let mut candidate = base.clone();
        if counter == 0 {
            candidate.push(".tmp");
        } else {
            candidate.push(format!(".tmp{counter}"));
        }
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
