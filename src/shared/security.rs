use crate::shared::error::SbomMetaError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum inventory file size (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Kind of filesystem entry a scan source resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    File,
}

/// Validates the scan source and reports whether it is a directory or a file.
///
/// Symbolic links are rejected outright, using `symlink_metadata()` so the
/// link itself is inspected rather than its target.
pub fn validate_source_path(path: &Path) -> Result<SourceKind> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomMetaError::InvalidSourcePath {
        path: path.to_path_buf(),
        reason: if e.kind() == std::io::ErrorKind::NotFound {
            "Path does not exist".to_string()
        } else {
            format!("Failed to read path metadata: {}", e)
        },
    })?;

    if metadata.is_symlink() {
        return Err(SbomMetaError::InvalidSourcePath {
            path: path.to_path_buf(),
            reason: "Security: Source path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if metadata.is_dir() {
        Ok(SourceKind::Directory)
    } else if metadata.is_file() {
        Ok(SourceKind::File)
    } else {
        Err(SbomMetaError::InvalidSourcePath {
            path: path.to_path_buf(),
            reason: "Not a regular file or directory".to_string(),
        }
        .into())
    }
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a file after rejecting symlinks, non-regular files and oversized files.
///
/// `file_description` names the file in error messages (e.g. "Cargo.lock").
pub fn safe_read_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
