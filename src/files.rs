//! Filesystem helpers.
//!
//! Size formatting, extension handling, path splitting, content hashing and
//! thin I/O wrappers with uniform error mapping.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

use crate::error::{Error, Result};

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count as a human readable size with 1024-based units.
///
/// Rounds to two decimals and drops trailing zeros, so `1536` becomes
/// `"1.5 KB"` and `2048` becomes `"2 KB"`.
pub fn human_readable_filesize(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;

    while value > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", format_rounded(value), SIZE_UNITS[unit])
}

fn format_rounded(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as u64)
    } else {
        let text = format!("{:.2}", rounded);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Append `extension` when the path carries none.
///
/// Trailing dots are stripped before appending, so `"file."` with `"jpg"`
/// becomes `"file.jpg"`. Paths that already have an extension are returned
/// unchanged, and dotfiles like `".gitignore"` count as extension-only
/// names and are left alone.
pub fn ensure_extension(file: &str, extension: &str) -> String {
    let path = Path::new(file);
    let has_extension = path.extension().is_some_and(|ext| !ext.is_empty())
        || path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(dotfile_extension)
            .is_some();

    if has_extension {
        file.to_string()
    } else {
        format!("{}.{}", file.trim_end_matches('.'), extension)
    }
}

// ".gitignore" is all extension and no name; ".config.json" is not
fn dotfile_extension(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty() && !rest.contains('.'))
}

/// Extension and name information for a source path.
///
/// Produced by [`file_info`]; never fails, missing pieces are `None`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Lowercased extension without the dot.
    pub extension: Option<String>,
    /// File name without the extension.
    pub name: Option<String>,
    /// The source path as provided.
    pub source: String,
    /// The source path with the extension stripped.
    pub source_filename: Option<String>,
}

/// Split a path into its extension and name parts.
///
/// Dotfiles like `".gitignore"` report the part after the dot as the
/// extension and carry no name.
pub fn file_info(source: &str) -> FileInfo {
    let path = Path::new(source);

    let dotfile = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(dotfile_extension);

    let extension = match dotfile {
        Some(ext) => Some(ext.to_lowercase()),
        None => path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_lowercase()),
    };

    let name = if dotfile.is_some() {
        None
    } else {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(ToString::to_string)
    };

    let source_filename = name.as_ref().map(|name| {
        match path
            .parent()
            .and_then(|parent| parent.to_str())
            .filter(|parent| !parent.is_empty())
        {
            Some(parent) => format!("{}/{}", parent, name),
            None => name.clone(),
        }
    });

    FileInfo {
        extension,
        name,
        source: source.to_string(),
        source_filename,
    }
}

/// Generate a short unique hash name from a file name.
///
/// Returns 8 hex chars derived from the file name plus a random component,
/// suitable for collision-free upload names.
pub fn hash_name(file_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file_name.as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());

    hasher
        .finalize()
        .iter()
        .take(4)
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// SHA-256 digest of a file's content, hex encoded.
///
/// Equivalent to the `sha256sum` command output for the file.
pub fn sha256sum(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path).map_err(|e| not_found_or_io(e, path))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;

    Ok(hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect())
}

fn not_found_or_io(error: io::Error, path: &Path) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        Error::FileNotFound(path.display().to_string())
    } else {
        Error::Io(error)
    }
}

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| not_found_or_io(e, path))
}

/// Write content to a file.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Write content to a file atomically (write to .tmp, then rename).
///
/// The rename is atomic on POSIX filesystems, so readers always see either
/// the old content or the new content, never a partial write.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::invalid_argument(format!("Invalid path: {}", path.display())))?;

    let filename = path
        .file_name()
        .ok_or_else(|| Error::invalid_argument(format!("Invalid path: {}", path.display())))?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Best-effort file deletion that also handles symlinks.
///
/// Never errors; returns whether the file is gone. Dangling symlinks are
/// removed as the link itself, and paths reaching a file through links are
/// retried at the resolved location.
pub fn unlink(path: &Path) -> bool {
    if fs::remove_file(path).is_ok() {
        return true;
    }

    // a dangling symlink has no metadata but symlink_metadata still sees it
    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() && fs::remove_file(path).is_ok() {
            return true;
        }
    }

    if let Ok(resolved) = fs::canonicalize(path) {
        if resolved != path && fs::remove_file(&resolved).is_ok() {
            return true;
        }
    }

    false
}
