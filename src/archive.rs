//! ZIP archiving.
//!
//! Recursively archives a directory tree, keeping the directory itself as
//! the top-level entry.

use std::fs;
use std::io;
use std::path::Path;

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::{Error, Result};
use crate::log_status;

/// Zip a directory, including itself.
///
/// ```ignore
/// archive::zip_dir(Path::new("/path/to/source_dir"), Path::new("/path/to/out.zip"))?;
/// ```
///
/// Entry names are relative to the source's parent, so the archive opens
/// with the directory's own name. Subdirectories become explicit entries;
/// entries are added in sorted order for reproducible archives.
pub fn zip_dir(source_dir: &Path, out_zip: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(Error::invalid_argument(format!(
            "Not a directory: {}",
            source_dir.display()
        )));
    }

    let dir_name = source_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::invalid_argument(format!("Invalid source path: {}", source_dir.display()))
        })?;

    let file = fs::File::create(out_zip)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    zip.add_directory(format!("{}/", dir_name), options)?;
    add_dir_entries(&mut zip, source_dir, dir_name, options)?;
    zip.finish()?;

    log_status!("zip", "Archived {} to {}", source_dir.display(), out_zip.display());

    Ok(())
}

fn add_dir_entries(
    zip: &mut ZipWriter<fs::File>,
    dir: &Path,
    local_prefix: &str,
    options: FileOptions,
) -> Result<()> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let local_name = format!("{}/{}", local_prefix, entry.file_name().to_string_lossy());

        if path.is_dir() {
            zip.add_directory(format!("{}/", local_name), options)?;
            add_dir_entries(zip, &path, &local_name, options)?;
        } else if path.is_file() {
            zip.start_file(local_name, options)?;
            let mut file = fs::File::open(&path)?;
            io::copy(&mut file, zip)?;
        }
    }

    Ok(())
}
