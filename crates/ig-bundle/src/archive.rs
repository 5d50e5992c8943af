//! Writers for a finished [`ArtifactSet`].

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::artifact::ArtifactSet;
use crate::error::BundleError;

pub const ARCHIVE_NAME: &str = "all-files.zip";

/// Writes every bundle file into a ZIP archive and returns the writer.
///
/// Entries carry a fixed timestamp so identical sets give identical archives.
pub fn write_zip<W: Write + Seek>(set: &ArtifactSet, writer: W) -> Result<W, BundleError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for (name, bytes) in set.files() {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?)
}

pub fn zip_bytes(set: &ArtifactSet) -> Result<Vec<u8>, BundleError> {
    Ok(write_zip(set, Cursor::new(Vec::new()))?.into_inner())
}

/// Writes every bundle file into `dir`, creating it if needed.
pub fn write_dir(set: &ArtifactSet, dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (name, bytes) in set.files() {
        let path = dir.join(&name);
        fs::write(&path, bytes)?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "bundle written");
    Ok(written)
}
