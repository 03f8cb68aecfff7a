//! In-memory ZIP assembly for the "download all" action.
//!
//! Entries are named by the source file's base name and appear in input
//! order. PNG payloads are already compressed, so entries are stored as-is.
//! When two inputs share a base name the later file's bytes replace the
//! earlier entry, which keeps the position of its first occurrence.

use crate::error::Pdf2ImgError;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Pack `paths` into a ZIP archive held entirely in memory.
pub fn build_zip<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>, Pdf2ImgError> {
    let mut entries: Vec<(String, Vec<u8>)> = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let name = base_name(path)?;
        let bytes = std::fs::read(path).map_err(|e| Pdf2ImgError::storage(path, e))?;

        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                warn!("Duplicate archive entry '{}'; keeping the later file", name);
                slot.1 = bytes;
            }
            None => entries.push((name, bytes)),
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, bytes) in &entries {
        zip.start_file(name.as_str(), options).map_err(zip_error)?;
        zip.write_all(bytes)
            .map_err(|e| Pdf2ImgError::storage(name.as_str(), e))?;
    }

    let buffer = zip.finish().map_err(zip_error)?.into_inner();
    debug!("Built archive: {} entries, {} bytes", entries.len(), buffer.len());
    Ok(buffer)
}

fn base_name(path: &Path) -> Result<String, Pdf2ImgError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Pdf2ImgError::storage(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })
}

fn zip_error(e: zip::result::ZipError) -> Pdf2ImgError {
    Pdf2ImgError::storage("<archive>", std::io::Error::other(e))
}
