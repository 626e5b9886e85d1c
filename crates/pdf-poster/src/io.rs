//! Document I/O operations

use crate::constants::TEMP_FILE_ATTEMPTS;
use crate::types::*;
use log::warn;
use lopdf::Document;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document, replacing `path` atomically
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || write_pdf_atomic(&mut doc, &path)).await?
}

/// Load a PDF document, blocking
pub fn read_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    Ok(Document::load_mem(&bytes)?)
}

/// Serialize a document to bytes
pub fn pdf_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Write `doc` to a uniquely named file in `path`'s directory, then move it
/// over `path`.
pub fn write_pdf_atomic(doc: &mut Document, path: &Path) -> Result<()> {
    let bytes = pdf_bytes(doc)?;
    let mut temp = create_temp_file(path)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    persist(temp, path)
}

/// Create a temporary file next to `path`, retrying on name collisions
fn create_temp_file(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut attempt = 1;
    loop {
        match tempfile::Builder::new()
            .prefix(".pdfposter-")
            .suffix(".pdf")
            .tempfile_in(dir)
        {
            Ok(temp) => return Ok(temp),
            Err(err) if err.kind() == ErrorKind::AlreadyExists && attempt < TEMP_FILE_ATTEMPTS => {
                warn!(
                    "Temporary file name collision in {} (attempt {}), retrying",
                    dir.display(),
                    attempt
                );
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Rename the temporary file over `path`. Where renaming onto an existing
/// file fails, the destination is removed first.
fn persist(temp: NamedTempFile, path: &Path) -> Result<()> {
    match temp.persist(path) {
        Ok(_) => Ok(()),
        Err(err) if path.exists() => {
            warn!(
                "Could not replace {} in one step ({}), removing it first",
                path.display(),
                err.error
            );
            std::fs::remove_file(path)?;
            err.file.persist(path).map_err(|e| PosterError::Io(e.error))?;
            Ok(())
        }
        Err(err) => Err(PosterError::Io(err.error)),
    }
}
