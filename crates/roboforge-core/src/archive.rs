//! Read-only access to downloaded archives.
//!
//! Archives are listed and read entry-by-entry, never fully extracted to
//! disk. The trait seam lets materializer tests run against scripted or
//! instrumented readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Kind of a listed archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One record from a listed archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated. Directory paths keep their
    /// trailing slash as stored.
    pub path: String,
    pub kind: EntryKind,
}

impl ArchiveEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Entry listing and per-entry reads over one archive file.
pub trait ArchiveReader: Send + Sync {
    /// All entries, in archive-native order (no guaranteed sort).
    fn list(&self, archive: &Path) -> Result<Vec<ArchiveEntry>>;

    /// Raw content of one file entry.
    fn read_file(&self, archive: &Path, entry_path: &str) -> Result<Vec<u8>>;
}

/// `zip`-backed reader.
pub struct ZipReader;

impl ZipReader {
    fn open(archive: &Path) -> Result<ZipArchive<File>> {
        let file = File::open(archive).map_err(Error::fs(archive))?;
        Ok(ZipArchive::new(file)?)
    }
}

impl ArchiveReader for ZipReader {
    fn list(&self, archive: &Path) -> Result<Vec<ArchiveEntry>> {
        let mut zip = Self::open(archive)?;
        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index(i)?;
            let kind = if entry.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(ArchiveEntry {
                path: entry.name().to_string(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, archive: &Path, entry_path: &str) -> Result<Vec<u8>> {
        let mut zip = Self::open(archive)?;
        let mut entry = match zip.by_name(entry_path) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(Error::EntryNotFound(entry_path.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents).map_err(Error::fs(archive))?;
        Ok(contents)
    }
}
