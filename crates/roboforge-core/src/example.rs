//! Example project listing and read-only extraction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::archive::{ArchiveReader, EntryKind};
use crate::error::{Error, Result};
use crate::repo::Language;

/// Catalog file bundled inside every example archive.
const EXAMPLE_META_FILE: &str = "examples.json";

/// One catalog record from `examples.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleInfo {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub foldername: String,
}

/// Extracts example projects to temp directories for read-only viewing.
///
/// Results are memoized per example name for the lifetime of the loader; a
/// newer archive does not invalidate entries already handed out. That keeps
/// repeat views instant at the cost of within-session freshness.
pub struct ExampleLoader<R> {
    reader: R,
    cache: HashMap<String, Vec<PathBuf>>,
}

impl<R: ArchiveReader> ExampleLoader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cache: HashMap::new(),
        }
    }

    /// Parse the example catalog out of the archive. The catalog sits under
    /// a version-dependent top directory, so it is located by name rather
    /// than by exact path.
    pub fn list(&self, archive: &Path) -> Result<Vec<ExampleInfo>> {
        let entries = self.reader.list(archive)?;
        let meta_path = entries
            .iter()
            .find(|e| e.is_file() && e.path.contains(EXAMPLE_META_FILE))
            .map(|e| e.path.clone())
            .ok_or_else(|| Error::EntryNotFound(EXAMPLE_META_FILE.to_string()))?;
        let raw = self.reader.read_file(archive, &meta_path)?;
        serde_json::from_slice(&raw).map_err(|e| Error::Parse {
            what: "examples.json",
            detail: e.to_string(),
        })
    }

    /// Extract every file belonging to `example` into a fresh temp
    /// directory, preserving relative structure, and return the written
    /// paths. Cached per example name.
    pub fn extract(&mut self, archive: &Path, example: &ExampleInfo) -> Result<Vec<PathBuf>> {
        if let Some(paths) = self.cache.get(&example.name) {
            debug!(example = %example.name, "serving cached extraction");
            return Ok(paths.clone());
        }

        let tmp = tempfile::Builder::new()
            .prefix("roboforge-example-")
            .tempdir()
            .map_err(Error::fs(std::env::temp_dir()))?;
        // the extracted tree outlives this call; the viewer owns cleanup
        let root = tmp.keep();

        let prefix = format!("{}/", example.foldername);
        let mut written = Vec::new();
        for entry in self.reader.list(archive)? {
            if entry.kind != EntryKind::File || !entry.path.starts_with(&prefix) {
                continue;
            }
            let target = root.join(&entry.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(Error::fs(parent))?;
            }
            let contents = self.reader.read_file(archive, &entry.path)?;
            std::fs::write(&target, contents).map_err(Error::fs(&target))?;
            written.push(target);
        }

        debug!(example = %example.name, files = written.len(), "example extracted");
        self.cache.insert(example.name.clone(), written.clone());
        Ok(written)
    }
}

/// First path whose file name is the canonical entry point for either
/// language.
pub fn find_main_file(paths: &[PathBuf]) -> Result<&Path> {
    paths
        .iter()
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n == Language::Java.main_file() || n == Language::Cpp.main_file())
                .unwrap_or(false)
        })
        .map(PathBuf::as_path)
        .ok_or_else(|| Error::FileNotFound("could not find Robot.java or Robot.cpp".to_string()))
}
