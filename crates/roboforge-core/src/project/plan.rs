//! Extraction planning: filtering, ordering and destination remapping.
//!
//! The plan is derived per run and never persisted. Directory entries are
//! ordered strictly before file entries so every destination directory
//! exists by the time a file write lands in it.

use std::path::{Path, PathBuf};

use crate::archive::{ArchiveEntry, EntryKind};
use crate::repo::Language;

use super::options::ProjectType;

/// Archive directory containing the per-type template trees.
pub const ARCHIVE_ROOT_DIR: &str = "templates";

/// Files with this suffix are routed into the header tree for C++ projects.
const HEADER_SUFFIX: &str = ".h";

/// Relative source root of a generated project. Java projects use a
/// team-numbered package tree; C++ projects use a fixed source subtree.
pub fn project_root(lang: Language, team_number: u32) -> PathBuf {
    match lang {
        Language::Java => PathBuf::from("src/main/java/frc")
            .join(format!("team{team_number}"))
            .join("robot"),
        Language::Cpp => PathBuf::from("src/cpp"),
    }
}

/// Public-header root for languages that split headers out of the source
/// tree: the sibling `include/` of the source subtree.
pub fn header_root(lang: Language, team_number: u32) -> Option<PathBuf> {
    match lang {
        Language::Java => None,
        Language::Cpp => {
            let source = project_root(lang, team_number);
            let parent = source.parent().unwrap_or_else(|| Path::new(""));
            Some(parent.join("include"))
        }
    }
}

/// One planned materialization step.
#[derive(Debug, Clone)]
pub struct PlannedEntry {
    pub kind: EntryKind,
    /// Path inside the archive (used for file reads).
    pub source: String,
    /// Destination relative to the project destination root.
    pub dest: PathBuf,
}

/// The filtered, ordered entry set for one generation run, with
/// destinations resolved.
#[derive(Debug)]
pub struct ExtractionPlan {
    pub project_root: PathBuf,
    pub header_root: Option<PathBuf>,
    pub entries: Vec<PlannedEntry>,
}

impl ExtractionPlan {
    /// Select the entries belonging to `project_type` and compute each
    /// destination. Headers are flattened into the header tree for C++,
    /// losing their subdirectory structure; everything else is remapped
    /// under the project root with the type prefix stripped.
    pub fn build(
        entries: &[ArchiveEntry],
        project_type: ProjectType,
        lang: Language,
        team_number: u32,
    ) -> Self {
        let prefix = format!("{ARCHIVE_ROOT_DIR}/{}/", project_type.key());
        let project_root = project_root(lang, team_number);
        let header_root = header_root(lang, team_number);

        let mut planned: Vec<PlannedEntry> = entries
            .iter()
            .filter(|e| e.path.starts_with(&prefix))
            .map(|e| {
                let rel = e.path[prefix.len()..].trim_end_matches('/');
                let dest = match (&header_root, e.kind) {
                    (Some(include), EntryKind::File) if e.path.ends_with(HEADER_SUFFIX) => {
                        include.join(file_name(&e.path))
                    }
                    _ => project_root.join(rel),
                };
                PlannedEntry {
                    kind: e.kind,
                    source: e.path.clone(),
                    dest,
                }
            })
            .collect();

        // stable: directories first, archive-native order within each class
        planned.sort_by_key(|p| p.kind == EntryKind::File);

        Self {
            project_root,
            header_root,
            entries: planned,
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
