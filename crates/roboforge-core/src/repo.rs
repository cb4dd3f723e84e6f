//! Remote repository descriptors and the local archive store layout.
//!
//! A [`Repository`] pairs one remote Maven repository (templates or examples)
//! with the local directory mirroring it. Instances are plain values created
//! by the caller and passed by reference into the updater and materializers;
//! nothing here reads global state or performs I/O.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Remote metadata document name.
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Integrity sidecar of [`METADATA_FILE`]; doubles as the local sync marker
/// file name.
pub const METADATA_HASH_FILE: &str = "maven-metadata.xml.sha1";

const RELEASE_ROOT: &str = "http://first.wpi.edu/FRC/roborio/maven/release/edu/wpi/first";

/// Project ecosystem variant.
///
/// Determines the remote artifact segment, the generated source layout,
/// header routing and the canonical entry-point file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "Java")]
    Java,
    #[serde(alias = "C++", alias = "c++")]
    Cpp,
}

impl Language {
    /// Directory key used in store paths and remote URLs.
    pub fn key(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }

    /// Maven artifact segment for this language.
    fn artifact(&self) -> &'static str {
        match self {
            Language::Java => "wpilibj",
            Language::Cpp => "wpilibc",
        }
    }

    /// Canonical entry-point file name of generated and example projects.
    pub fn main_file(&self) -> &'static str {
        match self {
            Language::Java => "Robot.java",
            Language::Cpp => "Robot.cpp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Cpp => "C++",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which bundle a repository serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoKind {
    Templates,
    Examples,
}

/// One remote Maven repository plus its local mirror directory.
#[derive(Debug, Clone)]
pub struct Repository {
    kind: RepoKind,
    local_root: PathBuf,
}

impl Repository {
    /// The project template repository rooted at `local_root`.
    pub fn templates(local_root: impl Into<PathBuf>) -> Self {
        Self {
            kind: RepoKind::Templates,
            local_root: local_root.into(),
        }
    }

    /// The example project repository rooted at `local_root`.
    pub fn examples(local_root: impl Into<PathBuf>) -> Self {
        Self {
            kind: RepoKind::Examples,
            local_root: local_root.into(),
        }
    }

    pub fn kind(&self) -> RepoKind {
        self.kind
    }

    pub fn display_name(&self) -> &'static str {
        match self.kind {
            RepoKind::Templates => "Template",
            RepoKind::Examples => "Example",
        }
    }

    fn remote_segment(&self) -> &'static str {
        match self.kind {
            RepoKind::Templates => "templates",
            RepoKind::Examples => "examples",
        }
    }

    /// Remote archive file name for a release version.
    pub fn archive_file_name(&self, version: &str) -> String {
        format!("{}-{version}.zip", self.remote_segment())
    }

    /// Root of the local store (also holds the static descriptor assets).
    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    /// Per-language store directory holding the marker and archives.
    pub fn local_dir(&self, lang: Language) -> PathBuf {
        self.local_root.join(lang.key())
    }

    /// Location of the persisted metadata hash marker.
    pub fn marker_path(&self, lang: Language) -> PathBuf {
        self.local_dir(lang).join(METADATA_HASH_FILE)
    }

    /// Store location of a downloaded archive.
    pub fn archive_path(&self, lang: Language, version: &str) -> PathBuf {
        self.local_dir(lang).join(self.archive_file_name(version))
    }

    /// Remote base for this (kind, language) pair. All other remote paths
    /// derive from it.
    pub fn base_url(&self, lang: Language) -> Result<Url> {
        let raw = format!(
            "{RELEASE_ROOT}/{}/{}/",
            lang.artifact(),
            self.remote_segment()
        );
        Url::parse(&raw).map_err(|e| Error::Parse {
            what: "repository URL",
            detail: e.to_string(),
        })
    }

    pub fn metadata_url(&self, lang: Language) -> Result<Url> {
        join_url(&self.base_url(lang)?, &[METADATA_FILE])
    }

    pub fn metadata_hash_url(&self, lang: Language) -> Result<Url> {
        join_url(&self.base_url(lang)?, &[METADATA_HASH_FILE])
    }

    pub fn archive_url(&self, lang: Language, version: &str) -> Result<Url> {
        join_url(
            &self.base_url(lang)?,
            &[version, &self.archive_file_name(version)],
        )
    }
}

/// Append path segments to a base URL, preserving everything else.
fn join_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut parts = url.path_segments_mut().map_err(|_| Error::Parse {
            what: "repository URL",
            detail: format!("URL cannot have path segments: {base}"),
        })?;
        parts.pop_if_empty();
        for segment in segments {
            parts.push(segment);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_urls_derive_from_kind_and_language() {
        let templates = Repository::templates("/store/templates");
        let examples = Repository::examples("/store/examples");

        assert_eq!(
            templates.metadata_url(Language::Java).unwrap().as_str(),
            "http://first.wpi.edu/FRC/roborio/maven/release/edu/wpi/first/wpilibj/templates/maven-metadata.xml"
        );
        assert_eq!(
            templates.metadata_hash_url(Language::Cpp).unwrap().as_str(),
            "http://first.wpi.edu/FRC/roborio/maven/release/edu/wpi/first/wpilibc/templates/maven-metadata.xml.sha1"
        );
        assert_eq!(
            examples.archive_url(Language::Java, "2018.1.1").unwrap().as_str(),
            "http://first.wpi.edu/FRC/roborio/maven/release/edu/wpi/first/wpilibj/examples/2018.1.1/examples-2018.1.1.zip"
        );
    }

    #[test]
    fn store_paths_nest_language_under_local_root() {
        let repo = Repository::templates("/store/templates");

        assert_eq!(
            repo.marker_path(Language::Java),
            PathBuf::from("/store/templates/java/maven-metadata.xml.sha1")
        );
        assert_eq!(
            repo.archive_path(Language::Cpp, "2018.2.0"),
            PathBuf::from("/store/templates/cpp/templates-2018.2.0.zip")
        );
    }

    #[test]
    fn archive_file_names_carry_the_version() {
        let repo = Repository::examples("/store/examples");
        assert_eq!(repo.archive_file_name("2018.1.1"), "examples-2018.1.1.zip");
    }

    #[test]
    fn language_accepts_user_facing_spellings() {
        let java: Language = serde_yaml::from_str("Java").unwrap();
        let cpp: Language = serde_yaml::from_str("\"C++\"").unwrap();
        assert_eq!(java, Language::Java);
        assert_eq!(cpp, Language::Cpp);
    }
}
