//! User settings consumed during generation.
//!
//! Mirrors the configuration the surrounding tooling stores on behalf of the
//! core: team identity, language, library locations and dependency version
//! overrides. Loaded from a YAML file; a missing file yields full defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repo::Language;

/// Override value meaning "track the repository's latest release"; such
/// entries are never pinned into generated properties.
pub const LATEST: &str = "latest";

/// Per-language user library locations appended to generated dependency
/// lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserLibraries {
    pub java_lib_dir: PathBuf,
    pub cpp_lib_dir: PathBuf,
}

impl Default for UserLibraries {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            java_lib_dir: home.join("wpilib/user/java"),
            cpp_lib_dir: home.join("wpilib/user/cpp"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub team_number: u32,
    pub language: Language,
    /// Refresh the stores before generate/view operations.
    pub auto_update: bool,
    /// Extra flags handed through to the build integration; not consumed
    /// here.
    pub gradle_opts: Vec<String>,
    pub user_libraries: UserLibraries,
    /// Pinned dependency versions appended to generated properties.
    pub dependency_versions: BTreeMap<String, String>,
    /// Root directory for the downloaded template and example stores.
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            team_number: 0,
            language: Language::Java,
            auto_update: true,
            gradle_opts: vec!["--console=plain".to_string()],
            user_libraries: UserLibraries::default(),
            dependency_versions: default_dependency_versions(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_dependency_versions() -> BTreeMap<String, String> {
    ["wpilibVersion", "ntcoreVersion", "ctreVersion", "navxVersion"]
        .into_iter()
        .map(|key| (key.to_string(), LATEST.to_string()))
        .collect()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roboforge")
}

impl Settings {
    /// Load settings from a YAML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_yaml::from_str(&text).map_err(|e| Error::Parse {
                what: "settings",
                detail: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::fs(path)(e)),
        }
    }

    /// User library directory for the given language.
    pub fn user_lib_dir(&self, lang: Language) -> &Path {
        match lang {
            Language::Java => &self.user_libraries.java_lib_dir,
            Language::Cpp => &self.user_libraries.cpp_lib_dir,
        }
    }

    /// Local root of the template store.
    pub fn templates_root(&self) -> PathBuf {
        self.data_dir.join("templates")
    }

    /// Local root of the example store.
    pub fn examples_root(&self) -> PathBuf {
        self.data_dir.join("examples")
    }
}
