//! Options collected from the caller for one generation run.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Fixed set of template project flavors shipped in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Sample,
    CommandBased,
    Iterative,
    Timed,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::Sample,
        ProjectType::CommandBased,
        ProjectType::Iterative,
        ProjectType::Timed,
    ];

    /// Directory key under the archive's `templates/` root.
    pub fn key(&self) -> &'static str {
        match self {
            ProjectType::Sample => "sample",
            ProjectType::CommandBased => "commandbased",
            ProjectType::Iterative => "iterative",
            ProjectType::Timed => "timed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Sample => "Sample",
            ProjectType::CommandBased => "Command Based",
            ProjectType::Iterative => "Iterative",
            ProjectType::Timed => "Timed",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ProjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.key() == lower)
            .ok_or_else(|| Error::Parse {
                what: "project type",
                detail: format!("unknown type '{s}' (expected one of: sample, commandbased, iterative, timed)"),
            })
    }
}

/// Inputs for one project generation, owned by the run and discarded after
/// it completes or fails.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Destination directory of the new project. Must be non-empty.
    pub dest: PathBuf,
    pub project_type: ProjectType,
    /// Extra dependency declarations appended after the configured user
    /// library directory.
    pub dependencies: Vec<String>,
    pub debug: bool,
}

impl ProjectOptions {
    pub fn new(dest: impl Into<PathBuf>, project_type: ProjectType) -> Self {
        Self {
            dest: dest.into(),
            project_type,
            dependencies: Vec::new(),
            debug: false,
        }
    }

    /// Generation cannot proceed without a destination; the surrounding UI
    /// re-prompts until one is supplied.
    pub fn validate(&self) -> Result<()> {
        if self.dest.as_os_str().is_empty() {
            return Err(Error::MissingOptions("destination path"));
        }
        Ok(())
    }
}
