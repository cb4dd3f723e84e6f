//! Error taxonomy shared across the library.

use std::path::PathBuf;

/// All failures the sync and materialization paths can surface.
///
/// Everything carries its original cause; callers decide presentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed remote manifest, catalog or settings document.
    #[error("failed to parse {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    /// I/O failure, annotated with the path it occurred on. Directory
    /// creation treats "already exists" as success and never surfaces here.
    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corrupt or unreadable archive.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Archive lookup miss.
    #[error("entry not found in archive: {0}")]
    EntryNotFound(String),

    /// Wrapper bootstrap exited non-zero or produced error output.
    #[error("build tool error: {0}")]
    BuildTool(String),

    /// No canonical entry point among the extracted example files.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Materialization invoked without a required option.
    #[error("missing project options: {0}")]
    MissingOptions(&'static str),

    /// A `${key}` placeholder outside the enumerated substitution set.
    #[error("unknown placeholder ${{{0}}}")]
    UnknownPlaceholder(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Adapter for `map_err` on filesystem calls: tags the error with the
    /// path being operated on.
    pub(crate) fn fs(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Filesystem { path, source }
    }
}
