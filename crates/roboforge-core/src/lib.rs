//! RoboForge Core - template/example sync and project materialization
//!
//! This library keeps local template and example archive stores current
//! against a remote Maven-layout repository and materializes new robot
//! projects (and read-only example views) out of the downloaded archives.
//!
//! # Architecture
//!
//! The modules are layered, leaves first:
//!
//! - **repo** - repository descriptors and store path computation (no I/O)
//! - **remote** - HTTP metadata client: version manifest plus hash sidecar
//! - **sync** - hash-marker freshness check and archive download
//! - **archive** - zip entry listing and per-entry reads
//! - **project** - template extraction, descriptor substitution, wrapper
//!   bootstrap
//! - **example** - example extraction with per-session memoization
//!
//! Repository descriptors are plain values created by the caller and passed
//! by reference into the updater and materializers; the library keeps no
//! global state. Network and archive access sit behind small traits
//! ([`HttpFetch`], [`ArchiveReader`], [`project::WrapperBootstrap`]) so the
//! workflows can be exercised hermetically.
//!
//! # Example Usage
//!
//! ```ignore
//! use roboforge_core::{HttpClient, Language, Repository, Updater, USER_AGENT};
//!
//! let templates = Repository::templates(settings.templates_root());
//! let updater = Updater::new(HttpClient::new(USER_AGENT));
//! match updater.sync(&templates, Language::Java).await? {
//!     SyncOutcome::UpToDate => {}
//!     SyncOutcome::Updated { version } => println!("now at {version}"),
//! }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod example;
pub mod project;
pub mod remote;
pub mod repo;
pub mod sync;

// Re-export main types for convenience
pub use archive::{ArchiveEntry, ArchiveReader, EntryKind, ZipReader};
pub use config::Settings;
pub use error::{Error, Result};
pub use example::{find_main_file, ExampleInfo, ExampleLoader};
pub use project::{GradleBootstrap, ProjectGenerator, ProjectOptions, ProjectType};
pub use remote::{HttpClient, HttpFetch, MetadataClient, VersionManifest};
pub use repo::{Language, RepoKind, Repository};
pub use sync::{SyncOutcome, Updater};

/// User agent presented to the remote repository.
pub const USER_AGENT: &str = concat!("roboforge/", env!("CARGO_PKG_VERSION"));
