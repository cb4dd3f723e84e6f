//! Keeps the local archive stores in step with the remote repositories.
//!
//! Freshness is decided by comparing the persisted metadata hash marker
//! against the freshly fetched sidecar; the manifest itself is refetched on
//! every check and never stored.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::remote::{HttpFetch, MetadataClient};
use crate::repo::{Language, Repository};

/// What [`Updater::sync`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Stored marker matches the remote hash; nothing was written.
    UpToDate,
    /// A fresh archive was downloaded for this release.
    Updated { version: String },
}

/// Version cache and download engine for one or more repositories.
pub struct Updater<F> {
    metadata: MetadataClient<F>,
}

impl<F: HttpFetch> Updater<F> {
    pub fn new(http: F) -> Self {
        Self {
            metadata: MetadataClient::new(http),
        }
    }

    /// Compare the stored metadata hash against the remote one; download the
    /// latest release archive when they differ or no marker exists yet.
    ///
    /// The marker is persisted only after the archive write succeeds, so a
    /// failed download never leaves a marker claiming a newer archive than
    /// the store actually holds. An unreadable marker is treated as a cold
    /// start.
    pub async fn sync(&self, repo: &Repository, lang: Language) -> Result<SyncOutcome> {
        let marker = repo.marker_path(lang);
        let remote_hash = self.metadata.manifest_hash(repo, lang).await?;

        if let Ok(stored) = fs::read_to_string(&marker).await {
            if stored == remote_hash {
                debug!(
                    repo = repo.display_name(),
                    lang = lang.key(),
                    "store up to date"
                );
                return Ok(SyncOutcome::UpToDate);
            }
        }

        let version = self.metadata.latest_version(repo, lang).await?;
        let bytes = self
            .metadata
            .http()
            .get_bytes(&repo.archive_url(lang, &version)?)
            .await?;

        let dir = repo.local_dir(lang);
        fs::create_dir_all(&dir).await.map_err(Error::fs(&dir))?;
        let archive = repo.archive_path(lang, &version);
        fs::write(&archive, &bytes)
            .await
            .map_err(Error::fs(&archive))?;
        fs::write(&marker, remote_hash.as_bytes())
            .await
            .map_err(Error::fs(&marker))?;

        info!(
            repo = repo.display_name(),
            lang = lang.key(),
            version,
            "archive downloaded"
        );
        Ok(SyncOutcome::Updated { version })
    }

    /// Store path of the archive for the current remote release. Resolves
    /// the release over the network; run [`Updater::sync`] first to make
    /// sure the archive is actually present there.
    pub async fn latest_archive_path(&self, repo: &Repository, lang: Language) -> Result<PathBuf> {
        let version = self.metadata.latest_version(repo, lang).await?;
        Ok(repo.archive_path(lang, &version))
    }
}
