//! Remote repository metadata access.
//!
//! No caching happens at this layer: every call hits the network. Freshness
//! decisions belong to the updater.

pub mod http;
pub mod manifest;

pub use http::{HttpClient, HttpFetch};
pub use manifest::VersionManifest;

use crate::error::Result;
use crate::repo::{Language, Repository};

/// Fetches version metadata for a repository over an [`HttpFetch`] seam.
pub struct MetadataClient<F> {
    http: F,
}

impl<F: HttpFetch> MetadataClient<F> {
    pub fn new(http: F) -> Self {
        Self { http }
    }

    /// Raw content of the metadata hash sidecar.
    pub async fn manifest_hash(&self, repo: &Repository, lang: Language) -> Result<String> {
        self.http.get_text(&repo.metadata_hash_url(lang)?).await
    }

    /// Fetched and parsed metadata document.
    pub async fn manifest(&self, repo: &Repository, lang: Language) -> Result<VersionManifest> {
        let body = self.http.get_text(&repo.metadata_url(lang)?).await?;
        manifest::parse_manifest(&body)
    }

    /// Latest published release version.
    pub async fn latest_version(&self, repo: &Repository, lang: Language) -> Result<String> {
        Ok(self.manifest(repo, lang).await?.release)
    }

    pub(crate) fn http(&self) -> &F {
        &self.http
    }
}
