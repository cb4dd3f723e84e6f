//! Version manifest (`maven-metadata.xml`) parsing.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Parsed remote metadata. Only the latest-release coordinate is consumed;
/// the document itself is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionManifest {
    pub release: String,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    versioning: Versioning,
}

#[derive(Debug, Deserialize)]
struct Versioning {
    release: String,
}

/// Extract the latest release version out of a metadata document.
pub fn parse_manifest(xml: &str) -> Result<VersionManifest> {
    let metadata: Metadata = quick_xml::de::from_str(xml).map_err(|e| Error::Parse {
        what: "maven-metadata.xml",
        detail: e.to_string(),
    })?;
    Ok(VersionManifest {
        release: metadata.versioning.release,
    })
}
