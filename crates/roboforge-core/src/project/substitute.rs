//! `${key}` token substitution for generated build descriptors.

use std::collections::BTreeMap;

use crate::config::LATEST;
use crate::error::{Error, Result};

/// Enumerated substitution values for one generation run.
///
/// Applied in a single deterministic pass; placeholders outside the
/// enumerated set are rejected rather than silently left in place.
#[derive(Debug, Default)]
pub struct SubstitutionTable {
    values: BTreeMap<String, String>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Replace every `${key}` occurrence in `template`. An unterminated
    /// `${` run is not a placeholder and passes through verbatim.
    pub fn apply(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        loop {
            let Some(start) = rest.find("${") else {
                out.push_str(rest);
                break;
            };
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                break;
            };
            let key = &after[..end];
            let value = self
                .values
                .get(key)
                .ok_or_else(|| Error::UnknownPlaceholder(key.to_string()))?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        Ok(out)
    }
}

/// Render the properties file: the substituted template plus one
/// `key=value` line per pinned override. The `"latest"` sentinel stays
/// unpinned and appends nothing.
pub fn render_properties(
    table: &SubstitutionTable,
    template: &str,
    overrides: &BTreeMap<String, String>,
) -> Result<String> {
    let mut text = table.apply(template)?;
    for (key, version) in overrides {
        if version != LATEST {
            text.push_str(&format!("{key}={version}\n"));
        }
    }
    Ok(text)
}
