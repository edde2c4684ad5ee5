//! Navigation links — the static, ordered set of page sections the header points at.
//!
//! The link set is created once at startup and never mutated. Document order of
//! the links is the order the scroll tracker probes sections in.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// A single header link pointing at a section by its DOM identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub target_id: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_id: target_id.into(),
        }
    }

    /// Builds a link from an in-page anchor such as `#about`.
    pub fn from_href(label: impl Into<String>, href: &str) -> Self {
        Self::new(label, href.strip_prefix('#').unwrap_or(href))
    }

    pub fn href(&self) -> String {
        format!("#{}", self.target_id)
    }
}

/// The link set shipped with the site, in document order.
pub fn default_links() -> Vec<NavLink> {
    [
        ("About", "about"),
        ("Experience", "experience"),
        ("Skills", "skills"),
        ("Work Projects", "work-projects"),
        ("Personal Projects", "personal-projects"),
        ("Education", "education"),
        ("Contact", "contact"),
    ]
    .into_iter()
    .map(|(label, id)| NavLink::new(label, id))
    .collect()
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read nav manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("nav manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("nav manifest has no links")]
    Empty,

    #[error("link '{label}' has an empty target id")]
    EmptyTarget { label: String },

    #[error("target id '{0}' appears more than once")]
    DuplicateTarget(String),
}

/// On-disk manifest format: `{ "links": [{ "label": ..., "targetId": ... }] }`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    links: Vec<NavLink>,
}

/// Parses and validates a manifest document.
pub fn parse_manifest(raw: &str) -> Result<Vec<NavLink>, ManifestError> {
    let manifest: ManifestFile = serde_json::from_str(raw)?;
    validate_links(manifest.links)
}

/// Loads a manifest file, or the default link set when no path is configured.
pub fn load_links(path: Option<&Path>) -> Result<Vec<NavLink>, ManifestError> {
    let Some(path) = path else {
        return Ok(default_links());
    };

    let raw = std::fs::read_to_string(path)?;
    let links = parse_manifest(&raw).inspect_err(|e| {
        warn!("Rejected nav manifest {}: {e}", path.display());
    })?;
    info!("Loaded {} nav links from {}", links.len(), path.display());
    Ok(links)
}

/// Normalizes `#id` targets and rejects empty or duplicate ids.
pub fn validate_links(links: Vec<NavLink>) -> Result<Vec<NavLink>, ManifestError> {
    if links.is_empty() {
        return Err(ManifestError::Empty);
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(links.len());
    for link in links {
        // Accept "#id" in manifests authored from anchor hrefs.
        let link = NavLink::from_href(link.label, link.target_id.trim());
        if link.target_id.is_empty() {
            return Err(ManifestError::EmptyTarget { label: link.label });
        }
        if !seen.insert(link.target_id.clone()) {
            return Err(ManifestError::DuplicateTarget(link.target_id));
        }
        validated.push(link);
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_links_in_document_order() {
        let ids: Vec<String> = default_links().into_iter().map(|l| l.target_id).collect();
        assert_eq!(
            ids,
            vec![
                "about",
                "experience",
                "skills",
                "work-projects",
                "personal-projects",
                "education",
                "contact"
            ]
        );
    }

    #[test]
    fn test_from_href_strips_hash() {
        let link = NavLink::from_href("Contact", "#contact");
        assert_eq!(link.target_id, "contact");
        assert_eq!(link.href(), "#contact");
    }

    #[test]
    fn test_serializes_target_id_camel_case() {
        let json = serde_json::to_value(NavLink::new("About", "about")).unwrap();
        assert_eq!(json["targetId"], "about");
        assert_eq!(json["label"], "About");
    }

    #[test]
    fn test_parse_manifest_normalizes_hash_targets() {
        let links =
            parse_manifest(r##"{"links":[{"label":"About","targetId":"#about"}]}"##).unwrap();
        assert_eq!(links, vec![NavLink::new("About", "about")]);
    }

    #[test]
    fn test_parse_manifest_rejects_duplicates() {
        let err = parse_manifest(
            r#"{"links":[{"label":"A","targetId":"about"},{"label":"B","targetId":"about"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateTarget(id) if id == "about"));
    }

    #[test]
    fn test_parse_manifest_rejects_empty_target() {
        let err = parse_manifest(r##"{"links":[{"label":"Top","targetId":"#"}]}"##).unwrap_err();
        assert!(matches!(err, ManifestError::EmptyTarget { label } if label == "Top"));
    }

    #[test]
    fn test_parse_manifest_rejects_empty_list() {
        assert!(matches!(
            parse_manifest(r#"{"links":[]}"#),
            Err(ManifestError::Empty)
        ));
    }

    #[test]
    fn test_load_links_without_path_uses_defaults() {
        assert_eq!(load_links(None).unwrap(), default_links());
    }

    #[test]
    fn test_load_links_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"links":[{{"label":"Skills","targetId":"skills"}},{{"label":"Contact","targetId":"contact"}}]}}"#
        )
        .unwrap();

        let links = load_links(Some(file.path())).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].target_id, "contact");
    }

    #[test]
    fn test_load_links_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_links(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
