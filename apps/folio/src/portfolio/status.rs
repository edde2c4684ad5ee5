use serde::{Deserialize, Serialize};

/// Lifecycle badge shown on a personal project card.
///
/// Deserializes leniently through [`normalize_status`], so legacy values
/// such as `archived` still load. Serializes as the canonical kebab-case tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ProjectStatus {
    Ideation,
    InProgress,
    #[default]
    Completed,
}

impl ProjectStatus {
    /// Badge text.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Ideation => "Ideation",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        normalize_status(&raw)
    }
}

/// Case-insensitive. `archived` predates the ideation/in-progress split and
/// maps to `Completed`, as does anything unrecognized.
pub fn normalize_status(raw: &str) -> ProjectStatus {
    match raw.trim().to_ascii_lowercase().as_str() {
        "ideation" => ProjectStatus::Ideation,
        "in-progress" | "in progress" => ProjectStatus::InProgress,
        _ => ProjectStatus::Completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(normalize_status("ideation"), ProjectStatus::Ideation);
        assert_eq!(normalize_status("in-progress"), ProjectStatus::InProgress);
        assert_eq!(normalize_status("In Progress"), ProjectStatus::InProgress);
        assert_eq!(normalize_status("COMPLETED"), ProjectStatus::Completed);
    }

    #[test]
    fn test_archived_maps_to_completed() {
        assert_eq!(normalize_status("archived"), ProjectStatus::Completed);
        assert_eq!(normalize_status("Archived").label(), "Completed");
    }

    #[test]
    fn test_unknown_status_falls_back_to_completed() {
        assert_eq!(normalize_status("on-hold"), ProjectStatus::Completed);
        assert_eq!(normalize_status(""), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Completed);
    }

    #[test]
    fn test_serde_is_lenient_in_and_canonical_out() {
        let status: ProjectStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, ProjectStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in-progress\"");

        let legacy: ProjectStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(serde_json::to_string(&legacy).unwrap(), "\"completed\"");
    }
}
