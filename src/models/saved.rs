//! Responses the user chose to keep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A response pinned by the user.
///
/// Two saved responses are duplicates when their `response` text is equal;
/// timestamp and profile are ignored for that comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub profile: String,
}

impl SavedResponse {
    pub fn new(response: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            timestamp: Utc::now(),
            profile: profile.into(),
        }
    }

    /// True if this saves the same text as `other`.
    pub fn same_text(&self, other: &str) -> bool {
        self.response == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_field_names() {
        let saved = SavedResponse::new("Answer", "interview");
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["response"], "Answer");
        assert_eq!(json["profile"], "interview");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_same_text_ignores_metadata() {
        let saved = SavedResponse::new("Answer", "sales");
        assert!(saved.same_text("Answer"));
        assert!(!saved.same_text("answer"));
    }
}
