//! Archived conversation sessions produced by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPart {
    #[serde(default)]
    pub text: String,
}

/// One turn of an archived conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// `"user"` or `"model"`.
    pub role: String,
    #[serde(default)]
    pub parts: Vec<TurnPart>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![TurnPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![TurnPart { text: text.into() }],
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    /// Speaker label shown in the history view.
    pub fn speaker(&self) -> &'static str {
        if self.is_user() {
            "You"
        } else {
            "AI Assistant"
        }
    }

    /// Concatenated text of all parts, or `"No content"` when empty.
    pub fn display_text(&self) -> String {
        let text: String = self
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            "No content".to_string()
        } else {
            text
        }
    }
}

/// A finished session as stored by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    pub session_id: String,
    /// Epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

impl ConversationSession {
    /// Short preview for list rows: first user turn, truncated.
    pub fn preview(&self, max_chars: usize) -> String {
        let first = self
            .conversation_history
            .iter()
            .find(|t| t.is_user())
            .or_else(|| self.conversation_history.first())
            .map(|t| t.display_text())
            .unwrap_or_else(|| "No content".to_string());
        if first.chars().count() > max_chars {
            let truncated: String = first.chars().take(max_chars).collect();
            format!("{}...", truncated)
        } else {
            first
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_labels() {
        assert_eq!(ConversationTurn::user("hi").speaker(), "You");
        assert_eq!(ConversationTurn::model("hello").speaker(), "AI Assistant");
    }

    #[test]
    fn test_empty_turn_shows_no_content() {
        let turn = ConversationTurn {
            role: "model".to_string(),
            parts: vec![],
        };
        assert_eq!(turn.display_text(), "No content");
    }

    #[test]
    fn test_deserialize_host_format() {
        let json = r#"{
            "sessionId": "s1",
            "timestamp": 1767323045000,
            "profile": "sales",
            "conversationHistory": [
                {"role": "user", "parts": [{"text": "price?"}]},
                {"role": "model", "parts": [{"text": "It depends"}]}
            ]
        }"#;
        let session: ConversationSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.timestamp.timestamp_millis(), 1767323045000);
        assert_eq!(session.conversation_history.len(), 2);
        assert_eq!(session.preview(80), "price?");
    }

    #[test]
    fn test_preview_truncates() {
        let session = ConversationSession {
            session_id: "s".to_string(),
            timestamp: Utc::now(),
            profile: String::new(),
            conversation_history: vec![ConversationTurn::user("abcdefghij")],
        };
        assert_eq!(session.preview(4), "abcd...");
    }
}
