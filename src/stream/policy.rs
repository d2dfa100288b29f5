//! Fragment and status classification.
//!
//! Both word lists are tuned against the host's current phrasing and are
//! kept as plain configuration values.

/// Decides whether a fragment is a short acknowledgement rather than part
/// of a substantive answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillerPolicy {
    /// Lowercase phrases that mark a fragment as filler.
    pub phrases: Vec<String>,
    /// Fragments of this many characters or more are never filler.
    pub max_chars: usize,
}

impl Default for FillerPolicy {
    fn default() -> Self {
        Self {
            phrases: ["hmm", "okay", "next", "go on", "continue"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_chars: 30,
        }
    }
}

impl FillerPolicy {
    /// A fragment is filler when it is shorter than `max_chars` and either
    /// contains a filler phrase or is the start of one still streaming in
    /// (`"ok"` on its way to `"okay"`).
    pub fn is_filler(&self, fragment: &str) -> bool {
        if fragment.chars().count() >= self.max_chars {
            return false;
        }
        let lower = fragment.to_lowercase();
        let trimmed = lower.trim();
        self.phrases.iter().any(|phrase| {
            lower.contains(phrase.as_str())
                || (!trimmed.is_empty() && phrase.starts_with(trimmed))
        })
    }
}

/// Status markers that end the current response turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    pub markers: Vec<String>,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            markers: ["ready", "listening", "error"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl StatusPolicy {
    /// Case-insensitive containment check.
    pub fn is_terminal(&self, status: &str) -> bool {
        let lower = status.to_lowercase();
        self.markers.iter().any(|m| lower.contains(m.as_str()))
    }
}
