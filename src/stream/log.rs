//! Session-scoped list of responses.

/// Ordered responses for the current session plus the selected index.
///
/// `current_index` is `None` until the first response arrives and always
/// points inside `entries` afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLog {
    entries: Vec<String>,
    current_index: Option<usize>,
}

impl ResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Text of the selected response.
    pub fn current(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    /// Index of the newest entry.
    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Append a response and select it.
    pub fn push(&mut self, text: impl Into<String>) -> usize {
        self.entries.push(text.into());
        let index = self.entries.len() - 1;
        self.current_index = Some(index);
        index
    }

    /// Replace the newest entry's text. Returns its index, or `None` when empty.
    pub fn replace_last(&mut self, text: impl Into<String>) -> Option<usize> {
        let index = self.last_index()?;
        self.entries[index] = text.into();
        Some(index)
    }

    /// Select the previous response. Returns true if the selection moved.
    pub fn select_previous(&mut self) -> bool {
        match self.current_index {
            Some(i) if i > 0 => {
                self.current_index = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Select the next response. Returns true if the selection moved.
    pub fn select_next(&mut self) -> bool {
        match (self.current_index, self.last_index()) {
            (Some(i), Some(last)) if i < last => {
                self.current_index = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_index = None;
    }

    /// Position label such as `"2/5"`.
    pub fn counter(&self) -> Option<String> {
        self.current_index
            .map(|i| format!("{}/{}", i + 1, self.entries.len()))
    }
}
