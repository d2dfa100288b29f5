//! Memoization cache for markdown rendering
//!
//! Navigating back and forth between responses re-renders the same texts,
//! so parsed output is kept keyed by a hash of the input.

use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};

use super::{render_markdown, RenderedMarkdown, MARKDOWN_CACHE_MAX_ENTRIES};

/// Memoization cache for markdown rendering with oldest-first eviction.
#[derive(Debug)]
pub struct MarkdownCache {
    entries: HashMap<u64, RenderedMarkdown>,
    insertion_order: VecDeque<u64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for MarkdownCache {
    fn default() -> Self {
        Self::with_capacity(MARKDOWN_CACHE_MAX_ENTRIES)
    }
}

impl MarkdownCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    fn hash_content(content: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        hasher.finish()
    }

    /// Render markdown, reusing a previous result for identical content.
    pub fn render(&mut self, content: &str) -> RenderedMarkdown {
        let hash = Self::hash_content(content);

        if let Some(cached) = self.entries.get(&hash) {
            self.hits += 1;
            return cached.clone();
        }

        self.misses += 1;
        let rendered = render_markdown(content);

        while self.entries.len() >= self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.entries.insert(hash, rendered.clone());
        self.insertion_order.push_back(hash);
        rendered
    }

    /// Cache statistics as `(hits, misses)`.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries; statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
