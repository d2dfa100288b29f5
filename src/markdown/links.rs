//! Link detection for markdown rendering
//!
//! - Markdown links `[text](url)` come from pulldown_cmark events
//! - Plain text URLs are matched with `https?://[^\s<>\[\]]+`

use once_cell::sync::Lazy;
use ratatui::style::Style;
use regex::Regex;

use super::styles::STYLE_LINK;
use super::{FragmentKind, StyledFragment};

/// Regex pattern for detecting plain text URLs (http:// or https://)
/// Matches URLs that don't contain whitespace, angle brackets, or square brackets
pub(crate) static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]]+").expect("Invalid URL regex pattern"));

/// A link found in rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub url: String,
    /// Display text; equal to `url` for plain URLs.
    pub text: String,
}

impl LinkInfo {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Detect plain text URLs in a string.
pub fn detect_plain_urls(text: &str) -> Vec<LinkInfo> {
    URL_REGEX
        .find_iter(text)
        .map(|m| LinkInfo::new(m.as_str(), m.as_str()))
        .collect()
}

/// Split text into fragments, styling plain URLs as links and recording them.
pub(crate) fn text_with_urls(
    text: &str,
    base_style: Style,
    links: &mut Vec<LinkInfo>,
) -> Vec<StyledFragment> {
    let mut fragments = Vec::new();
    let mut last_end = 0;

    for m in URL_REGEX.find_iter(text) {
        if m.start() > last_end {
            fragments.push(StyledFragment::new(
                &text[last_end..m.start()],
                base_style,
                FragmentKind::Text,
            ));
        }
        fragments.push(StyledFragment::new(
            m.as_str(),
            base_style.patch(STYLE_LINK),
            FragmentKind::Text,
        ));
        links.push(LinkInfo::new(m.as_str(), m.as_str()));
        last_end = m.end();
    }

    if last_end < text.len() {
        fragments.push(StyledFragment::new(
            &text[last_end..],
            base_style,
            FragmentKind::Text,
        ));
    }

    fragments
}
