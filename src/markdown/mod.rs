//! Markdown rendering for the terminal
//!
//! Converts markdown text into styled lines of [`StyledFragment`]s. Each
//! fragment is tagged with a [`FragmentKind`] so the reveal animation knows
//! which pieces contain words and which are shown whole (code, bullets,
//! table borders).
//!
//! Handles code blocks, inline code, bold, italic, headings, lists, tables
//! and links. [`MarkdownCache`] memoizes parsed output by content hash.
//!
//! URL Detection:
//! - Detects markdown links `[text](url)` via pulldown_cmark events
//! - Detects plain text URLs using regex pattern `https?://[^\s<>\[\]]+`

mod cache;
mod links;
mod styles;

pub use cache::MarkdownCache;
pub use links::{detect_plain_urls, LinkInfo};
pub use styles::{STYLE_CODE_BLOCK, STYLE_HEADING, STYLE_INLINE_CODE, STYLE_LINK};

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use thiserror::Error;

use links::text_with_urls;
use styles::{STYLE_QUOTE_BAR, STYLE_TABLE_BORDER, STYLE_TABLE_HEADER};

/// Maximum number of entries in the markdown cache before eviction
pub const MARKDOWN_CACHE_MAX_ENTRIES: usize = 500;

/// How a fragment takes part in the word reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Prose, split into words
    Text,
    /// Inline code or a code block line, shown whole and never split
    Atomic,
    /// Bullets, numbering and table borders
    Decoration,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFragment {
    pub text: String,
    pub style: Style,
    pub kind: FragmentKind,
}

impl StyledFragment {
    pub fn new(text: impl Into<String>, style: Style, kind: FragmentKind) -> Self {
        Self {
            text: text.into(),
            style,
            kind,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownLine {
    pub fragments: Vec<StyledFragment>,
}

impl MarkdownLine {
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.text.is_empty())
    }

    /// Concatenated text of the line.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

impl From<Vec<StyledFragment>> for MarkdownLine {
    fn from(fragments: Vec<StyledFragment>) -> Self {
        Self { fragments }
    }
}

/// Rendered markdown plus every link found in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedMarkdown {
    pub lines: Vec<MarkdownLine>,
    pub links: Vec<LinkInfo>,
}

impl RenderedMarkdown {
    /// Unstyled rendering of raw text, one line per input line.
    pub fn plain(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| {
                MarkdownLine::from(vec![StyledFragment::new(
                    l,
                    Style::default(),
                    FragmentKind::Text,
                )])
            })
            .collect();
        Self {
            lines,
            links: detect_plain_urls(text),
        }
    }

    /// Fully visible ratatui lines.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.lines
            .iter()
            .map(|line| {
                Line::from(
                    line.fragments
                        .iter()
                        .map(|f| Span::styled(f.text.clone(), f.style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Error type for markdown renderers.
#[derive(Debug, Clone, Error)]
#[error("Markdown rendering failed: {0}")]
pub struct MarkdownError(pub String);

/// A markdown capability.
pub trait MarkdownRenderer: Send {
    fn render(&mut self, text: &str) -> Result<RenderedMarkdown, MarkdownError>;
}

/// pulldown-cmark renderer with a memo cache.
#[derive(Default)]
pub struct PulldownRenderer {
    cache: MarkdownCache,
}

impl PulldownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &MarkdownCache {
        &self.cache
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&mut self, text: &str) -> Result<RenderedMarkdown, MarkdownError> {
        Ok(self.cache.render(text))
    }
}

/// Render markdown text to styled lines with link detection.
///
/// Gracefully handles incomplete markdown during streaming by rendering
/// partial content without crashing.
pub fn render_markdown(text: &str) -> RenderedMarkdown {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = LineBuilder::default();
    let mut links: Vec<LinkInfo> = Vec::new();

    // Style stack for nested formatting
    let mut style_stack: Vec<Style> = vec![Style::default()];
    let mut in_code_block = false;

    // Numbering per open list; None for bullet lists
    let mut list_stack: Vec<Option<u64>> = Vec::new();

    let mut current_link_url: Option<String> = None;
    let mut current_link_text = String::new();

    let mut in_table = false;
    let mut table_rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();

    for event in parser {
        let current_style = *style_stack.last().unwrap_or(&Style::default());
        match event {
            Event::Start(tag) => match tag {
                Tag::CodeBlock(_) => {
                    out.flush();
                    in_code_block = true;
                    style_stack.push(styles::STYLE_CODE_BLOCK);
                }
                Tag::Heading { .. } => {
                    out.flush();
                    style_stack.push(styles::STYLE_HEADING);
                }
                Tag::Strong => style_stack.push(current_style.add_modifier(Modifier::BOLD)),
                Tag::Emphasis => style_stack.push(current_style.add_modifier(Modifier::ITALIC)),
                Tag::Strikethrough => {
                    style_stack.push(current_style.add_modifier(Modifier::CROSSED_OUT))
                }
                Tag::Paragraph => out.flush(),
                Tag::BlockQuote { .. } => {
                    out.flush();
                    out.quote_depth += 1;
                }
                Tag::List(start) => list_stack.push(start),
                Tag::Item => {
                    out.flush();
                    let depth = list_stack.len().saturating_sub(1);
                    let marker = match list_stack.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}{}. ", "  ".repeat(depth), n);
                            *n += 1;
                            marker
                        }
                        _ => format!("{}• ", "  ".repeat(depth)),
                    };
                    out.push(StyledFragment::new(
                        marker,
                        current_style,
                        FragmentKind::Decoration,
                    ));
                }
                Tag::Link { dest_url, .. } => {
                    current_link_url = Some(dest_url.to_string());
                    current_link_text.clear();
                    style_stack.push(current_style.patch(styles::STYLE_LINK));
                }
                Tag::Table(_) => {
                    out.flush();
                    in_table = true;
                    table_rows.clear();
                }
                Tag::TableHead | Tag::TableRow => current_row.clear(),
                Tag::TableCell => current_cell.clear(),
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::CodeBlock => {
                    out.flush();
                    in_code_block = false;
                    style_stack.pop();
                }
                TagEnd::Heading(_) => {
                    out.flush();
                    style_stack.pop();
                }
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => {
                    style_stack.pop();
                }
                TagEnd::Paragraph | TagEnd::Item => out.flush(),
                TagEnd::BlockQuote { .. } => {
                    out.flush();
                    out.quote_depth = out.quote_depth.saturating_sub(1);
                }
                TagEnd::List(_) => {
                    list_stack.pop();
                }
                TagEnd::Link => {
                    if let Some(url) = current_link_url.take() {
                        links.push(LinkInfo::new(url, std::mem::take(&mut current_link_text)));
                    }
                    style_stack.pop();
                }
                TagEnd::TableCell => current_row.push(std::mem::take(&mut current_cell)),
                TagEnd::TableHead | TagEnd::TableRow => {
                    if !current_row.is_empty() {
                        table_rows.push(std::mem::take(&mut current_row));
                    }
                }
                TagEnd::Table => {
                    render_table(&table_rows, &mut out.lines);
                    in_table = false;
                    table_rows.clear();
                }
                _ => {}
            },
            Event::Text(text) => {
                if current_link_url.is_some() {
                    current_link_text.push_str(&text);
                }

                if in_table {
                    current_cell.push_str(&text);
                } else if in_code_block {
                    // Each code line is a separate, unsplittable fragment
                    let mut first = true;
                    for line in text.split('\n') {
                        if !first {
                            out.break_line();
                        }
                        first = false;
                        if !line.is_empty() {
                            out.push(StyledFragment::new(
                                line,
                                current_style,
                                FragmentKind::Atomic,
                            ));
                        }
                    }
                } else {
                    for (i, part) in text.split('\n').enumerate() {
                        if i > 0 {
                            out.break_line();
                            out.blank();
                        }
                        if part.is_empty() {
                            continue;
                        }
                        if current_link_url.is_some() {
                            out.push(StyledFragment::new(part, current_style, FragmentKind::Text));
                        } else {
                            out.extend(text_with_urls(part, current_style, &mut links));
                        }
                    }
                }
            }
            Event::Code(code) => {
                if in_table {
                    current_cell.push_str(&code);
                } else {
                    out.push(StyledFragment::new(
                        code.to_string(),
                        styles::STYLE_INLINE_CODE,
                        FragmentKind::Atomic,
                    ));
                }
            }
            Event::SoftBreak => {
                if in_table {
                    current_cell.push(' ');
                } else {
                    // Streamed content reads better with paragraph spacing
                    out.break_line();
                    out.blank();
                }
            }
            Event::HardBreak => {
                if in_table {
                    current_cell.push(' ');
                } else {
                    out.break_line();
                }
            }
            _ => {}
        }
    }

    out.flush();
    if out.lines.is_empty() {
        out.lines.push(MarkdownLine::default());
    }

    RenderedMarkdown {
        lines: out.lines,
        links,
    }
}

/// Accumulates fragments into lines.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<MarkdownLine>,
    current: Vec<StyledFragment>,
    quote_depth: usize,
}

impl LineBuilder {
    fn push(&mut self, fragment: StyledFragment) {
        self.quote_bar();
        self.current.push(fragment);
    }

    fn extend(&mut self, fragments: Vec<StyledFragment>) {
        if fragments.is_empty() {
            return;
        }
        self.quote_bar();
        self.current.extend(fragments);
    }

    /// Lines inside a block quote start with one bar per nesting level.
    fn quote_bar(&mut self) {
        if self.current.is_empty() && self.quote_depth > 0 {
            self.current.push(StyledFragment::new(
                "│ ".repeat(self.quote_depth),
                STYLE_QUOTE_BAR,
                FragmentKind::Decoration,
            ));
        }
    }

    /// End the current line if it has content.
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    /// End the current line even if empty.
    fn break_line(&mut self) {
        self.lines
            .push(MarkdownLine::from(std::mem::take(&mut self.current)));
    }

    fn blank(&mut self) {
        self.lines.push(MarkdownLine::default());
    }
}

/// Render collected table rows with box-drawing borders.
fn render_table(table_rows: &[Vec<String>], lines: &mut Vec<MarkdownLine>) {
    let num_cols = table_rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if num_cols == 0 {
        return;
    }

    let mut col_widths: Vec<usize> = vec![3; num_cols];
    for row in table_rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(unicode_width::UnicodeWidthStr::width(cell.trim()));
        }
    }

    let border = |left, middle, right| {
        MarkdownLine::from(vec![StyledFragment::new(
            build_table_border(&col_widths, left, middle, right),
            STYLE_TABLE_BORDER,
            FragmentKind::Decoration,
        )])
    };
    let bar = || StyledFragment::new("│", STYLE_TABLE_BORDER, FragmentKind::Decoration);

    lines.push(border('┌', '┬', '┐'));

    for (row_idx, row) in table_rows.iter().enumerate() {
        let style = if row_idx == 0 {
            STYLE_TABLE_HEADER
        } else {
            Style::default()
        };
        let mut fragments = vec![bar()];
        for (col_idx, width) in col_widths.iter().enumerate() {
            let content = row.get(col_idx).map(|c| c.trim()).unwrap_or("");
            let pad = width.saturating_sub(unicode_width::UnicodeWidthStr::width(content));
            fragments.push(StyledFragment::new(
                format!(" {}{} ", content, " ".repeat(pad)),
                style,
                FragmentKind::Text,
            ));
            fragments.push(bar());
        }
        lines.push(MarkdownLine::from(fragments));

        if row_idx == 0 && table_rows.len() > 1 {
            lines.push(border('├', '┼', '┤'));
        }
    }

    lines.push(border('└', '┴', '┘'));
    lines.push(MarkdownLine::default());
}

/// Build a table border line with the given corner and junction characters.
fn build_table_border(col_widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut border = String::new();
    border.push(left);
    for (i, &width) in col_widths.iter().enumerate() {
        // +2 for padding on each side of cell content
        border.push_str(&"─".repeat(width + 2));
        if i < col_widths.len() - 1 {
            border.push(middle);
        }
    }
    border.push(right);
    border
}
