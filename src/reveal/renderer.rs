//! Incremental word-by-word reveal of rendered markdown.

use std::time::Duration;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use super::animation::{fade_style, WordVisibility};
use super::task::{RevealStep, RevealTask};
use super::tokenizer::tokenize;
use super::wrapping::{wrap_pieces, WrapPiece};
use crate::markdown::{
    FragmentKind, LinkInfo, MarkdownRenderer, PulldownRenderer, RenderedMarkdown,
};
use crate::traits::RevealScheduler;

/// Default delay between consecutive words.
pub const DEFAULT_STAGGER_MS: u64 = 100;

/// Longest accepted delay between consecutive words.
pub const MAX_STAGGER_MS: u64 = 2_000;

/// Default duration of a single word's fade.
pub const DEFAULT_FADE_MS: u64 = 500;

/// Reveal timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    pub stagger: Duration,
    pub fade: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
            fade: Duration::from_millis(DEFAULT_FADE_MS),
        }
    }
}

/// Result of one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Words in the new content; pass back as `previous_revealed` next time.
    pub revealed_count: usize,
    /// Words scheduled to fade in.
    pub scheduled_words: usize,
    /// Markdown failed and the raw text is shown instead.
    pub fell_back: bool,
}

/// What applying a reveal task did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The task belongs to content that has since been replaced.
    Stale,
    WordShown(usize),
    /// The sequence finished; the owner should stop animating this entry.
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
struct RevealSpan {
    text: String,
    style: Style,
    word: Option<usize>,
}

/// Renders the displayed response and reveals it word by word.
///
/// Words below the previous revealed count show immediately, so content
/// that grows while streaming never re-animates what was already shown.
pub struct IncrementalRenderer {
    markdown: Box<dyn MarkdownRenderer>,
    config: RevealConfig,
    generation: u64,
    text: String,
    lines: Vec<Vec<RevealSpan>>,
    words: Vec<WordVisibility>,
    links: Vec<LinkInfo>,
    /// When the last scheduled sequence finishes, on the scheduler's clock.
    complete_due_ms: Option<u64>,
}

impl Default for IncrementalRenderer {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

impl std::fmt::Debug for IncrementalRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalRenderer")
            .field("generation", &self.generation)
            .field("words", &self.words.len())
            .field("config", &self.config)
            .finish()
    }
}

impl IncrementalRenderer {
    pub fn new(config: RevealConfig) -> Self {
        Self::with_markdown(Box::new(PulldownRenderer::new()), config)
    }

    pub fn with_markdown(markdown: Box<dyn MarkdownRenderer>, config: RevealConfig) -> Self {
        Self {
            markdown,
            config,
            generation: 0,
            text: String::new(),
            lines: Vec::new(),
            words: Vec::new(),
            links: Vec::new(),
            complete_due_ms: None,
        }
    }

    pub fn config(&self) -> RevealConfig {
        self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Source text of the current content.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn visibility(&self) -> &[WordVisibility] {
        &self.words
    }

    pub fn links(&self) -> &[LinkInfo] {
        &self.links
    }

    /// Replace the content and schedule the reveal of any new words.
    ///
    /// Any tasks still pending from an earlier call become stale. An
    /// animated render that adds no words keeps the unfinished sequence's
    /// completion, re-issued for the same moment.
    pub fn render(
        &mut self,
        text: &str,
        should_animate: bool,
        previous_revealed: usize,
        scheduler: &mut dyn RevealScheduler,
    ) -> RenderOutcome {
        self.generation += 1;

        let (markup, fell_back) = match self.markdown.render(text) {
            Ok(markup) => (markup, false),
            Err(e) => {
                warn!("{}, showing raw text", e);
                (RenderedMarkdown::plain(text), true)
            }
        };

        let (lines, total) = layout(&markup);
        self.lines = lines;
        self.links = markup.links;
        self.text = text.to_string();

        let already_shown = if should_animate {
            previous_revealed.min(total)
        } else {
            total
        };
        self.words = (0..total)
            .map(|i| {
                if i < already_shown {
                    WordVisibility::Visible
                } else {
                    WordVisibility::Hidden
                }
            })
            .collect();

        let unfinished = self.complete_due_ms.take();
        let scheduled_words = total - already_shown;
        if scheduled_words > 0 {
            for i in already_shown..total {
                let delay = self.stagger_for(i - already_shown);
                scheduler.schedule_after(
                    delay,
                    RevealTask::new(self.generation, RevealStep::ShowWord(i)),
                );
            }
            let complete_delay = self
                .stagger_for(scheduled_words - 1)
                .saturating_add(self.config.fade);
            scheduler.schedule_after(
                complete_delay,
                RevealTask::new(self.generation, RevealStep::Complete),
            );
            self.complete_due_ms = Some(due_at(scheduler.now_ms(), complete_delay));
        } else if let (true, Some(due)) = (should_animate, unfinished) {
            let remaining = due.saturating_sub(scheduler.now_ms());
            scheduler.schedule_after(
                Duration::from_millis(remaining),
                RevealTask::new(self.generation, RevealStep::Complete),
            );
            self.complete_due_ms = Some(due);
        }

        debug!(
            "Render gen {}: {} words, {} already shown, {} scheduled",
            self.generation, total, already_shown, scheduled_words
        );

        RenderOutcome {
            revealed_count: total,
            scheduled_words,
            fell_back,
        }
    }

    /// Delay of the word `offset` places after the first new one.
    fn stagger_for(&self, offset: usize) -> Duration {
        self.config
            .stagger
            .saturating_mul(u32::try_from(offset).unwrap_or(u32::MAX))
    }

    /// Apply a task delivered by the scheduler.
    pub fn apply(&mut self, task: RevealTask, now_ms: u64) -> ApplyOutcome {
        if task.generation != self.generation {
            return ApplyOutcome::Stale;
        }
        match task.step {
            RevealStep::ShowWord(i) => match self.words.get_mut(i) {
                Some(word) => {
                    if word.is_hidden() {
                        *word = WordVisibility::Fading { since_ms: now_ms };
                    }
                    ApplyOutcome::WordShown(i)
                }
                None => ApplyOutcome::Stale,
            },
            RevealStep::Complete => {
                self.complete_due_ms = None;
                self.words.fill(WordVisibility::Visible);
                ApplyOutcome::Completed
            }
        }
    }

    /// True while a word is hidden or mid-fade.
    pub fn is_animating(&self, now_ms: u64) -> bool {
        let fade_ms = self.config.fade.as_millis() as u64;
        self.words
            .iter()
            .any(|w| w.is_hidden() || w.progress(now_ms, fade_ms) < 1.0)
    }

    /// Styled output at `now_ms`. Hidden words keep their width as blanks
    /// so the layout never shifts while words appear.
    pub fn lines(&self, now_ms: u64) -> Vec<Line<'static>> {
        self.styled(now_ms)
            .into_iter()
            .map(|pieces| Line::from(pieces.into_iter().map(|p| p.span).collect::<Vec<_>>()))
            .collect()
    }

    /// Styled output wrapped at word boundaries to rows of `width` columns.
    pub fn wrapped_lines(&self, now_ms: u64, width: u16) -> Vec<Line<'static>> {
        self.styled(now_ms)
            .into_iter()
            .flat_map(|pieces| wrap_pieces(pieces, width as usize))
            .collect()
    }

    fn styled(&self, now_ms: u64) -> Vec<Vec<WrapPiece>> {
        let fade_ms = self.config.fade.as_millis() as u64;
        self.lines
            .iter()
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| {
                        let styled = match span.word.and_then(|i| self.words.get(i)) {
                            Some(WordVisibility::Hidden) => {
                                Span::styled(" ".repeat(span.text.width()), span.style)
                            }
                            Some(visibility) => Span::styled(
                                span.text.clone(),
                                fade_style(span.style, visibility.progress(now_ms, fade_ms)),
                            ),
                            None => Span::styled(span.text.clone(), span.style),
                        };
                        WrapPiece {
                            span: styled,
                            is_gap: span.word.is_none()
                                && span.text.chars().all(char::is_whitespace),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

fn due_at(now_ms: u64, delay: Duration) -> u64 {
    now_ms.saturating_add(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
}

/// Split text fragments into word spans and number the words in order.
fn layout(markup: &RenderedMarkdown) -> (Vec<Vec<RevealSpan>>, usize) {
    let mut next_word = 0;
    let lines = markup
        .lines
        .iter()
        .map(|line| {
            let mut spans = Vec::new();
            for fragment in &line.fragments {
                match fragment.kind {
                    FragmentKind::Text => {
                        for token in tokenize(&fragment.text) {
                            let word = if token.is_word {
                                next_word += 1;
                                Some(next_word - 1)
                            } else {
                                None
                            };
                            spans.push(RevealSpan {
                                text: token.text,
                                style: fragment.style,
                                word,
                            });
                        }
                    }
                    FragmentKind::Atomic | FragmentKind::Decoration => spans.push(RevealSpan {
                        text: fragment.text.clone(),
                        style: fragment.style,
                        word: None,
                    }),
                }
            }
            spans
        })
        .collect();
    (lines, next_word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::ManualScheduler;
    use crate::markdown::MarkdownError;

    fn line_texts(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_no_animation_shows_everything() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        let outcome = renderer.render("one **two** three", false, 0, &mut scheduler);

        assert_eq!(outcome.revealed_count, 3);
        assert_eq!(outcome.scheduled_words, 0);
        assert!(scheduler.pending().is_empty());
        assert_eq!(line_texts(&renderer.lines(0)), vec!["one two three"]);
        assert!(!renderer.is_animating(0));
    }

    #[test]
    fn test_schedule_is_staggered_from_first_new_word() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("a b c", true, 0, &mut scheduler);

        let gen = renderer.generation();
        assert_eq!(
            scheduler.pending(),
            vec![
                (0, RevealTask::new(gen, RevealStep::ShowWord(0))),
                (100, RevealTask::new(gen, RevealStep::ShowWord(1))),
                (200, RevealTask::new(gen, RevealStep::ShowWord(2))),
                (700, RevealTask::new(gen, RevealStep::Complete)),
            ]
        );
    }

    #[test]
    fn test_hidden_words_keep_width() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("alpha beta", true, 0, &mut scheduler);
        assert_eq!(line_texts(&renderer.lines(0)), vec!["          "]);

        for task in scheduler.advance(0) {
            renderer.apply(task, scheduler.now_ms());
        }
        assert_eq!(line_texts(&renderer.lines(0)), vec!["alpha     "]);
    }

    #[test]
    fn test_full_sequence_completes() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("x y", true, 0, &mut scheduler);

        let mut outcomes = Vec::new();
        for task in scheduler.advance(1_000) {
            outcomes.push(renderer.apply(task, scheduler.now_ms()));
        }
        assert_eq!(
            outcomes,
            vec![
                ApplyOutcome::WordShown(0),
                ApplyOutcome::WordShown(1),
                ApplyOutcome::Completed
            ]
        );
        assert!(!renderer.is_animating(scheduler.now_ms()));
    }

    #[test]
    fn test_rerender_makes_old_tasks_stale() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("first version", true, 0, &mut scheduler);
        let stale = scheduler.advance(0);

        renderer.render("first version extended", true, 2, &mut scheduler);
        for task in stale {
            assert_eq!(renderer.apply(task, 0), ApplyOutcome::Stale);
        }
    }

    #[test]
    fn test_extension_only_animates_new_words() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        let outcome = renderer.render("w0 w1 w2 w3 w4", true, 3, &mut scheduler);

        assert_eq!(outcome.scheduled_words, 2);
        assert_eq!(
            &renderer.visibility()[..3],
            &[WordVisibility::Visible; 3]
        );
        assert!(renderer.visibility()[3..].iter().all(|w| w.is_hidden()));
        let shown: Vec<RevealStep> = scheduler.pending().iter().map(|(_, t)| t.step).collect();
        assert_eq!(
            shown,
            vec![
                RevealStep::ShowWord(3),
                RevealStep::ShowWord(4),
                RevealStep::Complete
            ]
        );
    }

    #[test]
    fn test_huge_stagger_saturates_instead_of_overflowing() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::new(RevealConfig {
            stagger: Duration::MAX,
            fade: Duration::from_millis(DEFAULT_FADE_MS),
        });
        let outcome = renderer.render(&"w ".repeat(1_200), true, 0, &mut scheduler);

        assert_eq!(outcome.scheduled_words, 1_200);
        let pending = scheduler.pending();
        assert_eq!(pending.len(), 1_201);
        assert_eq!(pending[0].0, 0);
        assert_eq!(pending.last().map(|(at, _)| *at), Some(u64::MAX));
    }

    #[test]
    fn test_no_new_words_schedules_nothing() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        let outcome = renderer.render("same two", true, 5, &mut scheduler);
        assert_eq!(outcome.revealed_count, 2);
        assert_eq!(outcome.scheduled_words, 0);
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_update_without_new_words_still_completes() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("Hello wor", true, 0, &mut scheduler);
        for task in scheduler.advance(50) {
            renderer.apply(task, scheduler.now_ms());
        }

        let outcome = renderer.render("Hello world", true, 2, &mut scheduler);
        assert_eq!(outcome.scheduled_words, 0);
        let gen = renderer.generation();
        assert!(scheduler
            .pending()
            .contains(&(600, RevealTask::new(gen, RevealStep::Complete))));

        let outcomes: Vec<ApplyOutcome> = scheduler
            .advance(1_000)
            .into_iter()
            .map(|task| renderer.apply(task, scheduler.now_ms()))
            .collect();
        assert_eq!(
            outcomes.iter().filter(|o| **o == ApplyOutcome::Completed).count(),
            1
        );
    }

    #[test]
    fn test_finished_sequence_is_not_completed_again() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("one two", true, 0, &mut scheduler);
        for task in scheduler.advance(1_000) {
            renderer.apply(task, scheduler.now_ms());
        }

        renderer.render("one two", true, 2, &mut scheduler);
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_code_is_atomic_and_uncounted() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        let outcome = renderer.render("run `cargo test --all` now", true, 0, &mut scheduler);
        assert_eq!(outcome.revealed_count, 2);
        let text = line_texts(&renderer.lines(0)).join("");
        assert!(text.contains("cargo test --all"));
    }

    #[test]
    fn test_fading_word_uses_fade_style() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = IncrementalRenderer::default();
        renderer.render("word", true, 0, &mut scheduler);
        for task in scheduler.advance(0) {
            renderer.apply(task, 0);
        }
        let early = renderer.lines(10);
        assert_eq!(early[0].spans[0].style.fg, Some(ratatui::style::Color::DarkGray));
        let done = renderer.lines(600);
        assert_eq!(done[0].spans[0].style, Style::default());
    }

    struct FailingMarkdown;

    impl MarkdownRenderer for FailingMarkdown {
        fn render(&mut self, _text: &str) -> Result<RenderedMarkdown, MarkdownError> {
            Err(MarkdownError("boom".to_string()))
        }
    }

    #[test]
    fn test_markdown_failure_falls_back_to_raw_text() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer =
            IncrementalRenderer::with_markdown(Box::new(FailingMarkdown), RevealConfig::default());
        let outcome = renderer.render("**raw** text", false, 0, &mut scheduler);
        assert!(outcome.fell_back);
        assert_eq!(line_texts(&renderer.lines(0)), vec!["**raw** text"]);
    }
}
