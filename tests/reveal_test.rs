//! Incremental reveal behaviour, on its own and inside the app.

mod common;

use common::{ready_app, TestApp};
use cue::adapters::mock::ManualScheduler;
use cue::traits::RevealScheduler;
use cue::markdown::{MarkdownError, MarkdownRenderer, RenderedMarkdown};
use cue::reveal::{
    tokenize, word_count, ApplyOutcome, IncrementalRenderer, RevealConfig, RevealStep,
    WordVisibility,
};
use ratatui::text::Line;

fn texts(lines: &[Line<'static>]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

struct BrokenMarkdown;

impl MarkdownRenderer for BrokenMarkdown {
    fn render(&mut self, _text: &str) -> Result<RenderedMarkdown, MarkdownError> {
        Err(MarkdownError("parser exploded".to_string()))
    }
}

#[test]
fn test_static_render_is_idempotent() {
    let mut scheduler = ManualScheduler::new();
    let mut renderer = IncrementalRenderer::default();
    let text = "# Title\n\nSome **bold** text and `code`.\n\n- one\n- two";

    let first = renderer.render(text, false, 0, &mut scheduler);
    let first_lines = renderer.lines(0);
    let second = renderer.render(text, false, 0, &mut scheduler);
    let second_lines = renderer.lines(0);

    assert_eq!(first, second);
    assert_eq!(first_lines, second_lines);
    assert_eq!(first.scheduled_words, 0);
    assert!(scheduler.pending().is_empty());
    assert!(renderer
        .visibility()
        .iter()
        .all(|w| *w == WordVisibility::Visible));
}

#[test]
fn test_extension_keeps_first_three_words() {
    let mut scheduler = ManualScheduler::new();
    let mut renderer = IncrementalRenderer::default();
    let first = renderer.render("The quick fox", true, 0, &mut scheduler);
    assert_eq!(first.revealed_count, 3);
    for task in scheduler.advance(10_000) {
        renderer.apply(task, scheduler.now_ms());
    }

    let second = renderer.render("The quick fox jumps high", true, 3, &mut scheduler);
    assert_eq!(second.revealed_count, 5);
    assert_eq!(second.scheduled_words, 2);
    assert_eq!(
        &renderer.visibility()[..3],
        &[WordVisibility::Visible; 3]
    );

    let now = scheduler.now_ms();
    let gen = renderer.generation();
    let pending: Vec<(u64, RevealStep)> = scheduler
        .pending()
        .into_iter()
        .map(|(at, task)| {
            assert_eq!(task.generation, gen);
            (at - now, task.step)
        })
        .collect();
    assert_eq!(
        pending,
        vec![
            (0, RevealStep::ShowWord(3)),
            (100, RevealStep::ShowWord(4)),
            (600, RevealStep::Complete),
        ]
    );
    assert_eq!(texts(&renderer.lines(now)), vec!["The quick fox           "]);
}

#[test]
fn test_stale_tasks_are_ignored_after_rerender() {
    let mut scheduler = ManualScheduler::new();
    let mut renderer = IncrementalRenderer::default();
    renderer.render("one two three four", true, 0, &mut scheduler);
    let first_batch = scheduler.advance(100);
    assert_eq!(first_batch.len(), 2);

    renderer.render("something else entirely", false, 0, &mut scheduler);
    for task in first_batch {
        assert_eq!(renderer.apply(task, 100), ApplyOutcome::Stale);
    }
    for task in scheduler.advance(10_000) {
        assert_eq!(renderer.apply(task, 10_100), ApplyOutcome::Stale);
    }
    assert_eq!(texts(&renderer.lines(10_100)), vec!["something else entirely"]);
}

#[test]
fn test_code_is_not_split_into_words() {
    let mut scheduler = ManualScheduler::new();
    let mut renderer = IncrementalRenderer::default();
    let outcome = renderer.render("Run `cargo fmt --all` now", true, 0, &mut scheduler);
    assert_eq!(outcome.revealed_count, 2);

    let line = texts(&renderer.lines(0)).join("");
    assert!(line.contains("cargo fmt --all"));
}

#[test]
fn test_markdown_failure_falls_back_to_raw_text() {
    let mut scheduler = ManualScheduler::new();
    let mut renderer =
        IncrementalRenderer::with_markdown(Box::new(BrokenMarkdown), RevealConfig::default());
    let outcome = renderer.render("**not bold**\nsecond", false, 0, &mut scheduler);

    assert!(outcome.fell_back);
    assert_eq!(outcome.revealed_count, 3);
    assert_eq!(texts(&renderer.lines(0)), vec!["**not bold**", "second"]);
}

#[test]
fn test_tokenize_round_trips_text() {
    let text = "  Hello,\tworld!  \n next ";
    let joined: String = tokenize(text).into_iter().map(|t| t.text).collect();
    assert_eq!(joined, text);
    assert_eq!(word_count(text), 3);
}

fn displayed(t: &mut TestApp) -> String {
    let now = t.app.now_ms();
    texts(&t.app.renderer.lines(now)).join("\n")
}

#[tokio::test]
async fn test_streamed_response_reveals_only_new_words() {
    let mut t = ready_app();
    assert!(t.app.start_session());
    t.app.settle().await;

    t.response("Paris is");
    t.run_reveal(100);
    assert_eq!(displayed(&mut t), "Paris is");
    assert_eq!(t.app.reconciler.animation().revealed_word_count, 2);

    t.response("Paris is the capital");
    assert_eq!(t.app.reconciler.log().len(), 1);
    assert_eq!(displayed(&mut t).trim_end(), "Paris is");
    assert!(t.app.is_animating());

    t.run_reveal(10_000);
    assert_eq!(displayed(&mut t), "Paris is the capital");
    assert!(!t.app.is_animating());
}

#[tokio::test]
async fn test_fragment_after_finished_reveal_starts_new_entry() {
    let mut t = ready_app();
    t.app.start_session();
    t.app.settle().await;

    t.response("Paris is");
    t.run_reveal(10_000);
    assert!(t.app.reconciler.state().current_entry_complete);

    t.response("Paris is the capital");
    assert_eq!(t.app.reconciler.log().len(), 2);
    assert_eq!(t.app.response_counter().as_deref(), Some("2/2"));
    t.app.settle().await;
}

#[tokio::test]
async fn test_browsing_shows_old_entries_without_animation() {
    let mut t = ready_app();
    t.app.start_session();
    t.app.settle().await;

    t.response("First answer");
    t.status("Ready");
    t.response("Second answer");
    t.app.previous_response();

    assert_eq!(displayed(&mut t), "First answer");
    assert!(!t.app.is_animating());
    assert_eq!(t.app.response_counter().as_deref(), Some("1/2"));
}
