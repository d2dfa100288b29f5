//! Whole-frame rendering through the public render entry point.

mod common;

use common::{ready_app, TestAppBuilder};
use cue::app::View;
use cue::models::{ConversationSession, ConversationTurn};

#[tokio::test]
async fn test_saved_response_is_marked_in_title() {
    let mut t = ready_app();
    t.app.start_session();
    t.app.settle().await;
    t.response("Rust has no garbage collector");
    t.run_reveal(10_000);

    let before = t.screen(80, 24);
    assert!(before.contains("1/1"));
    assert!(!before.contains("✓ saved"));

    t.app.save_current_response();
    t.app.save_current_response();
    let after = t.screen(80, 24);
    assert!(after.contains("✓ saved"));
    assert!(after.contains("Response already saved"));
    assert_eq!(t.app.preferences.saved_responses().len(), 1);
}

#[tokio::test]
async fn test_response_links_are_listed_and_openable() {
    let mut t = ready_app();
    t.app.start_session();
    t.app.settle().await;
    t.response("See [the book](https://doc.rust-lang.org/book/) for details");
    t.run_reveal(10_000);

    let screen = t.screen(100, 24);
    assert!(screen.contains("Links: [1] the book"));

    t.bridge.clear_calls();
    t.app.open_response_link(0);
    t.app.open_response_link(5);
    t.app.settle().await;
    assert_eq!(
        t.bridge.calls(),
        vec![cue::bridge::HostRequest::OpenExternal {
            url: "https://doc.rust-lang.org/book/".to_string()
        }]
    );
}

#[tokio::test]
async fn test_compact_layout_renders_differently() {
    let mut normal = ready_app();
    let normal_screen = normal.screen(80, 24);

    let mut compact = TestAppBuilder::new()
        .with_api_key("key-123")
        .with_value("layoutMode", "compact")
        .build();
    let compact_screen = compact.screen(80, 24);

    assert!(normal_screen.contains("Welcome to Cue"));
    assert!(compact_screen.contains("Welcome to Cue"));
    assert_ne!(normal_screen, compact_screen);
}

#[test]
fn test_history_lists_archived_sessions() {
    let mut t = TestAppBuilder::new()
        .with_session(ConversationSession {
            session_id: "s-1".to_string(),
            timestamp: chrono::Utc::now(),
            profile: "meeting".to_string(),
            conversation_history: vec![
                ConversationTurn::user("what is a lifetime"),
                ConversationTurn::model("a region of code where a borrow is valid"),
            ],
        })
        .build();

    t.app.load_history();
    t.app.view = View::History;
    let list = t.screen(100, 30);
    assert!(list.contains("Business Meeting"));

    t.app.history_open_selected();
    let detail = t.screen(100, 30);
    assert!(detail.contains("You:"));
    assert!(detail.contains("a region of code where a borrow is valid"));
}

#[test]
fn test_every_view_draws_on_a_tiny_terminal() {
    for view in [
        View::Onboarding,
        View::Main,
        View::Customize,
        View::Help,
        View::History,
        View::Advanced,
        View::Assistant,
    ] {
        let mut t = ready_app();
        t.app.view = view;
        for (w, h) in [(20, 5), (1, 1)] {
            let _ = t.draw(w, h);
        }
    }
}

#[tokio::test]
async fn test_end_of_long_wrapped_response_is_reachable() {
    let mut t = ready_app();
    t.app.start_session();
    t.app.settle().await;
    let text = format!("{}ZZEND", "abcdefg hijklmn ".repeat(60));
    t.response(&text);
    t.run_reveal(200_000);

    assert!(!t.screen(40, 20).contains("ZZEND"));
    for _ in 0..200 {
        t.app.scroll_response_down();
        let _ = t.draw(40, 20);
    }
    assert!(t.app.scroll.is_at_bottom());
    assert!(t.screen(40, 20).contains("ZZEND"));
}
