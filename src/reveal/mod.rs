//! Word-by-word reveal of the displayed response.
//!
//! [`tokenize`] is the pure text-to-words split. [`IncrementalRenderer`]
//! lays rendered markdown out as word spans, decides which words are
//! already shown and schedules the rest through a
//! [`RevealScheduler`](crate::traits::RevealScheduler).

mod animation;
mod renderer;
mod task;
mod tokenizer;
mod wrapping;

pub use animation::{fade_style, AnimationState, WordVisibility};
pub use renderer::{
    ApplyOutcome, IncrementalRenderer, RenderOutcome, RevealConfig, DEFAULT_FADE_MS,
    DEFAULT_STAGGER_MS, MAX_STAGGER_MS,
};
pub use task::{RevealStep, RevealTask};
pub use tokenizer::{tokenize, word_count, Token};
