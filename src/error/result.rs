//! Result type alias for cue operations.

use super::cue_error::CueError;

/// Type alias for Results using CueError.
pub type CueResult<T> = Result<T, CueError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: super::context::ErrorContext) -> CueResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> CueResult<T>
    where
        F: FnOnce() -> super::context::ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<CueError>,
{
    fn context(self, ctx: super::context::ErrorContext) -> CueResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> CueResult<T>
    where
        F: FnOnce() -> super::context::ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
