//! Typed input errors surfaced to API and CLI callers.

use thiserror::Error;

/// Errors returned by [`crate::matching::MatchEngine::run`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The input text contained no parseable hex colors.
    #[error("no valid colors found in input")]
    NoValidColors,
}

impl MatchError {
    /// Hint shown alongside the error message.
    #[must_use]
    pub const fn details(&self) -> &'static str {
        match self {
            Self::NoValidColors => "expected hex colors such as #ff0000, ff0000 or #f00",
        }
    }
}
