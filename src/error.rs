//! Compilation errors. Matching never fails: "no match" is a [`crate::MatchResult`]
//! value, not an `Err`. Only `compile` can fail, and it fails with exactly one
//! [`CompileError`], carrying the zero-based byte position in the pattern at
//! which the parser (or the DFA builder) gave up.

use thiserror::Error;

/// The taxonomy of ways compilation can fail.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Error)]
pub enum ErrorKind {
    /// The pattern ends mid-construct: an open `(`, an open `[`, or a
    /// trailing `\`.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    /// A metacharacter appears in a context that forbids it, such as a
    /// stray `)`.
    #[error("unexpected character 0x{0:02x}")]
    UnexpectedChar(u8),
    /// A quantifier (`*`, `+`, `?`) with no preceding atom to repeat.
    #[error("nothing to repeat")]
    NothingToRepeat,
    /// A character-class range whose start is greater than its end.
    #[error("invalid range: start > end")]
    InvalidRange,
    /// `(` without a matching `)`.
    #[error("unclosed group")]
    UnclosedGroup,
    /// `[` without a matching `]`.
    #[error("unclosed character class")]
    UnclosedClass,
    /// Subset construction would produce more DFA states than the
    /// configured ceiling. Callers that hit this should fall back to the
    /// NFA engine.
    #[error("DFA construction exceeded the state ceiling of {0}")]
    InternalLimit(usize),
}

/// A single compilation failure: what went wrong, and where in the pattern.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Error)]
#[error("{kind} (at byte offset {position})")]
pub struct CompileError {
    kind: ErrorKind,
    position: usize,
}

impl CompileError {
    pub(crate) fn new(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// A human-readable description of the failure.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Zero-based byte offset into the pattern at which compilation gave up.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}
