//! A byte-oriented regular expression engine.
//!
//! A pattern is parsed into an [`ast::Ast`], compiled by Thompson's
//! construction into an NFA, and optionally determinized into a DFA by
//! subset construction. Both engines simulate leftmost-longest matching
//! (the longest match starting at the leftmost position that matches at
//! all), not the leftmost-first ordering of backtracking or Perl-style
//! engines. `compile` never matches bytes itself; it only builds the
//! chosen automaton. `Regex::find`/`Regex::is_match` run the simulation.
//!
//! ```
//! use refa::{compile, CompileOptions};
//!
//! let re = compile(b"a(b|c)*d", CompileOptions::default()).unwrap();
//! assert!(re.is_match(b"abbccd"));
//! assert!(!re.is_match(b"abe"));
//! ```

mod ast;
mod dfa;
mod error;
mod nfa;
mod parser;
mod predicate;

#[cfg(test)]
mod tests;

pub use ast::Ast;
pub use error::{CompileError, ErrorKind};
pub use predicate::{ByteSet, Predicate};

/// Which automaton a compiled [`Regex`] runs its matches against.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Engine {
    /// Simulate the NFA directly. Compiles instantly; each match walks a
    /// frontier of states instead of a single integer.
    Nfa,
    /// Determinize via subset construction before matching. Slower to
    /// compile (and bounded by `dfa_state_ceiling`), but each matched byte
    /// is a single table lookup.
    Dfa,
}

/// Default ceiling on the number of DFA states [`compile`] will build before
/// giving up with [`ErrorKind::InternalLimit`]. Chosen generously: the
/// patterns this crate is meant for (literal-heavy, small classes) stay
/// orders of magnitude under it, and the ceiling exists only to bound
/// pathological alternation/repetition blowups.
pub const DEFAULT_DFA_STATE_CEILING: usize = 10_000;

/// Compile-time configuration for [`compile`].
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct CompileOptions {
    pub engine: Engine,
    /// Only consulted when `engine` is [`Engine::Dfa`].
    pub dfa_state_ceiling: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            engine: Engine::Nfa,
            dfa_state_ceiling: DEFAULT_DFA_STATE_CEILING,
        }
    }
}

/// The outcome of a [`Regex::find`] search.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct MatchResult {
    matched: bool,
    start: usize,
    end: usize,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// The byte offset the match begins at, or `None` if there was no match.
    pub fn start(&self) -> Option<usize> {
        self.matched.then_some(self.start)
    }

    /// The byte offset just past the match, or `None` if there was no match.
    pub fn end(&self) -> Option<usize> {
        self.matched.then_some(self.end)
    }
}

#[derive(Clone, Debug)]
enum Compiled {
    Nfa(nfa::Nfa),
    Dfa(dfa::Dfa),
}

/// A compiled pattern, ready to search input byte slices.
///
/// Immutable once built, and composed entirely of owned, non-reference-
/// counted data, so `Regex` is `Send + Sync`: the same compiled value can be
/// shared across threads and reused for any number of searches without
/// synchronization.
#[derive(Clone, Debug)]
pub struct Regex {
    ast: Ast,
    anchored_start_only: bool,
    compiled: Compiled,
}

impl Regex {
    /// Searches `input` for the leftmost-longest match.
    pub fn find(&self, input: &[u8]) -> MatchResult {
        match &self.compiled {
            Compiled::Nfa(nfa) => nfa::eval::find(nfa, input, self.anchored_start_only),
            Compiled::Dfa(dfa) => dfa::eval::find(dfa, input, self.anchored_start_only),
        }
    }

    /// Whether `input` contains a match anywhere.
    pub fn is_match(&self, input: &[u8]) -> bool {
        self.find(input).is_matched()
    }

    /// The parsed syntax tree this `Regex` was compiled from.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}

/// Parses `pattern` and compiles it per `options`.
///
/// Returns [`CompileError`] if the pattern fails to parse, or, when
/// `options.engine` is [`Engine::Dfa`], if subset construction would exceed
/// `options.dfa_state_ceiling`. A ceiling hit is reported rather than
/// silently falling back to the NFA engine, since the caller explicitly
/// asked for DFA compilation and an unannounced fallback would make the
/// chosen engine's match-time characteristics unpredictable.
pub fn compile(pattern: &[u8], options: CompileOptions) -> Result<Regex, CompileError> {
    let ast = parser::parse(pattern)?;
    let anchored_start_only = ast.is_start_anchored();
    let built = nfa::build(&ast);
    let compiled = match options.engine {
        Engine::Nfa => Compiled::Nfa(built),
        Engine::Dfa => {
            let dfa = dfa::build(&built, options.dfa_state_ceiling, pattern.len())?;
            Compiled::Dfa(dfa)
        }
    };
    Ok(Regex {
        ast,
        anchored_start_only,
        compiled,
    })
}
