//! The Abstract Syntax Tree produced by the parser.
//!
//! Rather than a small hierarchy of node types dispatched through a common
//! base (the usual shape in languages without sum types), the grammar is
//! expressed as a single tagged `enum`. The NFA builder becomes a pattern
//! match over that enum instead of a visitor method spread across node
//! classes, which gives it one site to extend and removes a heap header per
//! node that a virtual-dispatch tree would otherwise pay for.

use crate::predicate::Predicate;
use std::fmt;

/// A node in the parsed pattern tree. Immutable once built; ownership is a
/// strict tree (no sharing, no cycles) and the whole tree is owned by the
/// compiled [`crate::Regex`] that parsed it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Ast {
    /// A single matcher predicate (literal byte, `.`, or a character class).
    Char(Predicate),
    /// Ordered sequencing: `left` followed by `right`.
    Concat(Box<Ast>, Box<Ast>),
    /// Alternation: `left` or `right`.
    Alt(Box<Ast>, Box<Ast>),
    /// Greedy, unbounded zero-or-more.
    Star(Box<Ast>),
    /// Greedy, unbounded one-or-more.
    Plus(Box<Ast>),
    /// Zero-or-one.
    Question(Box<Ast>),
    /// Non-capturing grouping; semantically transparent, kept only so the
    /// tree can be printed/debugged faithfully.
    Group(Box<Ast>),
    /// `^`: zero-width, matches only at the start of the input passed to
    /// `match`.
    AnchorStart,
    /// `$`: zero-width, matches only at the end of the input.
    AnchorEnd,
    /// The empty pattern; matches the empty string exactly.
    Empty,
}

impl Ast {
    /// True if every path through this tree begins with `^`, meaning a
    /// leftmost search only ever needs to try start position 0. This is
    /// purely a simulator optimization (§4.5): the anchor is still honored
    /// structurally by the NFA/DFA regardless of this check, so an
    /// incorrect `false` here would only cost performance, never
    /// correctness.
    pub(crate) fn is_start_anchored(&self) -> bool {
        match self {
            Ast::AnchorStart => true,
            Ast::Group(inner) => inner.is_start_anchored(),
            Ast::Concat(left, _) => left.is_start_anchored(),
            Ast::Alt(left, right) => left.is_start_anchored() && right.is_start_anchored(),
            _ => false,
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Char(p) => write!(f, "{p:?}"),
            Ast::Concat(l, r) => write!(f, "{l}{r}"),
            Ast::Alt(l, r) => write!(f, "({l}|{r})"),
            Ast::Star(a) => write!(f, "({a})*"),
            Ast::Plus(a) => write!(f, "({a})+"),
            Ast::Question(a) => write!(f, "({a})?"),
            Ast::Group(a) => write!(f, "({a})"),
            Ast::AnchorStart => write!(f, "^"),
            Ast::AnchorEnd => write!(f, "$"),
            Ast::Empty => Ok(()),
        }
    }
}
