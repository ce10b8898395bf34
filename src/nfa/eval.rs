//! Leftmost-longest simulation directly over the NFA, walking the frontier
//! set forward one byte at a time rather than constructing a DFA first.
//! This mirrors the ancestor's `NfaEvaluator`, generalized from a single
//! accept/reject verdict over a whole string to a search returning the
//! leftmost-longest match starting anywhere in the input (§4.5).

use super::Nfa;
use crate::MatchResult;
use std::collections::HashSet;

/// Searches `input` for the leftmost-longest match of `nfa`.
///
/// If `anchored_start_only` is set (the pattern's every alternative begins
/// with `^`), only start position 0 is tried; this is purely an optimization
/// — `^` is enforced structurally by the automaton regardless, so trying
/// further start positions on an anchored pattern would just waste time
/// finding the same "no match" result anchor-gating already guarantees.
pub(crate) fn find(nfa: &Nfa, input: &[u8], anchored_start_only: bool) -> MatchResult {
    let len = input.len();
    let max_start = if anchored_start_only { 0 } else { len };
    for start in 0..=max_start {
        if let Some(end) = try_match_at(nfa, input, start) {
            return MatchResult {
                matched: true,
                start,
                end,
            };
        }
    }
    MatchResult {
        matched: false,
        start: 0,
        end: 0,
    }
}

/// Attempts a match beginning exactly at `start`; returns the end offset of
/// the longest accepting prefix, if any.
fn try_match_at(nfa: &Nfa, input: &[u8], start: usize) -> Option<usize> {
    let len = input.len();
    let mut frontier = nfa.closure(&HashSet::from([nfa.start]), start == 0, start == len);
    let mut last_accept = if frontier.contains(&nfa.accept) {
        Some(start)
    } else {
        None
    };

    let mut pos = start;
    while pos < len && !frontier.is_empty() {
        let byte = input[pos];
        let stepped = nfa.step(&frontier, byte);
        pos += 1;
        if stepped.is_empty() {
            frontier = stepped;
            break;
        }
        frontier = nfa.closure(&stepped, false, pos == len);
        if frontier.contains(&nfa.accept) {
            last_accept = Some(pos);
        }
    }

    last_accept
}
