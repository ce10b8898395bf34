//! Leftmost-longest simulation over a precomputed [`super::Dfa`]: one table
//! lookup per byte, no closure computation at match time. Generalizes the
//! ancestor's `DfaEvaluator::step`/`step_all` from a single whole-string
//! accept/reject verdict to a leftmost-longest search over every start
//! position.

use super::Dfa;
use crate::MatchResult;

/// Searches `input` for the leftmost-longest match of `dfa`. See
/// [`super::super::nfa::eval::find`] for the meaning of `anchored_start_only`.
pub(crate) fn find(dfa: &Dfa, input: &[u8], anchored_start_only: bool) -> MatchResult {
    let len = input.len();
    let max_start = if anchored_start_only { 0 } else { len };
    for start in 0..=max_start {
        if let Some(end) = try_match_at(dfa, input, start) {
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

/// `dfa.start` admits `AnchorStart` transitions and is only correct for a
/// match attempt that begins at input position 0; every other attempt must
/// enter through `dfa.start_mid`, which does not, or a `^`-gated branch that
/// structurally cannot fire away from position 0 would incorrectly appear
/// live (see the `mixed_anchor_alternation_has_distinct_entry_points` test
/// in `dfa::mod`).
fn try_match_at(dfa: &Dfa, input: &[u8], start: usize) -> Option<usize> {
    let len = input.len();
    let mut state = if start == 0 { dfa.start } else { dfa.start_mid };
    let mut last_accept = accept_at(dfa, state, start, len).then_some(start);

    let mut pos = start;
    while pos < len {
        let byte = input[pos];
        match dfa.states[state].transitions[byte as usize] {
            Some(next) => {
                state = next;
                pos += 1;
                if accept_at(dfa, state, pos, len) {
                    last_accept = Some(pos);
                }
            }
            None => break,
        }
    }

    last_accept
}

/// Whether `state` is an accepting state of the simulation once `pos` bytes
/// of a `len`-byte input have been consumed. A state built from an NFA
/// subset that can only reach `accept` through an `AnchorEnd` transition is
/// accepting exactly when the simulator is actually at the end of input.
fn accept_at(dfa: &Dfa, state: usize, pos: usize, len: usize) -> bool {
    let s = &dfa.states[state];
    s.direct_accept || (s.accepts_only_at_end && pos == len)
}
