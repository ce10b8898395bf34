//! # Deterministic Finite Automaton
//!
//! Subset construction over an [`crate::nfa::Nfa`], generalizing the
//! ancestor's `Nfa::to_dfa` worklist-over-`NfaEvaluator` approach to dense
//! state IDs and to anchor-gated transitions. A canonicalized, sorted
//! `Vec<StateId>` is still the de-duplication key (as in the ancestor), but
//! the per-state acceptance rule is no longer a single boolean: a DFA state
//! may accept unconditionally, accept only when the simulator has reached
//! the end of input, or not accept at all (§4.6). That third possibility
//! does not exist in the ancestor's DFA, whose source patterns have no
//! anchors.

use crate::error::{CompileError, ErrorKind};
use crate::nfa::{Nfa, StateId};
use std::collections::HashMap;
use std::collections::HashSet;

pub mod eval;

#[derive(Clone, Debug)]
pub(crate) struct DfaState {
    /// `transitions[b]` is the next state for input byte `b`, if any.
    pub(crate) transitions: [Option<usize>; 256],
    pub(crate) direct_accept: bool,
    pub(crate) accepts_only_at_end: bool,
}

impl DfaState {
    fn accepting_unconditionally(&self) -> bool {
        self.direct_accept
    }
}

/// A table-driven DFA: dense states, transitions indexed by byte value.
///
/// Two entry points, not one, because `AnchorStart` is positional but a DFA
/// state is purely structural: a subset reached by admitting `^` looks
/// identical whether the simulator got there by *starting* at position 0 or
/// by stepping there from elsewhere. For a pattern where every alternative is
/// anchored this distinction is moot (the facade already restricts the
/// search to position 0 in that case), but for a mixed pattern like `^ab|c`
/// the unanchored `c` branch must remain triable starting from any position
/// while `^ab` must not — which requires the two entry closures to differ.
#[derive(Clone, Debug)]
pub(crate) struct Dfa {
    pub(crate) states: Vec<DfaState>,
    /// Entry state for a match attempt beginning at input position 0:
    /// admits `AnchorStart` transitions.
    pub(crate) start: usize,
    /// Entry state for a match attempt beginning at any other position:
    /// does not admit `AnchorStart` transitions. Equal to `start` whenever
    /// the pattern contains no reachable `^`.
    pub(crate) start_mid: usize,
}

/// Builds the DFA for `nfa` by subset construction, failing with
/// [`ErrorKind::InternalLimit`] if the number of constructed states would
/// exceed `state_ceiling`. `pattern_len` is used only to report the error at
/// the end of the pattern, matching how other compile-time errors are
/// positioned.
pub(crate) fn build(nfa: &Nfa, state_ceiling: usize, pattern_len: usize) -> Result<Dfa, CompileError> {
    let end_reachable = nfa.anchor_end_reachability();

    let mut states: Vec<DfaState> = Vec::new();
    let mut index_of: HashMap<Vec<StateId>, usize> = HashMap::new();
    let mut worklist: Vec<(usize, HashSet<StateId>)> = Vec::new();

    let enqueue = |states: &mut Vec<DfaState>,
                       index_of: &mut HashMap<Vec<StateId>, usize>,
                       worklist: &mut Vec<(usize, HashSet<StateId>)>,
                       set: HashSet<StateId>|
     -> Result<usize, CompileError> {
        let key = canonical_key(&set);
        if let Some(&idx) = index_of.get(&key) {
            return Ok(idx);
        }
        let idx = push_state(states, &set, &end_reachable, nfa);
        if states.len() > state_ceiling {
            return Err(CompileError::new(ErrorKind::InternalLimit(state_ceiling), pattern_len));
        }
        index_of.insert(key, idx);
        worklist.push((idx, set));
        Ok(idx)
    };

    let start_set = nfa.closure(&HashSet::from([nfa.start]), true, false);
    let start_index = enqueue(&mut states, &mut index_of, &mut worklist, start_set)?;

    let start_mid_set = nfa.closure(&HashSet::from([nfa.start]), false, false);
    let start_mid_index = enqueue(&mut states, &mut index_of, &mut worklist, start_mid_set)?;

    while let Some((from_index, from_set)) = worklist.pop() {
        for byte in 0u8..=255 {
            let stepped = nfa.step(&from_set, byte);
            if stepped.is_empty() {
                continue;
            }
            let closed = nfa.closure(&stepped, false, false);
            let key = canonical_key(&closed);
            let to_index = match index_of.get(&key) {
                Some(&idx) => idx,
                None => {
                    let idx = push_state(&mut states, &closed, &end_reachable, nfa);
                    if states.len() > state_ceiling {
                        return Err(CompileError::new(
                            ErrorKind::InternalLimit(state_ceiling),
                            pattern_len,
                        ));
                    }
                    index_of.insert(key, idx);
                    worklist.push((idx, closed));
                    idx
                }
            };
            states[from_index].transitions[byte as usize] = Some(to_index);
        }
    }

    Ok(Dfa {
        states,
        start: start_index,
        start_mid: start_mid_index,
    })
}

fn canonical_key(states: &HashSet<StateId>) -> Vec<StateId> {
    let mut key: Vec<StateId> = states.iter().copied().collect();
    key.sort_unstable();
    key
}

fn push_state(
    states: &mut Vec<DfaState>,
    set: &HashSet<StateId>,
    end_reachable: &[bool],
    nfa: &Nfa,
) -> usize {
    let direct_accept = set.contains(&nfa.accept);
    let end_only = !direct_accept && set.iter().any(|&s| end_reachable[s]);
    states.push(DfaState {
        transitions: [None; 256],
        direct_accept,
        accepts_only_at_end: end_only,
    });
    states.len() - 1
}
