//! # Nondeterministic Finite Automaton
//!
//! Thompson's construction turns an [`Ast`] into an [`Nfa`]: states are dense
//! integer IDs indexing into a flat table owned by the automaton, and
//! transitions are `(ε | symbol | anchor, target)` triples. This replaces
//! the reference-counted, name-carrying state graph the ancestor project
//! uses for its own (human-readable, file-format-parsed) NFAs — a
//! representation whose `Rc<str>` names and potential reference cycles
//! (Kleene star closes a loop back onto itself) exist to support printing
//! and re-parsing a transition table, a feature this crate has no use for.
//! Dense IDs sidestep the cycle entirely: the "back-edge" of a `Star` is
//! just an `Epsilon` transition whose target is a smaller or equal index.

use crate::ast::Ast;
use crate::predicate::Predicate;
use std::collections::HashSet;

pub mod eval;

pub(crate) type StateId = usize;

#[derive(Clone, Debug)]
pub(crate) enum Transition {
    Epsilon(StateId),
    Symbol(Predicate, StateId),
    AnchorStart(StateId),
    AnchorEnd(StateId),
}

/// A state in the automaton: Thompson fragments produce at most two
/// outgoing transitions per state.
#[derive(Clone, Debug, Default)]
pub(crate) struct NfaState {
    pub(crate) transitions: Vec<Transition>,
}

/// A Thompson-construction NFA: dense states, one start, one accept.
#[derive(Clone, Debug)]
pub(crate) struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
}

impl Nfa {
    /// The ε-closure of `states`, admitting `AnchorStart` transitions iff
    /// `admit_start` and `AnchorEnd` transitions iff `admit_end`. Simulators
    /// pass `admit_start = pos == 0` and `admit_end = pos == len(input)`; the
    /// DFA builder passes fixed flags appropriate to the step being taken
    /// (see `dfa::build`).
    pub(crate) fn closure(
        &self,
        states: &HashSet<StateId>,
        admit_start: bool,
        admit_end: bool,
    ) -> HashSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();
        while let Some(s) = stack.pop() {
            for t in &self.states[s].transitions {
                let target = match t {
                    Transition::Epsilon(to) => Some(*to),
                    Transition::AnchorStart(to) if admit_start => Some(*to),
                    Transition::AnchorEnd(to) if admit_end => Some(*to),
                    _ => None,
                };
                if let Some(to) = target {
                    if closure.insert(to) {
                        stack.push(to);
                    }
                }
            }
        }
        closure
    }

    /// The set of states reachable from `states` by consuming `byte` on a
    /// symbol transition. Does not close over ε/anchor transitions; callers
    /// follow up with [`Nfa::closure`].
    pub(crate) fn step(&self, states: &HashSet<StateId>, byte: u8) -> HashSet<StateId> {
        let mut next = HashSet::new();
        for &s in states {
            for t in &self.states[s].transitions {
                if let Transition::Symbol(p, to) = t {
                    if p.matches(byte) {
                        next.insert(*to);
                    }
                }
            }
        }
        next
    }

    /// For every state, whether `accept` is reachable from it through only
    /// ε and `AnchorEnd` transitions, independent of input position. The DFA
    /// builder uses this to decide whether a subset that never directly
    /// contains `accept` should still be accepting "at end of input only"
    /// (§4.6).
    pub(crate) fn anchor_end_reachability(&self) -> Vec<bool> {
        let n = self.states.len();
        let mut rev: Vec<Vec<StateId>> = vec![Vec::new(); n];
        for (s, state) in self.states.iter().enumerate() {
            for t in &state.transitions {
                match t {
                    Transition::Epsilon(to) | Transition::AnchorEnd(to) => rev[*to].push(s),
                    _ => {}
                }
            }
        }
        let mut reach = vec![false; n];
        reach[self.accept] = true;
        let mut stack = vec![self.accept];
        while let Some(s) = stack.pop() {
            for &pred in &rev[s] {
                if !reach[pred] {
                    reach[pred] = true;
                    stack.push(pred);
                }
            }
        }
        reach
    }
}

struct Fragment {
    entry: StateId,
    exit: StateId,
}

struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn new_state(&mut self) -> StateId {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn add(&mut self, from: StateId, transition: Transition) {
        self.states[from].transitions.push(transition);
    }

    fn build(&mut self, ast: &Ast) -> Fragment {
        match ast {
            Ast::Char(p) => {
                let entry = self.new_state();
                let exit = self.new_state();
                self.add(entry, Transition::Symbol(p.clone(), exit));
                Fragment { entry, exit }
            }
            Ast::Empty => {
                let entry = self.new_state();
                let exit = self.new_state();
                self.add(entry, Transition::Epsilon(exit));
                Fragment { entry, exit }
            }
            Ast::Concat(a, b) => {
                let fa = self.build(a);
                let fb = self.build(b);
                self.add(fa.exit, Transition::Epsilon(fb.entry));
                Fragment {
                    entry: fa.entry,
                    exit: fb.exit,
                }
            }
            Ast::Alt(a, b) => {
                let entry = self.new_state();
                let exit = self.new_state();
                let fa = self.build(a);
                let fb = self.build(b);
                self.add(entry, Transition::Epsilon(fa.entry));
                self.add(entry, Transition::Epsilon(fb.entry));
                self.add(fa.exit, Transition::Epsilon(exit));
                self.add(fb.exit, Transition::Epsilon(exit));
                Fragment { entry, exit }
            }
            Ast::Star(a) => {
                let entry = self.new_state();
                let exit = self.new_state();
                let fa = self.build(a);
                self.add(entry, Transition::Epsilon(fa.entry));
                self.add(entry, Transition::Epsilon(exit));
                self.add(fa.exit, Transition::Epsilon(fa.entry));
                self.add(fa.exit, Transition::Epsilon(exit));
                Fragment { entry, exit }
            }
            Ast::Plus(a) => {
                // Concat(A, Star(A')) would need to clone the subtree; a
                // back-edge from A's exit to its own entry gives the same
                // language without duplicating any states.
                let fa = self.build(a);
                let exit = self.new_state();
                self.add(fa.exit, Transition::Epsilon(fa.entry));
                self.add(fa.exit, Transition::Epsilon(exit));
                Fragment {
                    entry: fa.entry,
                    exit,
                }
            }
            Ast::Question(a) => {
                let entry = self.new_state();
                let exit = self.new_state();
                let fa = self.build(a);
                self.add(entry, Transition::Epsilon(fa.entry));
                self.add(entry, Transition::Epsilon(exit));
                self.add(fa.exit, Transition::Epsilon(exit));
                Fragment { entry, exit }
            }
            Ast::Group(a) => self.build(a),
            Ast::AnchorStart => {
                let entry = self.new_state();
                let exit = self.new_state();
                self.add(entry, Transition::AnchorStart(exit));
                Fragment { entry, exit }
            }
            Ast::AnchorEnd => {
                let entry = self.new_state();
                let exit = self.new_state();
                self.add(entry, Transition::AnchorEnd(exit));
                Fragment { entry, exit }
            }
        }
    }
}

/// Builds the Thompson-construction NFA for `ast`.
pub(crate) fn build(ast: &Ast) -> Nfa {
    let mut builder = Builder { states: Vec::new() };
    let fragment = builder.build(ast);
    Nfa {
        states: builder.states,
        start: fragment.entry,
        accept: fragment.exit,
    }
}
