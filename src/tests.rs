//! Crate-level property and scenario tests, mirroring the ancestor's
//! `proptest`/`rand`-driven `tests.rs`: small generators, properties checked
//! across many random patterns, plus a handful of fixed concrete cases.

use crate::{compile, CompileOptions, Engine, ErrorKind};
use proptest::prelude::*;
use rand::prelude::*;

fn nfa_regex(pattern: &[u8]) -> crate::Regex {
    compile(pattern, CompileOptions::default()).unwrap()
}

fn dfa_regex(pattern: &[u8]) -> crate::Regex {
    compile(
        pattern,
        CompileOptions {
            engine: Engine::Dfa,
            ..CompileOptions::default()
        },
    )
    .unwrap()
}

mod concrete_scenarios {
    use super::*;

    #[test]
    fn scenario_1_alternation_under_star() {
        let re = nfa_regex(b"a(b|c)*d");
        let m = re.find(b"abbcd");
        assert!(m.is_matched());
        assert_eq!((m.start(), m.end()), (Some(0), Some(5)));
    }

    #[test]
    fn scenario_2_anchored_digits_match() {
        let re = nfa_regex(b"^[0-9]+$");
        let m = re.find(b"12345");
        assert_eq!((m.start(), m.end()), (Some(0), Some(5)));
    }

    #[test]
    fn scenario_3_anchored_digits_reject_interior_garbage() {
        let re = nfa_regex(b"^[0-9]+$");
        assert!(!re.is_match(b"12a45"));
    }

    #[test]
    fn scenario_4_negated_class() {
        let re = nfa_regex(b"[^abc]+");
        let m = re.find(b"xxabc");
        assert_eq!((m.start(), m.end()), (Some(0), Some(2)));
    }

    #[test]
    fn scenario_5_dot_star() {
        let re = nfa_regex(b"a.*b");
        let m = re.find(b"aXYZb");
        assert_eq!((m.start(), m.end()), (Some(0), Some(5)));
    }

    #[test]
    fn scenario_6_leftmost_alternative() {
        let re = nfa_regex(b"a|b|c");
        let m = re.find(b"zzzb");
        assert_eq!((m.start(), m.end()), (Some(3), Some(4)));
    }

    #[test]
    fn every_concrete_scenario_agrees_between_engines() {
        let cases: &[(&[u8], &[u8])] = &[
            (b"a(b|c)*d", b"abbcd"),
            (b"^[0-9]+$", b"12345"),
            (b"^[0-9]+$", b"12a45"),
            (b"[^abc]+", b"xxabc"),
            (b"a.*b", b"aXYZb"),
            (b"a|b|c", b"zzzb"),
        ];
        for &(pattern, input) in cases {
            assert_eq!(nfa_regex(pattern).find(input), dfa_regex(pattern).find(input));
        }
    }
}

mod negative_compilation_scenarios {
    use super::*;

    #[test]
    fn unclosed_class_at_opening_bracket() {
        let err = compile(b"[a-z", CompileOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclosedClass);
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn unclosed_group_at_opening_paren() {
        let err = compile(b"(ab", CompileOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclosedGroup);
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn nothing_to_repeat_at_start() {
        let err = compile(b"*abc", CompileOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NothingToRepeat);
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn invalid_range_within_class() {
        let err = compile(b"[z-a]", CompileOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }
}

#[test]
fn empty_pattern_matches_every_input_at_zero_zero() {
    let re = nfa_regex(b"");
    for input in [&b""[..], b"x", b"hello"] {
        let m = re.find(input);
        assert_eq!((m.start(), m.end()), (Some(0), Some(0)));
    }
}

#[test]
fn round_trip_escapes_match_the_literal_metacharacter() {
    for &m in b".*+?()[]^$|\\".iter() {
        let pattern = [b'\\', m];
        let re = nfa_regex(&pattern);
        let input = [b'x', m, b'y'];
        let found = re.find(&input);
        assert!(found.is_matched(), "escape of {:?} failed to match", m as char);
        assert_eq!(found.start(), Some(1));
        assert_eq!(found.end(), Some(2));
    }
}

#[test]
fn anchor_soundness_start_and_end() {
    let start_anchored = nfa_regex(b"^a");
    assert!(start_anchored.is_match(b"ab"));
    // "^" binds to position 0 of the slice passed to find, not to a
    // notion of line start, so searching mid-string never finds it.
    assert!(!start_anchored.is_match(b"ba"));

    let end_anchored = nfa_regex(b"a$");
    assert!(end_anchored.is_match(b"ba"));
    assert!(!end_anchored.is_match(b"ab"));
}

#[test]
fn regex_send_sync_reuse_across_threads() {
    let re = nfa_regex(b"(foo|bar)+baz");
    std::thread::scope(|scope| {
        for _ in 0..8 {
            let re = &re;
            scope.spawn(move || {
                assert!(re.is_match(b"foobarfoobaz"));
                assert!(!re.is_match(b"quux"));
            });
        }
    });
}

/// A conservative "safe" subset of patterns this crate's leftmost-longest
/// semantics agree on with the external `regex` crate's leftmost-first
/// semantics: alternation branches of equal fixed width, no nested
/// repetition of an alternation. Outside this subset the two engines can
/// legitimately disagree (§1), so the oracle is only trustworthy here.
fn arb_safe_pattern() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|s| (s.clone(), s)),
        ("[a-z]{2}", "[a-z]{2}").prop_map(|(a, b)| (format!("{a}|{b}"), a)),
    ]
}

proptest! {
    #[test]
    fn engines_agree_on_random_literal_and_class_patterns(
        pattern in "[a-z]{1,4}(\\*|\\+|\\?)?",
        input in "[a-z]{0,8}",
    ) {
        let nfa_re = nfa_regex(pattern.as_bytes());
        let dfa_re = dfa_regex(pattern.as_bytes());
        prop_assert_eq!(nfa_re.find(input.as_bytes()), dfa_re.find(input.as_bytes()));
    }

    #[test]
    fn leftmost_longest_start_is_minimal_among_matches(
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let alphabet = [b'a', b'b', b'c'];
        let input: Vec<u8> = (0..10).map(|_| *alphabet.choose(&mut rng).unwrap()).collect();
        let re = nfa_regex(b"a+");
        let m = re.find(&input);
        if let Some(start) = m.start() {
            let earliest = input.iter().position(|&b| b == b'a');
            prop_assert_eq!(Some(start), earliest);
        } else {
            prop_assert!(!input.contains(&b'a'));
        }
    }

    #[test]
    fn oracle_agrees_on_safe_patterns((pattern, input) in arb_safe_pattern()) {
        let external = ::regex::Regex::new(&format!("^(?:{pattern})")).unwrap();
        let ours = nfa_regex(pattern.as_bytes());
        let ours_match = ours.find(input.as_bytes());
        let external_match = external.find(&input);
        prop_assert_eq!(ours_match.is_matched(), external_match.is_some());
        if let (true, Some(m)) = (ours_match.is_matched(), external_match) {
            prop_assert_eq!(ours_match.end(), Some(m.end()));
        }
    }
}

#[test]
fn engines_agree_on_mixed_anchor_alternation() {
    // A regression for a DFA-only bug: the DFA's start-of-input entry point
    // admits `^`, but reusing it for every search offset would let the
    // anchored "^ab" branch fire at positions other than 0. "c" is the only
    // branch that may legitimately match away from the start.
    let cases: &[&[u8]] = &[b"xab", b"ab", b"xc", b"c", b"xabc", b""];
    for &input in cases {
        assert_eq!(
            nfa_regex(b"^ab|c").find(input),
            dfa_regex(b"^ab|c").find(input),
            "mismatch on input {:?}",
            input
        );
    }
}

#[test]
fn parser_position_is_within_pattern_bounds() {
    let patterns: &[&[u8]] = &[b"[a-z", b"(ab", b"*abc", b"[z-a]", b"a\\"];
    for &pattern in patterns {
        let err = compile(pattern, CompileOptions::default()).unwrap_err();
        assert!(err.position() <= pattern.len());
    }
}
