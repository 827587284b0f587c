//! Disappeared-numbers and word-pattern utilities.

use confluent::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[test]
fn test_disappeared_examples() {
    assert_eq!(find_disappeared_numbers(&[4, 3, 2, 7, 8, 2, 3, 1]), Ok(vec![5, 6]));
    assert_eq!(find_disappeared_numbers(&[1, 1]), Ok(vec![2]));
}

#[test]
fn test_disappeared_error_is_a_std_error() {
    let err: Box<dyn std::error::Error> = find_disappeared_numbers(&[9u64]).unwrap_err().into();
    assert_eq!(err.to_string(), "value at index 0 is outside the range 1..=1");
}

#[test]
fn test_word_pattern_examples() {
    assert!(word_pattern("abba", "dog cat cat dog"));
    assert!(!word_pattern("abba", "dog cat cat fish"));
    assert!(!word_pattern("aaaa", "dog cat cat dog"));
    assert!(!word_pattern("abba", "dog dog dog dog"));
    assert!(!word_pattern("abc", "dog cat"));
}

proptest! {
    #[test]
    fn test_disappeared_matches_set_difference(seed in proptest::collection::vec(1usize..=40, 1..40)) {
        // Clamp into 1..=n so the input is always admissible.
        let n = seed.len();
        let nums: Vec<usize> = seed.iter().map(|&v| (v - 1) % n + 1).collect();

        let present: BTreeSet<usize> = nums.iter().copied().collect();
        let expected: Vec<usize> = (1..=n).filter(|v| !present.contains(v)).collect();
        prop_assert_eq!(find_disappeared_numbers(&nums), Ok(expected));
    }

    #[test]
    fn test_word_pattern_accepts_its_own_encoding(letters in "[a-d]{1,12}") {
        // Spell every letter as a distinct word: always a bijection.
        let sentence: Vec<String> = letters.chars().map(|c| format!("w{c}")).collect();
        prop_assert!(word_pattern(&letters, &sentence.join(" ")));
    }
}
