//! Letter-to-word bijection check.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Returns `true` if `s` follows `pattern`.
///
/// `s` is split on single spaces. It follows the pattern when it has one
/// word per pattern character and the mapping character -> word is a
/// bijection: a character always stands for the same word, and no two
/// characters stand for the same word.
///
/// # Example
///
/// ```rust
/// use confluent::word_pattern;
///
/// assert!(word_pattern("abba", "dog cat cat dog"));
/// assert!(!word_pattern("abba", "dog dog dog dog"));
/// ```
pub fn word_pattern(pattern: &str, s: &str) -> bool {
    let mut forward: HashMap<char, &str> = HashMap::new();
    let mut backward: HashMap<&str, char> = HashMap::new();
    let mut words = s.split(' ');

    for letter in pattern.chars() {
        let Some(word) = words.next() else {
            return false;
        };

        match forward.entry(letter) {
            Entry::Occupied(bound) if *bound.get() != word => return false,
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                if backward.insert(word, letter).is_some() {
                    return false;
                }
                slot.insert(word);
            }
        }
    }

    words.next().is_none()
}
