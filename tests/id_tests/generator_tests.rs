//! IdGenerator Tests
//!
//! Tests verify:
//! - Requested length is honoured
//! - Output stays inside the URL-safe alphabet
//! - Ids are not repeated in practice

use std::collections::HashSet;

use pastebin::id::{is_valid_id, IdGenerator, RandomIdGenerator, ALPHABET};

#[test]
fn test_generate_default_length() {
    let id = RandomIdGenerator.generate(8);
    assert_eq!(id.len(), 8);
}

#[test]
fn test_generate_various_lengths() {
    for length in [1, 4, 16, 64, 100] {
        assert_eq!(RandomIdGenerator.generate(length).len(), length);
    }
}

#[test]
fn test_generate_zero_length_is_empty() {
    assert_eq!(RandomIdGenerator.generate(0), "");
}

#[test]
fn test_generated_ids_are_url_safe() {
    for _ in 0..1000 {
        let id = RandomIdGenerator.generate(12);
        assert!(is_valid_id(&id), "unexpected character in {}", id);
        assert!(!id.contains('/') && !id.contains('+') && !id.contains('='));
    }
}

#[test]
fn test_generated_ids_are_distinct() {
    let ids: HashSet<String> = (0..10_000).map(|_| RandomIdGenerator.generate(8)).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn test_every_symbol_eventually_appears() {
    let mut seen = HashSet::new();
    for _ in 0..200 {
        seen.extend(RandomIdGenerator.generate(64).bytes());
    }
    assert_eq!(seen.len(), ALPHABET.len());
}

#[test]
fn test_is_valid_id() {
    assert!(is_valid_id("Ab3dE9kL"));
    assert!(is_valid_id("a-b_c"));
    assert!(!is_valid_id(""));
    assert!(!is_valid_id("../etc"));
    assert!(!is_valid_id("a b"));
}
