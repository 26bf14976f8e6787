//! Identifier generation
//!
//! Ids are drawn from the operating system CSPRNG and encoded with the
//! URL-safe base64 alphabet, so they can be placed in a path segment as-is.
//! The generator does not check for collisions; the store retries instead.

use rand::rngs::OsRng;
use rand::RngCore;

/// URL-safe alphabet (RFC 4648 §5)
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Source of fresh entry ids
pub trait IdGenerator: Send + Sync {
    /// Produce an id of exactly `length` characters
    fn generate(&self, length: usize) -> String;
}

/// Default generator backed by `OsRng`
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, length: usize) -> String {
        let mut bytes = vec![0u8; length];
        OsRng.fill_bytes(&mut bytes);

        // 64 divides 256, so masking keeps every symbol equally likely
        bytes
            .into_iter()
            .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
            .collect()
    }
}

/// Returns true if every character of `id` belongs to [`ALPHABET`]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| ALPHABET.contains(&b))
}
