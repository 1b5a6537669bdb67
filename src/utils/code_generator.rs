//! Short code generation.
//!
//! Codes are drawn uniformly from a fixed 62-character alphabet using the
//! thread-local CSPRNG, so they are neither sequential nor guessable by
//! enumeration.

use rand::Rng;

/// Digits, lowercase and uppercase ASCII letters.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of codes produced on the normal path.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Length used once the normal path has collided too often.
pub const FALLBACK_CODE_LENGTH: usize = 7;

/// Codes that would be shadowed by fixed routes.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

/// Source of candidate short codes.
///
/// Implementations are pure generators; they never consult storage.
/// Uniqueness is enforced by the store on insert.
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Uniform random generator over [`ALPHABET`], skipping [`RESERVED_CODES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        loop {
            let code = generate_code(length);
            if !is_reserved_code(&code) {
                return code;
            }
        }
    }
}

/// Generates a random code of `length` characters from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` could have been produced by [`generate_code`].
pub fn is_valid_code(code: &str) -> bool {
    (DEFAULT_CODE_LENGTH..=FALLBACK_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_alphabet_has_62_distinct_chars() {
        let set: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(set.len(), 62);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).len(), 6);
        assert_eq!(generate_code(FALLBACK_CODE_LENGTH).len(), 7);
        assert_eq!(generate_code(0).len(), 0);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(is_valid_code(&code), "unexpected code {code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(6)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_alphabet() {
        // 62 symbols over 62_000 draws; every symbol should show up.
        let mut seen: HashMap<char, usize> = HashMap::new();
        for _ in 0..10_000 {
            for c in generate_code(6).chars() {
                *seen.entry(c).or_default() += 1;
            }
        }
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_random_generator_delegates() {
        let code = RandomCodeGenerator.generate(7);
        assert_eq!(code.len(), 7);
        assert!(is_valid_code(&code));
    }

    #[test]
    fn test_reserved_codes_are_route_names() {
        assert!(is_reserved_code("health"));
        assert!(is_reserved_code("shorten"));
        assert!(!is_reserved_code("Health"));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("Ab1cD2"));
        assert!(is_valid_code("Ab1cD2x"));
        assert!(!is_valid_code("Ab1cD"));
        assert!(!is_valid_code("Ab1cD2xy"));
        assert!(!is_valid_code("Ab1-D2"));
        assert!(!is_valid_code("stats!"));
    }
}
