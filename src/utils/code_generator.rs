//! Short code generation and validation utilities.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default length of generated codes.
///
/// 62^16 possible codes keeps the chance of a collision negligible at any
/// realistic volume.
pub const DEFAULT_CODE_LENGTH: usize = 16;

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 8;

/// Longest code length accepted by configuration.
pub const MAX_CODE_LENGTH: usize = 16;

/// Generates a random alphanumeric short code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(16);
/// assert_eq!(code.len(), 16);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns whether `code` could have been produced by [`generate_code`].
///
/// Used to reject obviously bogus lookups before they reach the store.
pub fn is_valid_code(code: &str) -> bool {
    (1..=MAX_CODE_LENGTH).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}
