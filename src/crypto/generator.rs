//! Random password generation for new entries.

use rand::seq::IndexedRandom;
use zeroize::Zeroizing;

/// Characters a generated password is drawn from.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+";

pub const DEFAULT_LENGTH: usize = 16;
pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 128;

/// Generate a random password of `length` characters.
///
/// `length` is clamped to `MIN_LENGTH..=MAX_LENGTH`. Characters are
/// sampled uniformly from `CHARSET` with the thread-local CSPRNG.
pub fn generate_password(length: usize) -> Zeroizing<String> {
    let length = length.clamp(MIN_LENGTH, MAX_LENGTH);
    let mut rng = rand::rng();

    let mut password = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        if let Some(&c) = CHARSET.choose(&mut rng) {
            password.push(char::from(c));
        }
    }
    password
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_is_respected() {
        assert_eq!(generate_password(DEFAULT_LENGTH).len(), DEFAULT_LENGTH);
    }

    #[test]
    fn length_is_clamped() {
        assert_eq!(generate_password(0).len(), MIN_LENGTH);
        assert_eq!(generate_password(3).len(), MIN_LENGTH);
        assert_eq!(generate_password(10_000).len(), MAX_LENGTH);
    }

    #[test]
    fn only_charset_characters_are_used() {
        let pw = generate_password(MAX_LENGTH);
        assert!(pw.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn consecutive_passwords_differ() {
        assert_ne!(*generate_password(32), *generate_password(32));
    }
}
