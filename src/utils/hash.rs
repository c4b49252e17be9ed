// src/utils/hash.rs

//! Content fingerprints.

use sha1::{Digest, Sha1};

/// SHA-1 of `text`, rendered as 40 uppercase hex characters.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    hex::encode_upper(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(fingerprint(""), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
        assert_eq!(fingerprint("abc"), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }

    #[test]
    fn test_stable_and_uppercase() {
        let a = fingerprint("A50% offB");
        let b = fingerprint("A50% offB");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_unicode_input() {
        assert_ne!(fingerprint("Giảm 50%"), fingerprint("Giam 50%"));
    }
}
