//! PKCE (RFC 7636) challenge generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// PKCE code verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    verifier: String,
    challenge: String,
}

impl PkceChallenge {
    /// Generates a fresh verifier (32 random bytes, base64url) and its
    /// SHA-256 challenge.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = Self::compute_challenge(&verifier);

        Self {
            verifier,
            challenge,
        }
    }

    fn compute_challenge(verifier: &str) -> String {
        let hash = Sha256::digest(verifier.as_bytes());
        URL_SAFE_NO_PAD.encode(hash)
    }

    /// Returns the code verifier sent with the token exchange.
    #[must_use]
    pub fn verifier(&self) -> &str {
        &self.verifier
    }

    /// Returns the code challenge sent with the consent URL.
    #[must_use]
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Returns the challenge method (always `S256`).
    #[must_use]
    pub const fn method(&self) -> &'static str {
        "S256"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation() {
        let pkce = PkceChallenge::generate();
        assert!(!pkce.verifier().is_empty());
        assert!(!pkce.challenge().is_empty());
        assert_ne!(pkce.verifier(), pkce.challenge());
        assert_eq!(pkce.method(), "S256");
    }

    #[test]
    fn test_verifier_length_in_rfc_bounds() {
        // RFC 7636 requires 43..=128 characters.
        let pkce = PkceChallenge::generate();
        assert!(pkce.verifier().len() >= 43);
        assert!(pkce.verifier().len() <= 128);
    }

    #[test]
    fn test_challenge_is_deterministic() {
        let a = PkceChallenge::compute_challenge("some_verifier");
        let b = PkceChallenge::compute_challenge("some_verifier");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generations_are_unique() {
        let a = PkceChallenge::generate();
        let b = PkceChallenge::generate();
        assert_ne!(a.verifier(), b.verifier());
    }
}
