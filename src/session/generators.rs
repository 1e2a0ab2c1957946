use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Number of random bytes behind every generated session identifier.
pub const SESSION_ID_BYTES: usize = 32;

/// Trait for generating session identifiers
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates unguessable identifiers from the operating system's CSPRNG.
///
/// Identifiers double as bearer tokens, so there is no weaker fallback:
/// if the OS refuses to hand out randomness the process aborts.
pub struct SecureSessionIdGenerator;

impl SecureSessionIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SecureSessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionIdGenerator for SecureSessionIdGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        if let Err(err) = OsRng.try_fill_bytes(&mut bytes) {
            panic!("secure random source unavailable, refusing to mint session id: {err}");
        }
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_session_id_generator() {
        let generator = SecureSessionIdGenerator::new();
        let id1 = generator.generate();
        let id2 = generator.generate();

        // 32 bytes without padding
        assert_eq!(id1.len(), 43);
        assert_eq!(id2.len(), 43);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_ids_are_url_safe() {
        let id = SecureSessionIdGenerator::new().generate();

        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(URL_SAFE_NO_PAD.decode(&id).unwrap().len(), SESSION_ID_BYTES);
    }
}
