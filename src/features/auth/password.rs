//! Password hashing for back-office users.
//!
//! PBKDF2-HMAC-SHA256 with a per-password random salt. Stored hashes are
//! self-describing: `pbkdf2-sha256$<rounds>$<salt_hex>$<digest_hex>`, so
//! the round count can be raised later without invalidating old hashes.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use uuid::Uuid;

const SCHEME: &str = "pbkdf2-sha256";
const ROUNDS: u32 = 310_000;
const DIGEST_LEN: usize = 32;

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> String {
    // Two v4 UUIDs give a 32-byte random salt without pulling in a
    // dedicated RNG dependency
    let mut salt = [0u8; 32];
    salt[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    salt[16..].copy_from_slice(Uuid::new_v4().as_bytes());

    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, ROUNDS, &mut digest);

    format!(
        "{}${}${}${}",
        SCHEME,
        ROUNDS,
        hex::encode(salt),
        hex::encode(digest)
    )
}

/// Verify a plaintext password against a stored hash.
///
/// Returns false for malformed stored hashes rather than erroring: a bad
/// row in the users table must not distinguish itself from a wrong password.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');

    let (Some(scheme), Some(rounds), Some(salt_hex), Some(digest_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    if scheme != SCHEME {
        return false;
    }

    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    if expected.len() != DIGEST_LEN {
        return false;
    }

    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut digest);

    constant_time_eq(&digest, &expected)
}

/// Compare digests without short-circuiting on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::Password;
    use fake::Fake;

    #[test]
    fn hash_then_verify_roundtrip() {
        let password: String = Password(12..24).fake();
        let stored = hash_password(&password);

        assert!(verify_password(&password, &stored));
    }

    #[test]
    fn rejects_wrong_password() {
        let stored = hash_password("correct horse battery staple");

        assert!(!verify_password("correct horse battery stable", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let a = hash_password("same password");
        let b = hash_password("same password");

        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn rejects_malformed_stored_hash() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "not-a-hash"));
        assert!(!verify_password("anything", "bcrypt$10$abcd$ef01"));
        assert!(!verify_password("anything", "pbkdf2-sha256$x$zz$zz"));
    }
}
