use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::Salt;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Argon2 memory cost in KiB (64 MiB).
pub const MEMORY_COST_KIB: u32 = 64 * 1024;
/// Argon2 time cost (iterations).
pub const TIME_COST: u32 = 1;
/// Argon2 degree of parallelism (lanes).
pub const PARALLELISM: u32 = 4;
/// Length of the derived digest in bytes.
pub const OUTPUT_LEN: usize = 32;
/// Length of the per-hash random salt in bytes.
pub const SALT_LEN: usize = 16;

/// Password hashing implementation.
///
/// Produces self-describing PHC strings of the form
/// `$argon2id$v=19$m=65536,t=1,p=4$<salt>$<digest>`, so verification
/// depends only on the stored string and never on the current cost
/// parameters.
///
/// Hashing is CPU and memory intensive and blocks the calling thread;
/// async callers should run it on a blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls with the same plaintext yield different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - The system randomness source is unavailable
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.try_fill_bytes(&mut salt).map_err(|e| {
            tracing::error!(error = %e, "randomness source unavailable");
            PasswordError::HashingFailed(format!("randomness source unavailable: {}", e))
        })?;

        let salt = SaltString::encode_b64(&salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// Never fails: a malformed or unsupported hash string verifies as
    /// `false`, exactly like a wrong password.
    pub fn verify(&self, password: &str, encoded_hash: &str) -> bool {
        match EncodedHash::parse(encoded_hash) {
            Ok(encoded) => encoded.matches(password),
            Err(reason) => {
                tracing::debug!(reason, "rejecting malformed password hash");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully decoded contents of a stored PHC string.
struct EncodedHash {
    algorithm: Algorithm,
    version: Version,
    params: Params,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl EncodedHash {
    /// Strictly decode every segment; the first malformed one wins.
    fn parse(encoded: &str) -> Result<Self, &'static str> {
        let parsed = PasswordHash::new(encoded).map_err(|_| "not a PHC string")?;

        let algorithm =
            Algorithm::try_from(parsed.algorithm).map_err(|_| "unsupported algorithm")?;

        let version = parsed
            .version
            .ok_or("missing version")
            .and_then(|v| Version::try_from(v).map_err(|_| "unsupported version"))?;

        for name in ["m", "t", "p"] {
            if parsed.params.get_decimal(name).is_none() {
                return Err("missing cost parameter");
            }
        }
        let params = Params::try_from(&parsed).map_err(|_| "invalid cost parameters")?;

        let mut salt_buf = [0u8; Salt::MAX_LENGTH];
        let salt = parsed
            .salt
            .ok_or("missing salt")?
            .decode_b64(&mut salt_buf)
            .map_err(|_| "malformed salt")?
            .to_vec();

        let digest = parsed.hash.ok_or("missing digest")?.as_bytes().to_vec();

        Ok(Self {
            algorithm,
            version,
            params,
            salt,
            digest,
        })
    }

    /// Recompute the digest with the embedded salt and parameters and
    /// compare in constant time.
    fn matches(&self, password: &str) -> bool {
        let mut computed = vec![0u8; self.digest.len()];
        let argon2 = Argon2::new(self.algorithm, self.version, self.params.clone());

        if let Err(e) = argon2.hash_password_into(password.as_bytes(), &self.salt, &mut computed) {
            tracing::debug!(error = %e, "failed to recompute password digest");
            return false;
        }

        computed.as_slice().ct_eq(self.digest.as_slice()).into()
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::PasswordHasher as _;

    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_format_embeds_parameters() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret1").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$v=19$m=65536,t=1,p=4$"));

        let segments: Vec<&str> = hash.split('$').collect();
        assert_eq!(segments.len(), 6);
        // 16 byte salt and 32 byte digest, unpadded base64
        assert_eq!(segments[4].len(), 22);
        assert_eq!(segments[5].len(), 43);
        assert!(!hash.contains('='));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password123").expect("Failed to hash password");
        let second = hasher.hash("password123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_tampered_digest_fails_verification() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        let digest_start = hash.rfind('$').unwrap() + 1;
        let position = digest_start + 10;
        let original = hash.as_bytes()[position];
        let replacement = if original == b'A' { 'B' } else { 'A' };

        let mut tampered = hash.clone();
        tampered.replace_range(position..position + 1, &replacement.to_string());

        assert_ne!(tampered, hash);
        assert!(!hasher.verify("password123", &tampered));
    }

    #[test]
    fn test_tampered_salt_fails_verification() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        let segments: Vec<&str> = hash.split('$').collect();
        let salt = segments[4];
        let replacement = if salt.starts_with('A') { "B" } else { "A" };
        let tampered_salt = format!("{}{}", replacement, &salt[1..]);
        let tampered = hash.replacen(salt, &tampered_salt, 1);

        assert!(!hasher.verify("password123", &tampered));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let params = Params::new(8 * 1024, 2, 1, Some(OUTPUT_LEN)).unwrap();
        let salt = SaltString::encode_b64(b"fixed-salt-bytes").unwrap();
        let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(b"legacy_password", &salt)
            .unwrap()
            .to_string();

        assert!(hash.contains("m=8192,t=2,p=1"));

        let hasher = PasswordHasher::new();
        assert!(hasher.verify("legacy_password", &hash));
        assert!(!hasher.verify("other_password", &hash));
    }

    #[test]
    fn test_verify_malformed_hashes() {
        let hasher = PasswordHasher::new();

        let malformed = [
            "",
            "invalid_hash",
            "$argon2id$v=19$m=65536,t=1,p=4$c2FsdA",
            "$argon2id$v=19$m=65536,t=1$c29tZXNhbHRzb21lc2FsdA$aGFzaGhhc2hoYXNoaGFzaGhhc2g",
            "$argon2id$m=65536,t=1,p=4$c29tZXNhbHRzb21lc2FsdA$aGFzaGhhc2hoYXNoaGFzaGhhc2g",
            "$bcrypt$v=19$m=65536,t=1,p=4$c29tZXNhbHRzb21lc2FsdA$aGFzaGhhc2hoYXNoaGFzaGhhc2g",
            "$argon2id$v=19$m=65536,t=1,p=4$!!!!$aGFzaGhhc2hoYXNoaGFzaGhhc2g",
            "$argon2id$v=19$m=abc,t=1,p=4$c29tZXNhbHRzb21lc2FsdA$aGFzaGhhc2hoYXNoaGFzaGhhc2g",
        ];

        for hash in malformed {
            assert!(!hasher.verify("password", hash), "accepted {hash:?}");
        }
    }
}
