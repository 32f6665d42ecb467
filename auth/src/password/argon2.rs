use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Produces Argon2id hashes in PHC string format. The work factor is the
/// Argon2 time cost (number of passes over memory); memory and parallelism
/// stay at the crate's recommended defaults.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Default work factor (Argon2 time cost).
    pub const DEFAULT_WORK_FACTOR: u32 = 3;

    /// Longest accepted plaintext, in bytes.
    pub const MAX_PASSWORD_BYTES: usize = 1024;

    /// Create a password hasher with the default work factor.
    pub fn new() -> Self {
        Self {
            params: Self::params_for(Self::DEFAULT_WORK_FACTOR)
                .unwrap_or_else(|_| Params::default()),
        }
    }

    /// Create a password hasher with a tuned work factor.
    ///
    /// # Arguments
    /// * `work_factor` - Argon2 time cost, at least 1
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejects the work factor
    pub fn with_work_factor(work_factor: u32) -> Result<Self, PasswordError> {
        Ok(Self {
            params: Self::params_for(work_factor)?,
        })
    }

    fn params_for(work_factor: u32) -> Result<Params, PasswordError> {
        Params::new(
            Params::DEFAULT_M_COST,
            work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))
    }

    /// Configured work factor.
    pub fn work_factor(&self) -> u32 {
        self.params.t_cost()
    }

    /// Hash a plaintext password.
    ///
    /// Uses Argon2id with a random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Input exceeds the length limit or Argon2 failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::HashingFailed(format!(
                "password exceeds {} bytes",
                Self::MAX_PASSWORD_BYTES
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters and salt are read from the hash itself, so hashes produced
    /// under an older work factor keep verifying. The digest comparison is
    /// constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or uses unsupported parameters
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_work_factor(1).expect("work factor 1 is valid")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert_ne!(hash, password);

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same", &first).unwrap());
        assert!(hasher.verify("same", &second).unwrap());
    }

    #[test]
    fn test_default_hash_embeds_work_factor() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.work_factor(), PasswordHasher::DEFAULT_WORK_FACTOR);

        let hash = hasher.hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("t=3"));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let hash = fast_hasher().hash("pw").unwrap();

        // a hasher tuned differently still verifies older hashes
        let stronger = PasswordHasher::with_work_factor(2).unwrap();
        assert!(stronger.verify("pw", &hash).unwrap());
    }

    #[test]
    fn test_zero_work_factor_rejected() {
        let result = PasswordHasher::with_work_factor(0);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[test]
    fn test_hash_rejects_oversized_input() {
        let hasher = fast_hasher();
        let long = "x".repeat(PasswordHasher::MAX_PASSWORD_BYTES + 1);

        let result = hasher.hash(&long);
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}
