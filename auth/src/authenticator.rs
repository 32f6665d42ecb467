use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the only process-wide authentication state: the signing secret and
/// the hashing work factor. Both are fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `work_factor` - Password hashing work factor
    ///
    /// # Errors
    /// * `InvalidParameters` - The work factor is rejected by the hasher
    pub fn new(jwt_secret: &[u8], work_factor: u32) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_work_factor(work_factor)?,
            jwt_handler: JwtHandler::new(jwt_secret),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing a token.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for an identity without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.jwt_handler
            .encode(&Claims::for_identity(user_id, username, now))
    }

    /// Validate and decode a JWT token at time `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token, now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!", 1).expect("valid work factor")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let now = Utc::now();
        let claims = Claims::for_identity(7, "alice", now);
        let result = authenticator
            .authenticate(password, &hash, &claims)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token, now)
            .expect("Token validation failed");
        assert_eq!(decoded.user_id, 7);
        assert_eq!(decoded.username, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = Claims::for_identity(7, "alice", Utc::now());

        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("pw").unwrap();

        assert!(authenticator.verify_password("pw", &hash).unwrap());
        assert!(!authenticator.verify_password("other", &hash).unwrap());
        assert!(authenticator.verify_password("pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = authenticator();
        let claims = Claims::for_identity(7, "alice", Utc::now());

        let result = authenticator.authenticate("pw", "not-a-phc-string", &claims);
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();
        let now = Utc::now();

        let token = authenticator
            .issue_token(3, "bob", now)
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token(&token, now + Duration::hours(71))
            .expect("Failed to validate token");
        assert_eq!(decoded.sub, "3");
        assert_eq!(decoded.username, "bob");

        let expired = authenticator.validate_token(&token, now + Duration::hours(72));
        assert_eq!(expired, Err(JwtError::Expired));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_work_factor() {
        let result = Authenticator::new(b"secret", 0);
        assert!(result.is_err());
    }
}
