//! Authentication utilities library
//!
//! Provides the authentication primitives used by the movie service:
//! - Password hashing (Argon2id, tunable work factor)
//! - Access token issuance and verification (HMAC-signed JWT, 72 hour lifetime)
//! - Authentication coordination
//!
//! The service defines its own ports and error types and adapts these
//! implementations at its boundary.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_work_factor(1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Utc;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let token = handler.encode(&Claims::for_identity(1, "alice", now)).unwrap();
//! let decoded = handler.decode(&token, now).unwrap();
//! assert_eq!(decoded.username, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 1).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_identity(1, "alice", Utc::now());
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token, Utc::now()).unwrap();
//! assert_eq!(decoded.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
