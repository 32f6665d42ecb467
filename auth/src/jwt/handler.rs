use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Algorithms accepted on verification: the HMAC family only.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Only the `alg` member of the JOSE header is inspected before verification.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// JWT token handler for issuing and verifying access tokens.
///
/// Signs with HS256. Verification accepts any HMAC algorithm keyed by the
/// same secret and rejects everything else, `none` included, before the
/// signature is looked at.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // expiry is checked against the caller's clock in `decode`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validation,
        }
    }

    /// Encode claims into a signed, compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT at time `now`.
    ///
    /// Checks run in order: structure, algorithm, signature, expiry.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url segments or undecodable content
    /// * `AlgorithmMismatch` - Header names a non-HMAC algorithm
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Expired` - `now` is at or after `exp`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        Self::check_header(token)?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                    ErrorKind::InvalidAlgorithm => JwtError::AlgorithmMismatch(e.to_string()),
                    _ => JwtError::MalformedToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    fn check_header(token: &str) -> Result<(), JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments[0].is_empty() || segments[1].is_empty() {
            return Err(JwtError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(segments[0])
            .map_err(|e| JwtError::MalformedToken(format!("header encoding: {}", e)))?;
        let header: RawHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| JwtError::MalformedToken(format!("header content: {}", e)))?;

        let accepted = matches!(
            header.alg.parse::<Algorithm>(),
            Ok(alg) if ACCEPTED_ALGORITHMS.contains(&alg)
        );
        if !accepted {
            return Err(JwtError::AlgorithmMismatch(header.alg));
        }

        Ok(())
    }
}
