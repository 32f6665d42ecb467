use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::IdentityServicePort;
use crate::user::ports::UserRepository;

const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// Domain service implementation for identity operations.
///
/// Orchestrates the credential store and the authenticator; holds no
/// mutable state of its own.
pub struct IdentityService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: Option<String>,
}

impl<UR> IdentityService<UR>
where
    UR: UserRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token signing, configured once at startup
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let decoy_hash = match authenticator.hash_password(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to prepare decoy password hash");
                None
            }
        };

        Self {
            repository,
            authenticator,
            decoy_hash,
        }
    }

    /// Spend one password verification so an unknown name costs the same
    /// as a wrong password.
    fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.authenticator.verify_password(password, hash);
        }
    }
}

#[async_trait]
impl<UR> IdentityServicePort for IdentityService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Identity, UserError> {
        let RegisterUserCommand { username, password } = command;

        // The store's unique constraint is the authoritative guard; this
        // lookup only avoids hashing for a name that is obviously taken.
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(UserError::UserExists(username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(password.as_str())
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = self
            .repository
            .create(NewUser {
                username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user.identity())
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let LoginCommand { username, password } = command;

        // A name that fails validation cannot be in the store.
        let username = Username::new(username).map_err(|_| UserError::InvalidCredentials)?;

        let Some(user) = self.repository.find_by_username(&username).await? else {
            self.verify_decoy(password.as_str());
            return Err(UserError::InvalidCredentials);
        };

        let claims = Claims::for_identity(user.id.0, user.username.as_str(), Utc::now());

        let result = self
            .authenticator
            .authenticate(password.as_str(), &user.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    UserError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    UserError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::debug!(user_id = %user.id, "Access token issued");

        Ok(result.access_token)
    }

    async fn get_identity(&self, id: UserId) -> Result<Identity, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| user.identity())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
