use async_trait::async_trait;

use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for identity operations: registration, login and lookup.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Identity of the created user (never the password hash)
    ///
    /// # Errors
    /// * `UserExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    /// * `Internal` - Password hashing failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Identity, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `DatabaseError` - Store operation failed
    /// * `Internal` - Stored hash unusable or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Retrieve the identity behind a user id.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_identity(&self, id: UserId) -> Result<Identity, UserError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns the id.
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UserExists` - The store's uniqueness constraint rejected the username
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
}
