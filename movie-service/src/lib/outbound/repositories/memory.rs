use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieDetails;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Rows keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Credential store held in process memory.
///
/// Used by the integration tests and for running the service without a
/// database. Username uniqueness is checked under the write lock, so it holds
/// under concurrent registrations just like the database constraint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.users.write().await;

        if table.rows.values().any(|u| u.username == user.username) {
            return Err(UserError::UserExists(user.username.to_string()));
        }

        let id = table.allocate_id();
        let user = User {
            id: UserId(id),
            username: user.username,
            password_hash: user.password_hash,
        };
        table.rows.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let table = self.users.read().await;
        Ok(table.rows.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let table = self.users.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }
}

/// Movie catalog held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<Table<Movie>>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, details: MovieDetails) -> Result<Movie, MovieError> {
        let mut table = self.movies.write().await;

        let id = table.allocate_id();
        let movie = Movie::from_details(MovieId(id), details);
        table.rows.insert(id, movie.clone());

        Ok(movie)
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let table = self.movies.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieError> {
        let table = self.movies.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let mut table = self.movies.write().await;

        match table.rows.get_mut(&movie.id.0) {
            Some(stored) => {
                *stored = movie.clone();
                Ok(movie)
            }
            None => Err(MovieError::NotFound(movie.id)),
        }
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieError> {
        let mut table = self.movies.write().await;

        table
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(MovieError::NotFound(id))
    }
}
