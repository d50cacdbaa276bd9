//! Persistence for users and tokens.

pub mod memory;
pub mod postgres;

#[cfg(test)]
mod contract;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;

use crate::users::{NewUser, Token, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column (the email) already holds the value.
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type SharedStore = Arc<dyn UserStore>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; [`StoreError::Conflict`] when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Write every mutable column of an existing user.
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Return the user's token, creating it on first use.
    async fn get_or_create_token(&self, user_id: i64) -> Result<Token, StoreError>;

    async fn find_token(&self, key: &str) -> Result<Option<(Token, User)>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
