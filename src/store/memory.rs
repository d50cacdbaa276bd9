use super::{StoreError, UserStore};
use crate::users::{NewUser, Token, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
    tokens: HashMap<String, Token>,
}

/// Process-local store used by tests and embedders that don't need Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }

        inner.next_id += 1;
        let stored = User {
            id: inner.next_id,
            email: user.email,
            name: user.name,
            password: user.password,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            date_joined: Utc::now(),
        };
        inner.users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }

        if inner
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::Conflict);
        }

        inner.users.insert(user.id, user.clone());

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| u.email == email))
    }

    async fn get_or_create_token(&self, user_id: i64) -> Result<Token, StoreError> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::NotFound);
        }

        if let Some(token) = inner.tokens.values().find(|t| t.user_id == user_id) {
            return Ok(token.clone());
        }

        let token = Token {
            key: Token::generate_key(),
            user_id,
            created: Utc::now(),
        };
        inner.tokens.insert(token.key.clone(), token.clone());

        Ok(token)
    }

    async fn find_token(&self, key: &str) -> Result<Option<(Token, User)>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner.tokens.get(key).and_then(|token| {
            inner
                .users
                .get(&token.user_id)
                .map(|user| (token.clone(), user.clone()))
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
