use crate::{
    store::{SharedStore, StoreError},
    users::{
        email::normalize_email,
        password::{self, PasswordError},
        NewUser, User,
    },
};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User must have an email address")]
    MissingEmail,
    #[error("user with email {0} already exists")]
    DuplicateEmail(String),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(StoreError),
}

/// Optional columns accepted by [`UserManager::create_user`].
#[derive(Clone, Debug)]
pub struct UserFields {
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Default for UserFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

impl UserFields {
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct UserManager {
    store: SharedStore,
}

impl std::fmt::Debug for UserManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManager").finish_non_exhaustive()
    }
}

impl UserManager {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Create and save a user.
    ///
    /// Without a password the account gets an unusable one and can't log in
    /// until a password is set.
    ///
    /// # Errors
    /// [`UserError::MissingEmail`] for a blank email, [`UserError::DuplicateEmail`]
    /// when the normalized email is taken, or a hashing/storage error.
    #[instrument(skip(self, password, extra))]
    pub async fn create_user(
        &self,
        email: &str,
        password: Option<&str>,
        extra: UserFields,
    ) -> Result<User, UserError> {
        if email.trim().is_empty() {
            return Err(UserError::MissingEmail);
        }

        let email = normalize_email(email);

        let password = match password {
            Some(raw) => password::hash_password(raw)?,
            None => password::unusable_password(),
        };

        let new_user = NewUser {
            email,
            name: extra.name,
            password,
            is_active: extra.is_active,
            is_staff: extra.is_staff,
            is_superuser: extra.is_superuser,
        };

        let email = new_user.email.clone();

        let user = self
            .store
            .insert_user(new_user)
            .await
            .map_err(|err| match err {
                StoreError::Conflict => UserError::DuplicateEmail(email),
                other => UserError::Store(other),
            })?;

        debug!(user_id = user.id, "User created");

        Ok(user)
    }

    /// Create a user and escalate it to staff + superuser.
    ///
    /// # Errors
    /// Same as [`UserManager::create_user`], plus a failure to save the flags.
    #[instrument(skip(self, password))]
    pub async fn create_superuser(&self, email: &str, password: &str) -> Result<User, UserError> {
        let mut user = self
            .create_user(email, Some(password), UserFields::default())
            .await?;

        user.is_staff = true;
        user.is_superuser = true;

        self.store.save_user(&user).await.map_err(UserError::Store)?;

        info!(user_id = user.id, "Superuser created");

        Ok(user)
    }

    /// Look a user up by email, normalized the same way as on creation.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.store
            .find_user_by_email(&normalize_email(email))
            .await
            .map_err(UserError::Store)
    }
}
