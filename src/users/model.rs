use crate::users::password::{self, PasswordError};
use chrono::{DateTime, Utc};

/// An account. The email address doubles as the username.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.email
    }

    /// Replace the stored hash. The change is not persisted until the user is saved.
    ///
    /// # Errors
    /// Returns an error if the password can't be hashed.
    pub fn set_password(&mut self, raw: &str) -> Result<(), PasswordError> {
        self.password = password::hash_password(raw)?;
        Ok(())
    }

    pub fn set_unusable_password(&mut self) {
        self.password = password::unusable_password();
    }

    #[must_use]
    pub fn check_password(&self, raw: &str) -> bool {
        password::verify_password(raw, &self.password)
    }

    #[must_use]
    pub fn has_usable_password(&self) -> bool {
        password::is_usable(&self.password)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"***")
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .field("date_joined", &self.date_joined)
            .finish()
    }
}

/// A user that has not been stored yet. `password` is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"***")
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish()
    }
}

/// Opaque credential bound to a single user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub user_id: i64,
    pub created: DateTime<Utc>,
}

impl Token {
    pub const KEY_LENGTH: usize = 40;

    /// 20 random bytes, hex encoded.
    #[must_use]
    pub fn generate_key() -> String {
        use rand::{rngs::OsRng, RngCore};

        let mut bytes = [0u8; Self::KEY_LENGTH / 2];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
