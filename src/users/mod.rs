//! Email-keyed user accounts.
//!
//! Flow Overview:
//! 1) `UserManager` normalizes the email, hashes the password and stores the user.
//! 2) `auth::authenticate` checks credentials for active users.
//! 3) `auth::obtain_token` hands out the user's single token.

pub mod auth;
pub mod email;
pub mod manager;
pub mod model;
pub mod password;

pub use self::manager::{UserError, UserFields, UserManager};
pub use self::model::{NewUser, Token, User};
