//! # Accounts
//!
//! `accounts` is a small user-account service. Users are identified by their
//! email address instead of a username, passwords are stored as Argon2id
//! hashes, and clients authenticate follow-up requests with an opaque token.
//!
//! ## Identity
//!
//! - **Email is the username:** it is unique, and its domain part is normalized
//!   to lowercase before it is stored or looked up.
//! - **Superusers:** `create_superuser` escalates a freshly created account to
//!   staff + superuser.
//!
//! ## Tokens
//!
//! `POST /user/token` exchanges valid credentials for a 40 character hex key.
//! Each user owns at most one key; asking again returns the same one. The key is
//! presented as `Authorization: Token <key>`.

pub mod accounts;
pub mod cli;
pub mod store;
pub mod users;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
