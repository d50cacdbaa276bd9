//! Credential and token authentication.

use crate::{
    store::{StoreError, UserStore},
    users::{email::normalize_email, password, Token, User},
};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;
use tracing::{debug, instrument};

/// Scheme expected in the `Authorization` header.
pub const TOKEN_KEYWORD: &str = "Token";

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Authentication credentials were not provided.")]
    NotProvided,
    #[error("Invalid token header. No credentials provided.")]
    MissingCredentials,
    #[error("Invalid token header. Token string should not contain spaces.")]
    ContainsSpaces,
    #[error("Invalid token header. Token string should not contain invalid characters.")]
    InvalidCharacters,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("User inactive or deleted.")]
    Inactive,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Return the user owning these credentials, if they are valid and the account is active.
///
/// # Errors
/// Returns an error only if the store fails.
#[instrument(skip(store, raw_password))]
pub async fn authenticate(
    store: &dyn UserStore,
    email: &str,
    raw_password: &str,
) -> Result<Option<User>, StoreError> {
    let Some(user) = store.find_user_by_email(&normalize_email(email)).await? else {
        // Keep a miss about as slow as a wrong password.
        let _ = password::hash_password(raw_password);
        debug!("User not found");
        return Ok(None);
    };

    if !user.check_password(raw_password) {
        debug!("Password mismatch");
        return Ok(None);
    }

    if !user.is_active {
        debug!("User inactive");
        return Ok(None);
    }

    Ok(Some(user))
}

/// Get-or-create the user's token.
///
/// # Errors
/// Returns an error if the store fails.
pub async fn obtain_token(store: &dyn UserStore, user: &User) -> Result<Token, StoreError> {
    store.get_or_create_token(user.id).await
}

/// Extract the key from `Authorization: Token <key>`.
///
/// `Ok(None)` means the header is absent or uses another scheme.
fn token_from_headers(headers: &HeaderMap) -> Result<Option<String>, TokenAuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let parts: Vec<&[u8]> = value
        .as_bytes()
        .split(u8::is_ascii_whitespace)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => Ok(None),
        [scheme, ..] if !scheme.eq_ignore_ascii_case(TOKEN_KEYWORD.as_bytes()) => Ok(None),
        [_] => Err(TokenAuthError::MissingCredentials),
        [_, key] => std::str::from_utf8(key)
            .map(|key| Some(key.to_string()))
            .map_err(|_| TokenAuthError::InvalidCharacters),
        _ => Err(TokenAuthError::ContainsSpaces),
    }
}

/// Resolve the request's token into an active user.
///
/// # Errors
/// Returns the reason authentication failed.
pub async fn authenticate_token(
    store: &dyn UserStore,
    headers: &HeaderMap,
) -> Result<User, TokenAuthError> {
    let key = token_from_headers(headers)?.ok_or(TokenAuthError::NotProvided)?;

    let (_, user) = store
        .find_token(&key)
        .await?
        .ok_or(TokenAuthError::InvalidToken)?;

    if !user.is_active {
        return Err(TokenAuthError::Inactive);
    }

    Ok(user)
}
