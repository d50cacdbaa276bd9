use super::{internal_error, FieldErrors, Payload, NON_FIELD_ERRORS};
use crate::users::{auth, UserManager};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

pub const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

#[derive(ToSchema, Deserialize)]
pub struct TokenRequest {
    email: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path= "/user/token",
    request_body(content = TokenRequest, content_type = "application/json"),
    responses (
        (status = 200, description = "Token issued", body = TokenResponse, content_type = "application/json"),
        (status = 400, description = "Missing fields or invalid credentials"),
    ),
    tag= "users"
)]
// axum handler for token issuance
#[instrument(skip_all)]
pub async fn token(
    manager: Extension<UserManager>,
    payload: Payload<TokenRequest>,
) -> impl IntoResponse {
    let Payload(payload) = payload;

    debug!("payload: {:?}", payload);

    let mut errors = FieldErrors::new();
    let email = errors.require("email", payload.email.as_deref());
    let password = errors.require("password", payload.password.as_deref());

    let (Some(email), Some(password)) = (email, password) else {
        return errors.into_response();
    };

    let user = match auth::authenticate(manager.store().as_ref(), email, password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Invalid credentials");
            return FieldErrors::single(NON_FIELD_ERRORS, INVALID_CREDENTIALS).into_response();
        }
        Err(e) => {
            error!("Error authenticating user: {:?}", e);
            return internal_error("Error authenticating user");
        }
    };

    match auth::obtain_token(manager.store().as_ref(), &user).await {
        Ok(token) => (StatusCode::OK, Json(TokenResponse { token: token.key })).into_response(),
        Err(e) => {
            error!("Error issuing token: {:?}", e);
            internal_error("Error issuing token")
        }
    }
}
