//! Token authenticated profile endpoint.

use super::internal_error;
use crate::users::{
    auth::{self, TokenAuthError, TOKEN_KEYWORD},
    UserManager,
};
use axum::{
    extract::Extension,
    http::{header::WWW_AUTHENTICATE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub email: String,
    pub name: String,
}

fn unauthorized(err: &TokenAuthError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, TOKEN_KEYWORD)],
        Json(json!({ "detail": err.to_string() })),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/user/me",
    responses(
        (status = 200, description = "Return the authenticated user profile.", body = MeResponse),
        (status = 401, description = "Missing or invalid token."),
    ),
    security(("token" = [])),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn me(headers: HeaderMap, manager: Extension<UserManager>) -> impl IntoResponse {
    match auth::authenticate_token(manager.store().as_ref(), &headers).await {
        Ok(user) => (
            StatusCode::OK,
            Json(MeResponse {
                email: user.email,
                name: user.name,
            }),
        )
            .into_response(),
        Err(TokenAuthError::Store(e)) => {
            error!("Failed to resolve token: {e}");
            internal_error("Failed to resolve token")
        }
        Err(e) => unauthorized(&e),
    }
}
