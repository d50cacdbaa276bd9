use super::{internal_error, FieldErrors, Payload};
use crate::users::{
    email::{normalize_email, valid_email, EMAIL_MAX_LENGTH},
    password::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH},
    UserError, UserFields, UserManager,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

pub const NAME_MAX_LENGTH: usize = 255;
pub const EMAIL_TAKEN: &str = "user with this email already exists.";

#[derive(ToSchema, Deserialize)]
pub struct UserCreate {
    email: Option<String>,
    #[schema(min_length = 5, max_length = 128)]
    password: Option<String>,
    name: Option<String>,
}

impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreatedUser {
    pub email: String,
    pub name: String,
}

/// Validated form of [`UserCreate`].
struct NewAccount<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

fn validate(payload: &UserCreate) -> Result<NewAccount<'_>, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = errors.require("email", payload.email.as_deref());
    let password = errors.require("password", payload.password.as_deref());

    let name = errors.require("name", payload.name.as_deref()).map(str::trim);

    if let Some(email) = email {
        if valid_email(email.trim()) {
            errors.max_length("email", email.trim(), EMAIL_MAX_LENGTH);
        } else {
            errors.add("email", "Enter a valid email address.");
        }
    }

    if let Some(name) = name {
        errors.max_length("name", name, NAME_MAX_LENGTH);
    }

    if let Some(password) = password {
        errors.min_length("password", password, PASSWORD_MIN_LENGTH);
        errors.max_length("password", password, PASSWORD_MAX_LENGTH);
    }

    match (email, password, name) {
        (Some(email), Some(password), Some(name)) if errors.is_empty() => Ok(NewAccount {
            email,
            password,
            name,
        }),
        _ => Err(errors),
    }
}

#[utoipa::path(
    post,
    path= "/user/create",
    request_body(content = UserCreate, content_type = "application/json"),
    responses (
        (status = 201, description = "User created", body = CreatedUser, content_type = "application/json"),
        (status = 400, description = "Invalid fields or a user with this email already exists"),
    ),
    tag= "users"
)]
// axum handler for user creation
#[instrument(skip_all)]
pub async fn create(
    manager: Extension<UserManager>,
    payload: Payload<UserCreate>,
) -> impl IntoResponse {
    let Payload(payload) = payload;

    debug!("payload: {:?}", payload);

    let account = match validate(&payload) {
        Ok(account) => account,
        Err(errors) => return errors.into_response(),
    };

    // check if user exists
    match manager
        .store()
        .email_exists(&normalize_email(account.email))
        .await
    {
        Ok(true) => {
            debug!("User already exists");
            return FieldErrors::single("email", EMAIL_TAKEN).into_response();
        }
        Ok(false) => (),
        Err(e) => {
            error!("Error checking if user exists: {:?}", e);
            return internal_error("Error checking if user exists");
        }
    }

    match manager
        .create_user(
            account.email,
            Some(account.password),
            UserFields::with_name(account.name),
        )
        .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(CreatedUser {
                email: user.email,
                name: user.name,
            }),
        )
            .into_response(),

        // lost a race with a concurrent registration
        Err(UserError::DuplicateEmail(_)) => {
            FieldErrors::single("email", EMAIL_TAKEN).into_response()
        }

        Err(e) => {
            error!("Error creating user: {:?}", e);
            internal_error("Error creating user")
        }
    }
}
