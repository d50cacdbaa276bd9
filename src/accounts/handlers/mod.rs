pub mod health;
pub use self::health::health;

pub mod user_create;
pub use self::user_create::create;

pub mod user_token;
pub use self::user_token::token;

pub mod me;
pub use self::me::me;

// common types for the handlers
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Request body accepted either as JSON or as an urlencoded form.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let is_form = content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(Self(value)),
                Err(rejection) => Err(parse_error(&rejection.body_text())),
            }
        } else {
            match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(Self(value)),
                Err(JsonRejection::MissingJsonContentType(_)) => {
                    Err(unsupported_media_type(content_type.as_deref().unwrap_or("")))
                }
                Err(rejection) => Err(parse_error(&rejection.body_text())),
            }
        }
    }
}

fn parse_error(detail: &str) -> Response {
    debug!("Malformed payload: {}", detail);

    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": format!("Malformed request. {detail}") })),
    )
        .into_response()
}

fn unsupported_media_type(content_type: &str) -> Response {
    debug!("Unsupported content type: {:?}", content_type);

    let detail = format!("Unsupported media type \"{content_type}\" in request.");

    (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

/// Validation errors keyed by field name, rendered as `{"field": ["message"]}`.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Return the value of a required, non blank field, recording an error otherwise.
    pub fn require<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value {
            None => {
                self.add(field, REQUIRED);
                None
            }
            Some(value) if value.trim().is_empty() => {
                self.add(field, BLANK);
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(
                field,
                format!("Ensure this field has at least {min} characters."),
            );
        }
    }

    pub fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
    }
}

impl IntoResponse for FieldErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

pub(crate) fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": message })),
    )
        .into_response()
}
