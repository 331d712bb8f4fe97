//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as a `success: false` [`Envelope`].

use atrium_core::{Envelope, FieldErrors};
use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error("validation failed")]
  Validation(#[from] FieldErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, envelope) = match self {
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, Envelope::<()>::failure("Unauthorized"))
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Envelope::failure(m)),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, Envelope::failure(m)),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, Envelope::failure(m)),
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Envelope::failure("Please correct the highlighted fields").with_errors(errors),
      ),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Envelope::failure("Internal server error"))
      }
    };

    let mut res = (status, Json(envelope)).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"atrium\""),
      );
    }
    res
  }
}
