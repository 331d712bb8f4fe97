//! JSON REST API for Atrium.
//!
//! Exposes an axum [`Router`] backed by any
//! [`atrium_core::store::RecordStore`]. Admin endpoints require HTTP Basic
//! credentials; the public submission endpoints do not. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", atrium_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod patch;

use std::sync::Arc;

use atrium_core::{CareerApplication, ContactSubmission, Subscriber, store::RecordStore};
use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{delete, get, patch, post},
};

pub use auth::AuthConfig;
pub use error::ApiError;

use handlers::{career, contact, records, subscribers};

/// Headroom on top of the resume size limit for the text parts and
/// multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request size limits.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
  pub max_upload_bytes: u64,
}

impl Default for Limits {
  fn default() -> Self { Self { max_upload_bytes: 5 * 1024 * 1024 } }
}

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:  Arc<S>,
  pub auth:   Arc<AuthConfig>,
  pub limits: Limits,
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let body_limit = state.limits.max_upload_bytes as usize + MULTIPART_OVERHEAD;

  Router::new()
    // Contact submissions
    .route(
      "/contact",
      get(records::list::<S, ContactSubmission>).post(contact::create::<S>),
    )
    .route(
      "/contact/{id}",
      patch(records::update::<S, ContactSubmission>)
        .delete(records::delete::<S, ContactSubmission>),
    )
    // Career applications
    .route(
      "/career",
      get(records::list::<S, CareerApplication>).post(career::create::<S>),
    )
    .route(
      "/career/{id}",
      patch(records::update::<S, CareerApplication>)
        .delete(records::delete::<S, CareerApplication>),
    )
    .route("/career/{id}/resume", get(career::resume::<S>))
    // Subscribers
    .route("/subscribers", get(subscribers::list::<S>))
    .route("/subscribers/{id}", delete(records::delete::<S, Subscriber>))
    .route("/subscribe", post(subscribers::subscribe::<S>))
    .layer(DefaultBodyLimit::max(body_limit))
    .with_state(state)
}

#[cfg(test)]
mod tests;
