//! Newsletter endpoints.

use atrium_core::{
  EditableFields, Envelope, Subscriber, SubscriberFields,
  store::{RecordStore, Subscription},
};
use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
};
use chrono::Utc;

use crate::{AppState, auth::Authenticated, error::ApiError, handlers::new_id};

/// `GET /subscribers`: a bare JSON array, not an envelope.
pub async fn list<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Subscriber>>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let subscribers = state.store.list::<Subscriber>().await.map_err(ApiError::store)?;
  Ok(Json(subscribers))
}

/// `POST /subscribe`: body: `{"email":"..."}`.
///
/// A new address returns 201. An unsubscribed address is reactivated (200);
/// an active one is a 409.
pub async fn subscribe<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<SubscriberFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Subscriber>>), ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let Json(fields) = body?;
  let fields = fields.normalized();
  fields.validate()?;

  let candidate = fields.into_record(new_id(), Utc::now());
  match state.store.subscribe(candidate).await.map_err(ApiError::store)? {
    Subscription::AlreadyActive => Err(ApiError::Conflict("Email is already subscribed".into())),
    Subscription::Reactivated(s) => {
      tracing::info!(id = %s.id, "subscriber reactivated");
      Ok((StatusCode::OK, Json(Envelope::ok(s).with_message("Welcome back!"))))
    }
    Subscription::Created(s) => {
      tracing::info!(id = %s.id, "new subscriber");
      Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(s).with_message("Subscribed successfully.")),
      ))
    }
  }
}
