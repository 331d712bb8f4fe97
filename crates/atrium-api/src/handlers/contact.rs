//! Public contact-form endpoint.

use atrium_core::{ContactFields, ContactSubmission, EditableFields, Envelope, store::RecordStore};
use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
};
use chrono::Utc;

use crate::{AppState, error::ApiError, handlers::new_id};

/// `POST /contact`: body: [`ContactFields`]; returns 201 + the stored record.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<ContactFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<ContactSubmission>>), ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let Json(fields) = body?;
  let fields = fields.normalized();
  fields.validate()?;

  let record = state
    .store
    .insert(fields.into_record(new_id(), Utc::now()))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = %record.id, "contact submission received");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(record).with_message("Thank you! We will get back to you shortly.")),
  ))
}
