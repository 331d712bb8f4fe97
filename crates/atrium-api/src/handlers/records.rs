//! Admin handlers shared by every record kind.

use atrium_core::{Envelope, Record, store::RecordStore};
use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{AppState, auth::Authenticated, error::ApiError, patch};

/// `GET /{collection}`: every record of kind `R`, newest first.
pub async fn list<S, R>(
  _: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Envelope<Vec<R>>>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
  R: Record,
{
  let records = state.store.list::<R>().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::ok(records)))
}

/// `PATCH /{collection}/{id}`: partial update; returns the stored record.
pub async fn update<S, R>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<R>>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
  R: Record,
{
  let Json(body) = body?;

  let current: R = state
    .store
    .get(id.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found::<R>(&id))?;

  let updated = patch::apply(&current, body)?;

  let replaced = state
    .store
    .replace(updated.clone())
    .await
    .map_err(ApiError::store)?;
  if !replaced {
    return Err(not_found::<R>(&id));
  }

  tracing::info!(kind = %R::KIND, %id, "record updated");
  Ok(Json(Envelope::ok(updated).with_message("Record updated")))
}

/// `DELETE /{collection}/{id}`: permanent removal.
pub async fn delete<S, R>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
  R: Record,
{
  let deleted = state
    .store
    .delete(R::KIND, id.clone())
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(not_found::<R>(&id));
  }

  tracing::info!(kind = %R::KIND, %id, "record deleted");
  Ok(Json(Envelope::done("Record deleted")))
}

fn not_found<R: Record>(id: &str) -> ApiError {
  ApiError::NotFound(format!("{} {id} not found", R::KIND))
}
