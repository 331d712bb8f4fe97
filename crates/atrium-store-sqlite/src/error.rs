//! Error type for `atrium-store-sqlite`.

use atrium_core::RecordKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("{kind} record already exists: {id}")]
  DuplicateId { kind: RecordKind, id: String },

  /// A resume was attached to an id that is not a career application.
  #[error("career application not found: {0}")]
  ApplicationNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
