//! Error types for `atrium-core`.

use thiserror::Error;

use crate::{kind::RecordKind, validate::FieldErrors};

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] FieldErrors),

  /// The backend answered with `success: false`.
  #[error("{message}")]
  Rejected {
    message: String,
    errors:  FieldErrors,
  },

  #[error("unknown {kind} status: {value:?}")]
  UnknownStatus { kind: RecordKind, value: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
