use atrium_core::{FieldErrors, RecordKind};

/// Result alias for client calls.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("could not reach server: {0}")]
  Http(#[from] reqwest::Error),

  /// The server answered with `success: false` or a non-2xx status.
  /// Displays the server's message, or the status line if it sent none.
  #[error("{message}")]
  Api {
    status:  u16,
    message: String,
    errors:  FieldErrors,
  },

  #[error("unexpected response body: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("{kind} records cannot be updated")]
  Unsupported { kind: RecordKind },

  #[error("response from {path} carried no data")]
  MissingData { path: String },
}

impl Error {
  /// HTTP status of an API rejection.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Api { status, .. } => Some(*status),
      _ => None,
    }
  }
}
