//! Mutations a table sends to its backend, and their confirmed outcomes.

use atrium_core::{Record, RecordKind};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::backend::RecordBackend;

/// A mutation of one record.
#[derive(Debug, Clone)]
pub enum Command<R: Record> {
  UpdateStatus { id: String, status: R::Status },
  UpdateFields { id: String, fields: R::Fields },
  Delete { id: String },
}

/// A backend-confirmed change, ready to merge into local state.
#[derive(Debug, Clone, PartialEq)]
pub enum Patched<R: Record> {
  Status { id: String, status: R::Status },
  Fields { id: String, fields: R::Fields },
  Removed { id: String },
}

impl<R: Record> Patched<R> {
  pub fn id(&self) -> &str {
    match self {
      Self::Status { id, .. } | Self::Fields { id, .. } | Self::Removed { id } => id,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
  /// The table was unmounted while the request was in flight.
  #[error("request cancelled")]
  Cancelled,
  #[error("{kind} records cannot be updated")]
  Unsupported { kind: RecordKind },
  #[error("{0}")]
  Backend(String),
}

impl<R: Record> Command<R> {
  pub fn id(&self) -> &str {
    match self {
      Self::UpdateStatus { id, .. } | Self::UpdateFields { id, .. } | Self::Delete { id } => id,
    }
  }

  fn is_update(&self) -> bool { !matches!(self, Self::Delete { .. }) }

  /// Send the command to `backend`.
  ///
  /// A response arriving after `cancel` fired is discarded as
  /// [`GatewayError::Cancelled`], whatever the backend said.
  pub async fn execute<B>(
    self,
    backend: &B,
    cancel: &CancellationToken,
  ) -> Result<Patched<R>, GatewayError>
  where
    B: RecordBackend<R>,
  {
    if self.is_update() && !R::KIND.supports_update() {
      return Err(GatewayError::Unsupported { kind: R::KIND });
    }
    if cancel.is_cancelled() {
      return Err(GatewayError::Cancelled);
    }

    let outcome = match self {
      Self::UpdateStatus { id, status } => backend
        .update_status(id.clone(), status)
        .await
        .map(|_| Patched::Status { id, status }),
      Self::UpdateFields { id, fields } => backend
        .update_fields(id.clone(), fields.clone())
        .await
        .map(|echoed| Patched::Fields {
          id,
          fields: echoed.map_or(fields, |r| r.fields()),
        }),
      Self::Delete { id } => {
        backend.delete(id.clone()).await.map(|()| Patched::Removed { id })
      }
    };

    if cancel.is_cancelled() {
      debug!(kind = %R::KIND, "dropping response for unmounted table");
      return Err(GatewayError::Cancelled);
    }
    outcome.map_err(|e| GatewayError::Backend(e.to_string()))
  }
}
