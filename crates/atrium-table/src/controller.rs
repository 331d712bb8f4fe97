//! Drives one [`TableState`] against a [`RecordBackend`].

use std::sync::Arc;

use atrium_core::{EditableFields, Record, StatusSet};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
  backend::RecordBackend,
  command::{Command, GatewayError},
  export::{self, ExportError, ExportFormat, Exportable, ExportedFile},
  reducer::{Action, reduce},
  state::{LoadState, Modal, TableState},
};

/// One admin table: state, backend, and a cancellation scope that ends when
/// the table is unmounted or dropped.
pub struct TableController<R: Record, B> {
  state:   TableState<R>,
  backend: Arc<B>,
  cancel:  CancellationToken,
  mounted: bool,
}

impl<R: Record, B: RecordBackend<R>> TableController<R, B> {
  pub fn new(backend: Arc<B>) -> Self {
    Self {
      state: TableState::new(),
      backend,
      cancel: CancellationToken::new(),
      mounted: false,
    }
  }

  pub fn state(&self) -> &TableState<R> { &self.state }

  /// Token cancelled by [`unmount`](Self::unmount).
  pub fn cancellation(&self) -> CancellationToken { self.cancel.clone() }

  pub fn dispatch(&mut self, action: Action<R>) {
    let state = std::mem::take(&mut self.state);
    self.state = reduce(state, action);
  }

  /// Fetch the records. Only the first call does anything.
  pub async fn mount(&mut self) {
    if self.mounted {
      return;
    }
    self.mounted = true;
    self.fetch().await;
  }

  /// Fetch again after a failed load.
  pub async fn retry(&mut self) {
    if matches!(self.state.load, LoadState::Failed(_)) {
      self.fetch().await;
    }
  }

  async fn fetch(&mut self) {
    self.dispatch(Action::LoadStarted);
    let result = self.backend.list().await;
    if self.cancel.is_cancelled() {
      debug!(kind = %R::KIND, "discarding list response for unmounted table");
      return;
    }
    match result {
      Ok(records) => {
        info!(kind = %R::KIND, count = records.len(), "loaded records");
        self.dispatch(Action::Loaded(records));
      }
      Err(e) => {
        warn!(kind = %R::KIND, error = %e, "failed to load records");
        self.dispatch(Action::LoadFailed(e.to_string()));
      }
    }
  }

  /// Execute `command` and fold the outcome into state.
  pub async fn run(&mut self, command: Command<R>) {
    let id = command.id().to_owned();
    match command.execute(&*self.backend, &self.cancel).await {
      Ok(patch) => {
        debug!(kind = %R::KIND, %id, "mutation applied");
        self.dispatch(Action::Applied { patch, at: Utc::now() });
      }
      Err(GatewayError::Cancelled) => {}
      Err(e) => {
        warn!(kind = %R::KIND, %id, error = %e, "mutation failed");
        self.dispatch(Action::MutationFailed { message: e.to_string(), at: Utc::now() });
      }
    }
  }

  /// Move `id` to the next status in its set.
  pub async fn cycle_status(&mut self, id: &str) {
    let Some(status) = self.state.find(id).map(|r| r.status().cycle()) else {
      return;
    };
    self.run(Command::UpdateStatus { id: id.to_owned(), status }).await;
  }

  /// Delete the record named by an open confirmation.
  pub async fn confirm_delete(&mut self) {
    let Modal::ConfirmDelete { id } = &self.state.modal else {
      return;
    };
    let id = id.clone();
    self.dispatch(Action::CloseModal);
    self.run(Command::Delete { id }).await;
  }

  /// Validate the open edit draft and send it. Invalid drafts stay open with
  /// per-field errors and never reach the backend.
  pub async fn submit_edit(&mut self) {
    let Modal::Edit { id, draft, .. } = &self.state.modal else {
      return;
    };
    let id = id.clone();
    let fields = draft.clone().normalized();
    if let Err(errors) = fields.validate() {
      self.dispatch(Action::EditRejected(errors));
      return;
    }
    self.run(Command::UpdateFields { id, fields }).await;
  }

  /// Render every currently visible record, across all pages.
  pub fn export(&self, format: ExportFormat) -> Result<ExportedFile, ExportError>
  where
    R: Exportable,
  {
    export::export(&self.state.visible(), format, Utc::now())
  }

  /// Cancel in-flight requests. Later responses are dropped.
  pub fn unmount(&self) { self.cancel.cancel(); }
}

impl<R: Record, B> Drop for TableController<R, B> {
  fn drop(&mut self) { self.cancel.cancel(); }
}
