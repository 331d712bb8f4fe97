//! The pure transition function of a table.

use atrium_core::{EditableFields, FieldErrors, Record};
use chrono::{DateTime, Utc};

use crate::{
  command::Patched,
  filter::StatusFilter,
  state::{LoadState, Modal, Notice, TableState},
};

/// Everything that can happen to a table.
#[derive(Debug, Clone)]
pub enum Action<R: Record> {
  LoadStarted,
  Loaded(Vec<R>),
  LoadFailed(String),

  SetQuery(String),
  SetStatusFilter(StatusFilter<R::Status>),
  GoToPage(usize),
  NextPage,
  PrevPage,

  RequestDelete(String),
  OpenEdit(String),
  EditField { name: String, value: String },
  EditRejected(FieldErrors),
  CloseModal,

  /// The backend confirmed a mutation.
  Applied { patch: Patched<R>, at: DateTime<Utc> },
  /// The backend refused or failed a mutation.
  MutationFailed { message: String, at: DateTime<Utc> },

  /// Show a notice raised outside the table, e.g. by an export.
  Notify(Notice),
  ExpireNotice { now: DateTime<Utc> },
  DismissNotice,
}

/// Apply `action` to `state`.
pub fn reduce<R: Record>(mut state: TableState<R>, action: Action<R>) -> TableState<R> {
  match action {
    Action::LoadStarted => state.load = LoadState::Loading,
    Action::Loaded(records) => {
      state.records = records;
      state.load = LoadState::Ready;
      state.page = 1;
    }
    Action::LoadFailed(message) => state.load = LoadState::Failed(message),

    Action::SetQuery(query) => {
      state.query = query;
      state.page = 1;
    }
    Action::SetStatusFilter(filter) => {
      state.status_filter = filter;
      state.page = 1;
    }
    Action::GoToPage(page) => {
      state.page = page.clamp(1, state.total_pages().max(1));
    }
    Action::NextPage => {
      if state.page < state.total_pages() {
        state.page += 1;
      }
    }
    Action::PrevPage => {
      if state.page > 1 {
        state.page -= 1;
      }
    }

    Action::RequestDelete(id) => state.modal = Modal::ConfirmDelete { id },
    Action::OpenEdit(id) => {
      if let Some(record) = state.find(&id) {
        let draft = record.fields();
        state.modal = Modal::Edit { id, draft, errors: FieldErrors::new() };
      }
    }
    Action::EditField { name, value } => {
      if let Modal::Edit { draft, errors, .. } = &mut state.modal {
        if draft.set(&name, value) {
          errors.remove(&name);
        }
      }
    }
    Action::EditRejected(rejected) => {
      if let Modal::Edit { errors, .. } = &mut state.modal {
        *errors = rejected;
      }
    }
    Action::CloseModal => state.modal = Modal::None,

    Action::Applied { patch, at } => {
      let message = apply_patch(&mut state, patch);
      state.notice = Some(Notice::success(message, at));
      clamp_page(&mut state);
    }
    Action::MutationFailed { message, at } => {
      state.notice = Some(Notice::error(message, at));
    }

    Action::Notify(notice) => state.notice = Some(notice),
    Action::ExpireNotice { now } => {
      if state.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
        state.notice = None;
      }
    }
    Action::DismissNotice => state.notice = None,
  }
  state
}

fn apply_patch<R: Record>(state: &mut TableState<R>, patch: Patched<R>) -> &'static str {
  match patch {
    Patched::Status { id, status } => {
      if let Some(record) = state.find_mut(&id) {
        record.set_status(status);
      }
      "Status updated"
    }
    Patched::Fields { id, fields } => {
      if let Some(record) = state.find_mut(&id) {
        record.merge_fields(fields);
      }
      if matches!(&state.modal, Modal::Edit { id: open, .. } if *open == id) {
        state.modal = Modal::None;
      }
      "Record updated"
    }
    Patched::Removed { id } => {
      state.records.retain(|r| r.id() != id);
      if matches!(&state.modal, Modal::ConfirmDelete { id: open } if *open == id) {
        state.modal = Modal::None;
      }
      "Record deleted"
    }
  }
}

/// Back to page 1 once the current page runs past the visible records.
fn clamp_page<R: Record>(state: &mut TableState<R>) {
  if state.page > state.total_pages().max(1) {
    state.page = 1;
  }
}

#[cfg(test)]
mod tests;
