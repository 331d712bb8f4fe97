//! Application state and key dispatch.
//!
//! Each tab wraps one [`TableController`]; all record state lives there. This
//! module only tracks what the terminal adds on top: the active tab, the row
//! cursor, search typing and the focused edit field.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use atrium_client::ApiClient;
use atrium_core::{
  CareerApplication, ContactSubmission, EditableFields, Record, RecordKind, Subscriber,
};
use atrium_table::{
  Action, Modal, Notice, TableController, TableState,
  export::{ExportFormat, Exportable},
};
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ─── Tabs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
  Contacts,
  Careers,
  Subscribers,
}

impl Tab {
  pub const ALL: [Tab; 3] = [Tab::Contacts, Tab::Careers, Tab::Subscribers];

  pub fn kind(self) -> RecordKind {
    match self {
      Tab::Contacts => RecordKind::Contact,
      Tab::Careers => RecordKind::Career,
      Tab::Subscribers => RecordKind::Subscriber,
    }
  }

  fn next(self) -> Tab {
    match self {
      Tab::Contacts => Tab::Careers,
      Tab::Careers => Tab::Subscribers,
      Tab::Subscribers => Tab::Contacts,
    }
  }
}

/// What a key press asks of the app beyond the table itself.
pub enum Outcome {
  Continue,
  Quit,
  DownloadResume(String),
}

// ─── TableView ────────────────────────────────────────────────────────────────

/// One tab: a table plus terminal-only cursor state.
pub struct TableView<R: Record> {
  pub table:      TableController<R, ApiClient>,
  /// Row cursor within the current page.
  pub cursor:     usize,
  /// Whether keys go to the search input.
  pub searching:  bool,
  /// Focused field of the edit form, as an index into the field specs.
  pub edit_field: usize,
}

impl<R: Exportable> TableView<R> {
  fn new(client: Arc<ApiClient>) -> Self {
    Self { table: TableController::new(client), cursor: 0, searching: false, edit_field: 0 }
  }

  pub fn state(&self) -> &TableState<R> { self.table.state() }

  /// The record under the cursor.
  pub fn selected(&self) -> Option<&R> {
    self.state().current_page().items.get(self.cursor).copied()
  }

  fn selected_id(&self) -> Option<String> { self.selected().map(|r| r.id().to_owned()) }

  /// Whether this view consumes every key, including tab switching.
  pub fn captures_input(&self) -> bool {
    self.searching || !matches!(self.state().modal, Modal::None)
  }

  fn dispatch(&mut self, action: Action<R>) {
    self.table.dispatch(action);
    self.clamp_cursor();
  }

  fn clamp_cursor(&mut self) {
    let len = self.state().current_page().items.len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  fn notify(&mut self, notice: Notice) { self.dispatch(Action::Notify(notice)); }

  async fn handle_key(&mut self, key: KeyEvent, out_dir: &Path) -> Outcome {
    let (confirming, editing) = match self.state().modal {
      Modal::ConfirmDelete { .. } => (true, false),
      Modal::Edit { .. } => (false, true),
      Modal::None => (false, false),
    };

    if confirming {
      self.confirm_key(key).await;
    } else if editing {
      self.edit_key(key).await;
    } else if self.searching {
      self.search_key(key);
    } else {
      return self.normal_key(key, out_dir).await;
    }
    Outcome::Continue
  }

  async fn confirm_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        self.table.confirm_delete().await;
        self.clamp_cursor();
      }
      KeyCode::Char('n') | KeyCode::Esc => self.dispatch(Action::CloseModal),
      _ => {}
    }
  }

  fn search_key(&mut self, key: KeyEvent) {
    let mut query = self.state().query.clone();
    match key.code {
      KeyCode::Esc => {
        self.searching = false;
        query.clear();
      }
      KeyCode::Enter => {
        self.searching = false;
        return;
      }
      KeyCode::Backspace => {
        query.pop();
      }
      KeyCode::Char(c) => query.push(c),
      _ => return,
    }
    self.cursor = 0;
    self.dispatch(Action::SetQuery(query));
  }

  async fn edit_key(&mut self, key: KeyEvent) {
    let specs = <R::Fields as EditableFields>::SPECS;
    let Some(spec) = specs.get(self.edit_field) else {
      self.edit_field = 0;
      return;
    };
    let Modal::Edit { draft, .. } = &self.state().modal else {
      return;
    };
    let mut value = draft.get(spec.name).unwrap_or_default();
    let submit = key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      _ if submit => {
        self.table.submit_edit().await;
        self.clamp_cursor();
        return;
      }
      KeyCode::Esc => {
        self.dispatch(Action::CloseModal);
        return;
      }
      KeyCode::Tab | KeyCode::Down => {
        self.edit_field = (self.edit_field + 1) % specs.len();
        return;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.edit_field = (self.edit_field + specs.len() - 1) % specs.len();
        return;
      }
      KeyCode::Enter if spec.multiline => value.push('\n'),
      KeyCode::Enter => {
        self.table.submit_edit().await;
        self.clamp_cursor();
        return;
      }
      KeyCode::Backspace => {
        value.pop();
      }
      KeyCode::Char(c) => value.push(c),
      _ => return,
    }
    self.dispatch(Action::EditField { name: spec.name.to_owned(), value });
  }

  async fn normal_key(&mut self, key: KeyEvent, out_dir: &Path) -> Outcome {
    match key.code {
      KeyCode::Char('q') => return Outcome::Quit,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.state().current_page().items.len();
        if self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Right | KeyCode::Char('n') => {
        self.cursor = 0;
        self.dispatch(Action::NextPage);
      }
      KeyCode::Left | KeyCode::Char('p') => {
        self.cursor = 0;
        self.dispatch(Action::PrevPage);
      }

      KeyCode::Char('/') => self.searching = true,
      KeyCode::Char('f') => {
        let next = self.state().status_filter.cycle();
        self.cursor = 0;
        self.dispatch(Action::SetStatusFilter(next));
      }

      KeyCode::Char('s') => {
        if let Some(id) = self.selected_id() {
          self.table.cycle_status(&id).await;
          self.clamp_cursor();
        }
      }
      KeyCode::Char('e') => {
        if let Some(id) = self.selected_id() {
          self.edit_field = 0;
          self.dispatch(Action::OpenEdit(id));
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.selected_id() {
          self.dispatch(Action::RequestDelete(id));
        }
      }

      KeyCode::Char('x') => self.export(ExportFormat::Xlsx, out_dir),
      KeyCode::Char('P') => self.export(ExportFormat::Pdf, out_dir),
      KeyCode::Char('R') if R::KIND == RecordKind::Career => {
        if let Some(id) = self.selected_id() {
          return Outcome::DownloadResume(id);
        }
      }

      KeyCode::Char('r') => {
        self.table.retry().await;
        self.clamp_cursor();
      }
      KeyCode::Esc => self.dispatch(Action::DismissNotice),
      _ => {}
    }
    Outcome::Continue
  }

  fn export(&mut self, format: ExportFormat, out_dir: &Path) {
    let notice = match self.table.export(format) {
      Ok(file) => {
        let path = out_dir.join(&file.file_name);
        match std::fs::write(&path, &file.bytes) {
          Ok(()) => Notice::success(
            format!("Exported {} records to {}", file.rows, path.display()),
            Utc::now(),
          ),
          Err(e) => Notice::error(format!("Could not write {}: {e}", path.display()), Utc::now()),
        }
      }
      Err(e) => Notice::error(e.to_string(), Utc::now()),
    };
    self.notify(notice);
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub tab:         Tab,
  pub contacts:    TableView<ContactSubmission>,
  pub careers:     TableView<CareerApplication>,
  pub subscribers: TableView<Subscriber>,
  pub client:      Arc<ApiClient>,
  /// Where exports and resumes are written.
  pub out_dir:     PathBuf,
}

impl App {
  pub fn new(client: ApiClient, out_dir: PathBuf) -> Self {
    let client = Arc::new(client);
    Self {
      tab: Tab::Contacts,
      contacts: TableView::new(client.clone()),
      careers: TableView::new(client.clone()),
      subscribers: TableView::new(client.clone()),
      client,
      out_dir,
    }
  }

  /// Load the active tab if it has not been loaded yet.
  pub async fn mount_current(&mut self) {
    match self.tab {
      Tab::Contacts => self.contacts.table.mount().await,
      Tab::Careers => self.careers.table.mount().await,
      Tab::Subscribers => self.subscribers.table.mount().await,
    }
  }

  /// Expire stale notices on every tab.
  pub fn tick(&mut self, now: DateTime<Utc>) {
    self.contacts.dispatch(Action::ExpireNotice { now });
    self.careers.dispatch(Action::ExpireNotice { now });
    self.subscribers.dispatch(Action::ExpireNotice { now });
  }

  fn captures_input(&self) -> bool {
    match self.tab {
      Tab::Contacts => self.contacts.captures_input(),
      Tab::Careers => self.careers.captures_input(),
      Tab::Subscribers => self.subscribers.captures_input(),
    }
  }

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if key.code == KeyCode::Tab && !self.captures_input() {
      self.tab = self.tab.next();
      self.mount_current().await;
      return Ok(true);
    }

    let outcome = match self.tab {
      Tab::Contacts => self.contacts.handle_key(key, &self.out_dir).await,
      Tab::Careers => self.careers.handle_key(key, &self.out_dir).await,
      Tab::Subscribers => self.subscribers.handle_key(key, &self.out_dir).await,
    };

    match outcome {
      Outcome::Continue => Ok(true),
      Outcome::Quit => Ok(false),
      Outcome::DownloadResume(id) => {
        self.download_resume(&id).await;
        Ok(true)
      }
    }
  }

  async fn download_resume(&mut self, id: &str) {
    let notice = match self.client.download_resume(id).await {
      Ok(resume) => {
        let path = self.out_dir.join(&resume.file_name);
        match std::fs::write(&path, &resume.bytes) {
          Ok(()) => Notice::success(format!("Saved resume to {}", path.display()), Utc::now()),
          Err(e) => Notice::error(format!("Could not write {}: {e}", path.display()), Utc::now()),
        }
      }
      Err(e) => {
        tracing::warn!(%id, error = %e, "resume download failed");
        Notice::error(e.to_string(), Utc::now())
      }
    };
    self.careers.notify(notice);
  }

  /// Cancel in-flight work on every tab.
  pub fn unmount(&self) {
    self.contacts.table.unmount();
    self.careers.table.unmount();
    self.subscribers.table.unmount();
  }
}
