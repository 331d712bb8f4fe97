//! The per-table state a [`reduce`](crate::reduce) call transforms.

use atrium_core::{FieldErrors, Record};
use chrono::{DateTime, TimeDelta, Utc};

use crate::{
  filter::{StatusFilter, filter_records},
  paginate::{PAGE_SIZE, Page, page_count, paginate},
};

/// Seconds a notice stays up before it expires.
pub const NOTICE_TTL_SECS: i64 = 5;

/// Where the initial fetch of a table stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
  /// Not mounted yet.
  #[default]
  Idle,
  Loading,
  Ready,
  /// The fetch failed with this message. Recoverable via retry.
  Failed(String),
}

/// The single modal a table may show.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<R: Record> {
  None,
  ConfirmDelete {
    id: String,
  },
  Edit {
    id:     String,
    draft:  R::Fields,
    errors: FieldErrors,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  Success,
  Error,
}

/// A transient message shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level:     NoticeLevel,
  pub message:   String,
  pub raised_at: DateTime<Utc>,
}

impl Notice {
  pub fn success(message: impl Into<String>, at: DateTime<Utc>) -> Self {
    Self { level: NoticeLevel::Success, message: message.into(), raised_at: at }
  }

  pub fn error(message: impl Into<String>, at: DateTime<Utc>) -> Self {
    Self { level: NoticeLevel::Error, message: message.into(), raised_at: at }
  }

  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now - self.raised_at >= TimeDelta::seconds(NOTICE_TTL_SECS)
  }
}

/// Everything a table of `R` records shows.
#[derive(Debug, Clone)]
pub struct TableState<R: Record> {
  pub load:          LoadState,
  /// Every record returned by the backend, in backend order.
  pub records:       Vec<R>,
  pub query:         String,
  pub status_filter: StatusFilter<R::Status>,
  /// Current 1-based page.
  pub page:          usize,
  pub modal:         Modal<R>,
  pub notice:        Option<Notice>,
}

impl<R: Record> Default for TableState<R> {
  fn default() -> Self {
    Self {
      load:          LoadState::Idle,
      records:       Vec::new(),
      query:         String::new(),
      status_filter: StatusFilter::All,
      page:          1,
      modal:         Modal::None,
      notice:        None,
    }
  }
}

impl<R: Record> TableState<R> {
  pub fn new() -> Self { Self::default() }

  /// Records passing the current query and status filter.
  pub fn visible(&self) -> Vec<&R> {
    filter_records(&self.records, &self.query, self.status_filter)
  }

  pub fn total_pages(&self) -> usize { page_count(self.visible().len(), PAGE_SIZE) }

  /// The slice of visible records on the current page.
  pub fn current_page(&self) -> Page<&R> {
    paginate(&self.visible(), self.page, PAGE_SIZE)
  }

  pub fn find(&self, id: &str) -> Option<&R> {
    self.records.iter().find(|r| r.id() == id)
  }

  pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut R> {
    self.records.iter_mut().find(|r| r.id() == id)
  }
}
