//! [`AnyRecord`]: a record of any kind, for kind-agnostic presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  career::CareerApplication,
  contact::ContactSubmission,
  kind::RecordKind,
  record::{Identifiable, Record},
  status::StatusSet,
  subscriber::Subscriber,
};

/// Tagged union over the three record kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum AnyRecord {
  Contact(ContactSubmission),
  Career(CareerApplication),
  Subscriber(Subscriber),
}

impl AnyRecord {
  pub fn kind(&self) -> RecordKind {
    match self {
      Self::Contact(_) => RecordKind::Contact,
      Self::Career(_) => RecordKind::Career,
      Self::Subscriber(_) => RecordKind::Subscriber,
    }
  }

  pub fn id(&self) -> &str {
    match self {
      Self::Contact(r) => r.id(),
      Self::Career(r) => r.id(),
      Self::Subscriber(r) => r.id(),
    }
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    match self {
      Self::Contact(r) => r.created_at(),
      Self::Career(r) => r.created_at(),
      Self::Subscriber(r) => r.created_at(),
    }
  }

  /// Wire name of the current status.
  pub fn status_str(&self) -> &'static str {
    match self {
      Self::Contact(r) => r.status().as_str(),
      Self::Career(r) => r.status().as_str(),
      Self::Subscriber(r) => r.status().as_str(),
    }
  }

  pub fn search_fields(&self) -> Vec<&str> {
    match self {
      Self::Contact(r) => r.search_fields(),
      Self::Career(r) => r.search_fields(),
      Self::Subscriber(r) => r.search_fields(),
    }
  }
}
