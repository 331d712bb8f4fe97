//! The three kinds of admin-manageable records.

use serde::{Deserialize, Serialize};

/// Which collection a record belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecordKind {
  Contact,
  Career,
  Subscriber,
}

impl RecordKind {
  /// Collection path relative to the `/api` prefix.
  pub fn collection_path(self) -> &'static str {
    match self {
      Self::Contact => "/contact",
      Self::Career => "/career",
      Self::Subscriber => "/subscribers",
    }
  }

  /// Whether the backend accepts `PATCH` on records of this kind.
  pub fn supports_update(self) -> bool { !matches!(self, Self::Subscriber) }

  /// Whether `GET <collection>` wraps its payload in an [`Envelope`].
  /// The subscribers endpoint returns a bare array.
  ///
  /// [`Envelope`]: crate::envelope::Envelope
  pub fn enveloped_list(self) -> bool { !matches!(self, Self::Subscriber) }

  /// Human-readable plural title, used for tabs and export headings.
  pub fn title(self) -> &'static str {
    match self {
      Self::Contact => "Contact Submissions",
      Self::Career => "Career Applications",
      Self::Subscriber => "Subscribers",
    }
  }

  /// File stem for exported documents.
  pub fn export_stem(self) -> &'static str {
    match self {
      Self::Contact => "contact_submissions",
      Self::Career => "career-applications",
      Self::Subscriber => "subscribers",
    }
  }
}
