//! The capability traits shared by every record kind.
//!
//! [`Identifiable`] is the minimal capability (id, timestamp, status) that the
//! table, filter, paginator and exporter are written against. [`Record`] adds
//! search fields and the editable field set.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
  any::AnyRecord, kind::RecordKind, status::StatusSet, validate::FieldErrors,
};

/// Identity, creation time and status.
pub trait Identifiable {
  type Status: StatusSet;

  /// Opaque backend-assigned identifier.
  fn id(&self) -> &str;

  /// Immutable creation time.
  fn created_at(&self) -> DateTime<Utc>;

  fn status(&self) -> Self::Status;
}

/// Describes one editable field for forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  /// Wire name, as used in JSON bodies and [`FieldErrors`].
  pub name:      &'static str,
  pub label:     &'static str,
  pub required:  bool,
  pub multiline: bool,
}

/// The set of fields an admin may edit on a record, excluding identity,
/// timestamp, status and backend-owned metadata.
pub trait EditableFields:
  Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Field descriptions in form order.
  const SPECS: &'static [FieldSpec];

  /// Current value of `name` as a string (`""` for an unset optional field).
  /// `None` if `name` is not a field of this set.
  fn get(&self, name: &str) -> Option<String>;

  /// Set `name` from form input. Empty input clears optional fields.
  /// Returns `false` if `name` is not a field of this set.
  fn set(&mut self, name: &str, value: String) -> bool;

  /// Trim strings and drop empty optionals.
  fn normalized(self) -> Self;

  fn validate(&self) -> Result<(), FieldErrors>;
}

/// A record kind usable by the generic admin table.
pub trait Record:
  Identifiable + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
  type Fields: EditableFields;

  const KIND: RecordKind;

  fn set_status(&mut self, status: Self::Status);

  /// Values matched by free-text search, in a fixed per-kind order.
  /// Unset optional fields are omitted.
  fn search_fields(&self) -> Vec<&str>;

  fn fields(&self) -> Self::Fields;

  fn merge_fields(&mut self, fields: Self::Fields);

  fn into_any(self) -> AnyRecord;
}
