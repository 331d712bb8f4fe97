//! The seam between a table and whatever serves its records.

use std::future::Future;

use atrium_core::Record;

/// Remote operations a table needs for records of kind `R`.
///
/// Mirrors [`atrium_core::store::RecordStore`] for a single kind.
pub trait RecordBackend<R: Record>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every record of the kind, as the backend orders them.
  fn list(&self) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Set only the status. Returns the updated record if the backend echoes
  /// one.
  fn update_status(
    &self,
    id: String,
    status: R::Status,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Replace the editable fields.
  fn update_fields(
    &self,
    id: String,
    fields: R::Fields,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  fn delete(&self, id: String) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
