//! The `RecordStore` trait implemented by storage backends.
//!
//! The API layer depends on this abstraction, not on any concrete backend.
//! Record payloads are generic over [`Record`]; one store holds all three
//! kinds.

use std::future::Future;

use crate::{
  career::{CareerApplication, ResumeMeta},
  kind::RecordKind,
  record::Record,
  subscriber::Subscriber,
};

/// A resume file together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
  pub meta:  ResumeMeta,
  pub bytes: Vec<u8>,
}

/// What [`RecordStore::subscribe`] did with an address.
#[derive(Debug, Clone, PartialEq)]
pub enum Subscription {
  Created(Subscriber),
  /// An unsubscribed record for the address was switched back to active.
  Reactivated(Subscriber),
  AlreadyActive,
}

/// Abstraction over an Atrium record store backend.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record. Fails if the id is already taken.
  fn insert<R: Record>(
    &self,
    record: R,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// All records of kind `R`, newest first.
  fn list<R: Record>(
    &self,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get<R: Record>(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Overwrite the stored payload of an existing record.
  /// Returns `false` if no record of that kind has the record's id.
  fn replace<R: Record>(
    &self,
    record: R,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Permanently remove a record (and any attachment).
  /// Returns `false` if nothing was deleted.
  fn delete(
    &self,
    kind: RecordKind,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Find a record of kind `R` whose `email` equals `email`
  /// case-insensitively.
  fn find_by_email<R: Record>(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Sign up `candidate.email` as one atomic step. An unsubscribed record
  /// with the same address (case-insensitive) is reactivated in place, an
  /// active one is left alone, otherwise `candidate` is inserted.
  fn subscribe(
    &self,
    candidate: Subscriber,
  ) -> impl Future<Output = Result<Subscription, Self::Error>> + Send + '_;

  /// Persist a new career application together with its resume. Either both
  /// are stored or neither is.
  fn insert_application(
    &self,
    record: CareerApplication,
    resume: StoredResume,
  ) -> impl Future<Output = Result<CareerApplication, Self::Error>> + Send + '_;

  /// Attach (or replace) the resume of a career application.
  fn put_resume(
    &self,
    application_id: String,
    resume: StoredResume,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_resume(
    &self,
    application_id: String,
  ) -> impl Future<Output = Result<Option<StoredResume>, Self::Error>> + Send + '_;
}
