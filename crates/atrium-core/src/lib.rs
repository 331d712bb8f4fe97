//! Core types and trait definitions for the Atrium admin back office.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod any;
pub mod career;
pub mod contact;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod record;
pub mod status;
pub mod store;
pub mod subscriber;
pub mod validate;

pub use any::AnyRecord;
pub use career::{CareerApplication, CareerFields, ResumeMeta};
pub use contact::{ContactFields, ContactSubmission};
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use kind::RecordKind;
pub use record::{EditableFields, FieldSpec, Identifiable, Record};
pub use status::{CareerStatus, ContactStatus, StatusSet, SubscriberStatus};
pub use subscriber::{Subscriber, SubscriberFields};
pub use validate::FieldErrors;
