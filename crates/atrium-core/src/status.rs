//! Status sets: one closed enumeration per record kind.
//!
//! Transitions are unconstrained: any status may follow any other.

use std::{fmt, hash::Hash, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::IntoEnumIterator;

use crate::{Error, Result, kind::RecordKind};

/// Behaviour shared by every status enumeration.
pub trait StatusSet:
  Copy
  + Eq
  + Hash
  + fmt::Debug
  + fmt::Display
  + Default
  + FromStr
  + Serialize
  + DeserializeOwned
  + IntoEnumIterator
  + Send
  + Sync
  + 'static
{
  /// The wire name of this status, e.g. `"archived"`.
  fn as_str(&self) -> &'static str;

  /// Every member in declaration order.
  fn all() -> Vec<Self> { Self::iter().collect() }

  /// The member after `self` in declaration order, wrapping around.
  fn cycle(self) -> Self {
    let all = Self::all();
    let pos = all.iter().position(|s| *s == self).unwrap_or(0);
    all[(pos + 1) % all.len()]
  }
}

/// Parse a status name for records of `kind`.
pub fn parse_status<S: StatusSet>(kind: RecordKind, value: &str) -> Result<S> {
  value
    .trim()
    .to_ascii_lowercase()
    .parse::<S>()
    .map_err(|_| Error::UnknownStatus { kind, value: value.to_owned() })
}

macro_rules! status_set {
  ($name:ident) => {
    impl StatusSet for $name {
      fn as_str(&self) -> &'static str { (*self).into() }
    }
  };
}

/// Status of a contact-form submission.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
  #[default]
  New,
  Read,
  Replied,
  Archived,
}

/// Status of a job application.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CareerStatus {
  #[default]
  Pending,
  Reviewed,
  Shortlisted,
  Rejected,
  Hired,
}

/// Status of a newsletter subscription.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscriberStatus {
  #[default]
  Active,
  Unsubscribed,
}

status_set!(ContactStatus);
status_set!(CareerStatus);
status_set!(SubscriberStatus);
