//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  any::AnyRecord,
  kind::RecordKind,
  record::{EditableFields, FieldSpec, Identifiable, Record},
  status::SubscriberStatus,
  validate::{self, FieldErrors},
};

/// An e-mail address signed up for the newsletter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
  #[serde(alias = "_id")]
  pub id:         String,
  pub email:      String,
  #[serde(default)]
  pub status:     SubscriberStatus,
  pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/subscribe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriberFields {
  pub email: String,
}

impl SubscriberFields {
  pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> Subscriber {
    Subscriber {
      id,
      email: self.email,
      status: SubscriberStatus::default(),
      created_at,
    }
  }
}

impl EditableFields for SubscriberFields {
  const SPECS: &'static [FieldSpec] = &[FieldSpec {
    name:      "email",
    label:     "Email",
    required:  true,
    multiline: false,
  }];

  fn get(&self, name: &str) -> Option<String> {
    (name == "email").then(|| self.email.clone())
  }

  fn set(&mut self, name: &str, value: String) -> bool {
    if name != "email" {
      return false;
    }
    self.email = value;
    true
  }

  fn normalized(self) -> Self {
    Self { email: self.email.trim().to_ascii_lowercase() }
  }

  fn validate(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validate::email(&mut errors, "email", &self.email);
    errors.into_result()
  }
}

impl Identifiable for Subscriber {
  type Status = SubscriberStatus;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn status(&self) -> SubscriberStatus { self.status }
}

impl Record for Subscriber {
  type Fields = SubscriberFields;

  const KIND: RecordKind = RecordKind::Subscriber;

  fn set_status(&mut self, status: SubscriberStatus) { self.status = status; }

  fn search_fields(&self) -> Vec<&str> { vec![self.email.as_str()] }

  fn fields(&self) -> SubscriberFields {
    SubscriberFields { email: self.email.clone() }
  }

  fn merge_fields(&mut self, fields: SubscriberFields) { self.email = fields.email; }

  fn into_any(self) -> AnyRecord { AnyRecord::Subscriber(self) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalising_lowercases_email() {
    let f = SubscriberFields { email: "  Ada@Example.COM ".into() }.normalized();
    assert_eq!(f.email, "ada@example.com");
    assert!(f.validate().is_ok());
  }
}
