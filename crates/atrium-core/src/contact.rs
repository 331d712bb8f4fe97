//! Contact-form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  any::AnyRecord,
  kind::RecordKind,
  record::{EditableFields, FieldSpec, Identifiable, Record},
  status::ContactStatus,
  validate::{self, FieldErrors, non_empty},
};

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
  #[serde(alias = "_id")]
  pub id:         String,
  pub name:       String,
  pub email:      String,
  #[serde(default)]
  pub phone:      Option<String>,
  #[serde(default)]
  pub company:    Option<String>,
  pub subject:    String,
  pub message:    String,
  #[serde(default)]
  pub status:     ContactStatus,
  pub created_at: DateTime<Utc>,
}

/// Editable fields of a [`ContactSubmission`]; also the body of
/// `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
  pub name:    String,
  pub email:   String,
  #[serde(default)]
  pub phone:   Option<String>,
  #[serde(default)]
  pub company: Option<String>,
  pub subject: String,
  pub message: String,
}

impl ContactFields {
  /// Build a stored record with the default status.
  pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> ContactSubmission {
    ContactSubmission {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      company: self.company,
      subject: self.subject,
      message: self.message,
      status: ContactStatus::default(),
      created_at,
    }
  }
}

impl EditableFields for ContactFields {
  const SPECS: &'static [FieldSpec] = &[
    FieldSpec { name: "name",    label: "Name",    required: true,  multiline: false },
    FieldSpec { name: "email",   label: "Email",   required: true,  multiline: false },
    FieldSpec { name: "phone",   label: "Phone",   required: false, multiline: false },
    FieldSpec { name: "company", label: "Company", required: false, multiline: false },
    FieldSpec { name: "subject", label: "Subject", required: true,  multiline: false },
    FieldSpec { name: "message", label: "Message", required: true,  multiline: true },
  ];

  fn get(&self, name: &str) -> Option<String> {
    Some(match name {
      "name" => self.name.clone(),
      "email" => self.email.clone(),
      "phone" => self.phone.clone().unwrap_or_default(),
      "company" => self.company.clone().unwrap_or_default(),
      "subject" => self.subject.clone(),
      "message" => self.message.clone(),
      _ => return None,
    })
  }

  fn set(&mut self, name: &str, value: String) -> bool {
    match name {
      "name" => self.name = value,
      "email" => self.email = value,
      "phone" => self.phone = non_empty(Some(value)),
      "company" => self.company = non_empty(Some(value)),
      "subject" => self.subject = value,
      "message" => self.message = value,
      _ => return false,
    }
    true
  }

  fn normalized(self) -> Self {
    Self {
      name:    self.name.trim().to_owned(),
      email:   self.email.trim().to_owned(),
      phone:   non_empty(self.phone),
      company: non_empty(self.company),
      subject: self.subject.trim().to_owned(),
      message: self.message.trim().to_owned(),
    }
  }

  fn validate(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validate::required(&mut errors, "name", &self.name, 100);
    validate::email(&mut errors, "email", &self.email);
    validate::phone(&mut errors, "phone", self.phone.as_deref());
    validate::optional(&mut errors, "company", self.company.as_deref(), 100);
    validate::required(&mut errors, "subject", &self.subject, 200);
    validate::required(&mut errors, "message", &self.message, 5000);
    errors.into_result()
  }
}

impl Identifiable for ContactSubmission {
  type Status = ContactStatus;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn status(&self) -> ContactStatus { self.status }
}

impl Record for ContactSubmission {
  type Fields = ContactFields;

  const KIND: RecordKind = RecordKind::Contact;

  fn set_status(&mut self, status: ContactStatus) { self.status = status; }

  fn search_fields(&self) -> Vec<&str> {
    let mut fields = vec![self.name.as_str(), self.email.as_str(), self.subject.as_str()];
    fields.extend(self.company.as_deref());
    fields.extend(self.phone.as_deref());
    fields
  }

  fn fields(&self) -> ContactFields {
    ContactFields {
      name:    self.name.clone(),
      email:   self.email.clone(),
      phone:   self.phone.clone(),
      company: self.company.clone(),
      subject: self.subject.clone(),
      message: self.message.clone(),
    }
  }

  fn merge_fields(&mut self, fields: ContactFields) {
    self.name = fields.name;
    self.email = fields.email;
    self.phone = fields.phone;
    self.company = fields.company;
    self.subject = fields.subject;
    self.message = fields.message;
  }

  fn into_any(self) -> AnyRecord { AnyRecord::Contact(self) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields() -> ContactFields {
    ContactFields {
      name:    "Ada Lovelace".into(),
      email:   "ada@example.com".into(),
      phone:   None,
      company: Some("Analytical Engines".into()),
      subject: "Website rebuild".into(),
      message: "We need a new site.".into(),
    }
  }

  #[test]
  fn valid_fields_pass() {
    assert!(fields().validate().is_ok());
  }

  #[test]
  fn missing_and_malformed_fields_are_reported_per_field() {
    let mut f = fields();
    f.name = " ".into();
    f.email = "ada-at-example".into();
    let errors = f.validate().unwrap_err();
    assert_eq!(errors.get("name"), Some("is required"));
    assert_eq!(errors.get("email"), Some("must be a valid email address"));
    assert_eq!(errors.len(), 2);
  }

  #[test]
  fn empty_optional_input_clears_field() {
    let mut f = fields();
    assert!(f.set("company", "   ".into()));
    assert_eq!(f.company, None);
    assert_eq!(f.get("company").as_deref(), Some(""));
    assert!(!f.set("id", "nope".into()));
  }

  #[test]
  fn deserialises_camel_case_with_legacy_id() {
    let json = serde_json::json!({
      "_id": "abc",
      "name": "Ada",
      "email": "ada@example.com",
      "subject": "Hi",
      "message": "Hello",
      "status": "replied",
      "createdAt": "2024-03-01T10:00:00Z"
    });
    let c: ContactSubmission = serde_json::from_value(json).unwrap();
    assert_eq!(c.id, "abc");
    assert_eq!(c.status, ContactStatus::Replied);
    assert_eq!(c.phone, None);
  }

  #[test]
  fn search_fields_skip_unset_optionals() {
    let c = fields().into_record("1".into(), Utc::now());
    assert_eq!(
      c.search_fields(),
      vec!["Ada Lovelace", "ada@example.com", "Website rebuild", "Analytical Engines"]
    );
  }
}
