//! Career applications and their resume attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  any::AnyRecord,
  kind::RecordKind,
  record::{EditableFields, FieldSpec, Identifiable, Record},
  status::CareerStatus,
  validate::{self, FieldErrors, non_empty},
};

/// Content types accepted for resume uploads.
pub const RESUME_CONTENT_TYPES: &[&str] = &[
  "application/pdf",
  "application/msword",
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Metadata of a stored resume. Owned by the backend; never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeMeta {
  pub file_name:    String,
  pub content_type: String,
  pub size:         u64,
  /// SHA-256 hex digest of the file contents.
  pub content_hash: String,
}

/// A job application submitted through the careers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
  #[serde(alias = "_id")]
  pub id:           String,
  pub name:         String,
  pub email:        String,
  #[serde(default)]
  pub phone:        Option<String>,
  pub position:     String,
  #[serde(default)]
  pub experience:   Option<String>,
  #[serde(default)]
  pub cover_letter: Option<String>,
  #[serde(default)]
  pub resume:       Option<ResumeMeta>,
  #[serde(default)]
  pub status:       CareerStatus,
  pub created_at:   DateTime<Utc>,
}

/// Editable fields of a [`CareerApplication`]; also the text part of the
/// multipart `POST /api/career` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerFields {
  pub name:         String,
  pub email:        String,
  #[serde(default)]
  pub phone:        Option<String>,
  pub position:     String,
  #[serde(default)]
  pub experience:   Option<String>,
  #[serde(default)]
  pub cover_letter: Option<String>,
}

impl CareerFields {
  /// Build a stored record with the default status and no attachment.
  pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> CareerApplication {
    CareerApplication {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      position: self.position,
      experience: self.experience,
      cover_letter: self.cover_letter,
      resume: None,
      status: CareerStatus::default(),
      created_at,
    }
  }
}

/// Check an uploaded resume against the accepted content types and the size
/// limit, recording failures under the `resume` field.
pub fn validate_resume(
  errors: &mut FieldErrors,
  content_type: &str,
  size: u64,
  max_bytes: u64,
) {
  if !RESUME_CONTENT_TYPES.contains(&content_type) {
    errors.insert("resume", "must be a PDF or Word document");
  } else if size == 0 {
    errors.insert("resume", "is empty");
  } else if size > max_bytes {
    errors.insert("resume", format!("must be at most {max_bytes} bytes"));
  }
}

impl EditableFields for CareerFields {
  const SPECS: &'static [FieldSpec] = &[
    FieldSpec { name: "name",        label: "Name",         required: true,  multiline: false },
    FieldSpec { name: "email",       label: "Email",        required: true,  multiline: false },
    FieldSpec { name: "phone",       label: "Phone",        required: false, multiline: false },
    FieldSpec { name: "position",    label: "Position",     required: true,  multiline: false },
    FieldSpec { name: "experience",  label: "Experience",   required: false, multiline: false },
    FieldSpec { name: "coverLetter", label: "Cover letter", required: false, multiline: true },
  ];

  fn get(&self, name: &str) -> Option<String> {
    Some(match name {
      "name" => self.name.clone(),
      "email" => self.email.clone(),
      "phone" => self.phone.clone().unwrap_or_default(),
      "position" => self.position.clone(),
      "experience" => self.experience.clone().unwrap_or_default(),
      "coverLetter" => self.cover_letter.clone().unwrap_or_default(),
      _ => return None,
    })
  }

  fn set(&mut self, name: &str, value: String) -> bool {
    match name {
      "name" => self.name = value,
      "email" => self.email = value,
      "phone" => self.phone = non_empty(Some(value)),
      "position" => self.position = value,
      "experience" => self.experience = non_empty(Some(value)),
      "coverLetter" => self.cover_letter = non_empty(Some(value)),
      _ => return false,
    }
    true
  }

  fn normalized(self) -> Self {
    Self {
      name:         self.name.trim().to_owned(),
      email:        self.email.trim().to_owned(),
      phone:        non_empty(self.phone),
      position:     self.position.trim().to_owned(),
      experience:   non_empty(self.experience),
      cover_letter: non_empty(self.cover_letter),
    }
  }

  fn validate(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    validate::required(&mut errors, "name", &self.name, 100);
    validate::email(&mut errors, "email", &self.email);
    validate::phone(&mut errors, "phone", self.phone.as_deref());
    validate::required(&mut errors, "position", &self.position, 100);
    validate::optional(&mut errors, "experience", self.experience.as_deref(), 100);
    validate::optional(&mut errors, "coverLetter", self.cover_letter.as_deref(), 5000);
    errors.into_result()
  }
}

impl Identifiable for CareerApplication {
  type Status = CareerStatus;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn status(&self) -> CareerStatus { self.status }
}

impl Record for CareerApplication {
  type Fields = CareerFields;

  const KIND: RecordKind = RecordKind::Career;

  fn set_status(&mut self, status: CareerStatus) { self.status = status; }

  fn search_fields(&self) -> Vec<&str> {
    let mut fields = vec![self.name.as_str(), self.email.as_str(), self.position.as_str()];
    fields.extend(self.phone.as_deref());
    fields
  }

  fn fields(&self) -> CareerFields {
    CareerFields {
      name:         self.name.clone(),
      email:        self.email.clone(),
      phone:        self.phone.clone(),
      position:     self.position.clone(),
      experience:   self.experience.clone(),
      cover_letter: self.cover_letter.clone(),
    }
  }

  fn merge_fields(&mut self, fields: CareerFields) {
    self.name = fields.name;
    self.email = fields.email;
    self.phone = fields.phone;
    self.position = fields.position;
    self.experience = fields.experience;
    self.cover_letter = fields.cover_letter;
  }

  fn into_any(self) -> AnyRecord { AnyRecord::Career(self) }
}
