use atrium_core::{
  CareerApplication, ContactSubmission, Identifiable, Record, StatusSet, Subscriber,
};
use chrono::{DateTime, Utc};

/// A PDF column: header text and relative width.
#[derive(Debug, Clone, Copy)]
pub struct Column {
  pub header: &'static str,
  pub width:  u16,
}

const fn col(header: &'static str, width: u16) -> Column { Column { header, width } }

/// How a record kind flattens into export rows.
pub trait Exportable: Record {
  const PDF_COLUMNS: &'static [Column];
  const SHEET_HEADERS: &'static [&'static str];

  fn pdf_row(&self) -> Vec<String>;
  fn sheet_row(&self) -> Vec<String>;
}

fn day(at: DateTime<Utc>) -> String { at.format("%Y-%m-%d").to_string() }

fn stamp(at: DateTime<Utc>) -> String { at.format("%Y-%m-%d %H:%M:%S UTC").to_string() }

fn opt(value: &Option<String>) -> String { value.clone().unwrap_or_default() }

impl Exportable for ContactSubmission {
  const PDF_COLUMNS: &'static [Column] = &[
    col("Name", 16),
    col("Email", 22),
    col("Phone", 12),
    col("Company", 14),
    col("Subject", 22),
    col("Status", 8),
    col("Date", 10),
  ];
  const SHEET_HEADERS: &'static [&'static str] = &[
    "ID", "Name", "Email", "Phone", "Company", "Subject", "Message", "Status",
    "Submitted At",
  ];

  fn pdf_row(&self) -> Vec<String> {
    vec![
      self.name.clone(),
      self.email.clone(),
      opt(&self.phone),
      opt(&self.company),
      self.subject.clone(),
      self.status().as_str().to_owned(),
      day(self.created_at),
    ]
  }

  fn sheet_row(&self) -> Vec<String> {
    vec![
      self.id.clone(),
      self.name.clone(),
      self.email.clone(),
      opt(&self.phone),
      opt(&self.company),
      self.subject.clone(),
      self.message.clone(),
      self.status().as_str().to_owned(),
      stamp(self.created_at),
    ]
  }
}

impl Exportable for CareerApplication {
  const PDF_COLUMNS: &'static [Column] = &[
    col("Name", 16),
    col("Email", 22),
    col("Phone", 12),
    col("Position", 18),
    col("Experience", 12),
    col("Status", 10),
    col("Applied", 10),
  ];
  const SHEET_HEADERS: &'static [&'static str] = &[
    "ID", "Name", "Email", "Phone", "Position", "Experience", "Cover Letter", "Resume",
    "Status", "Applied At",
  ];

  fn pdf_row(&self) -> Vec<String> {
    vec![
      self.name.clone(),
      self.email.clone(),
      opt(&self.phone),
      self.position.clone(),
      opt(&self.experience),
      self.status().as_str().to_owned(),
      day(self.created_at),
    ]
  }

  fn sheet_row(&self) -> Vec<String> {
    vec![
      self.id.clone(),
      self.name.clone(),
      self.email.clone(),
      opt(&self.phone),
      self.position.clone(),
      opt(&self.experience),
      opt(&self.cover_letter),
      self.resume.as_ref().map(|r| r.file_name.clone()).unwrap_or_default(),
      self.status().as_str().to_owned(),
      stamp(self.created_at),
    ]
  }
}

impl Exportable for Subscriber {
  const PDF_COLUMNS: &'static [Column] =
    &[col("Email", 50), col("Status", 20), col("Subscribed On", 20)];
  const SHEET_HEADERS: &'static [&'static str] = &["ID", "Email", "Status", "Subscribed At"];

  fn pdf_row(&self) -> Vec<String> {
    vec![self.email.clone(), self.status().as_str().to_owned(), day(self.created_at)]
  }

  fn sheet_row(&self) -> Vec<String> {
    vec![
      self.id.clone(),
      self.email.clone(),
      self.status().as_str().to_owned(),
      stamp(self.created_at),
    ]
  }
}
