//! Field validation shared by the public forms, the edit modal and the API.
//!
//! Every check records a message under the field's wire name; callers turn
//! a non-empty [`FieldErrors`] into an inline per-field display or a 400
//! response.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Per-field validation messages keyed by wire name (e.g. `"email"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  /// Record `message` for `field`. The first message for a field wins.
  pub fn insert(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_owned()).or_insert_with(|| message.into());
  }

  pub fn remove(&mut self, field: &str) { self.0.remove(field); }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// `Ok(())` when no field failed.
  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> =
      self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    f.write_str(&parts.join("; "))
  }
}

impl std::error::Error for FieldErrors {}

// ─── Checks ───────────────────────────────────────────────────────────────────

/// A required free-text field with an upper length bound (in characters).
pub fn required(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
  if value.trim().is_empty() {
    errors.insert(field, "is required");
  } else {
    max_length(errors, field, value, max_len);
  }
}

/// An optional free-text field; only the length bound applies.
pub fn optional(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) {
  if let Some(v) = value {
    max_length(errors, field, v, max_len);
  }
}

fn max_length(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
  if value.chars().count() > max_len {
    errors.insert(field, format!("must be at most {max_len} characters"));
  }
}

/// A required e-mail address.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
  if value.trim().is_empty() {
    errors.insert(field, "is required");
  } else if !is_email(value.trim()) {
    errors.insert(field, "must be a valid email address");
  } else {
    max_length(errors, field, value, 254);
  }
}

/// An optional telephone number.
pub fn phone(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
  let Some(v) = value else { return };
  if !is_phone(v) {
    errors.insert(field, "must be a valid phone number");
  }
}

/// Shape check: `local@domain.tld`, no whitespace, no empty labels.
pub fn is_email(s: &str) -> bool {
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && !s.chars().any(char::is_whitespace)
    && domain.split('.').count() >= 2
    && domain.split('.').all(|label| !label.is_empty())
}

/// Digits plus common separators, 7 to 15 digits in total.
pub fn is_phone(s: &str) -> bool {
  let allowed = |c: char| c.is_ascii_digit() || " +-().".contains(c);
  let digits = s.chars().filter(char::is_ascii_digit).count();
  s.chars().all(allowed) && (7..=15).contains(&digits)
}

/// Trim a string, mapping the empty result to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_shapes() {
    assert!(is_email("ada@example.com"));
    assert!(is_email("first.last+tag@sub.example.co"));
    assert!(!is_email("ada@example"));
    assert!(!is_email("ada@@example.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("ada @example.com"));
    assert!(!is_email("ada@example..com"));
  }

  #[test]
  fn phone_shapes() {
    assert!(is_phone("+1 (555) 010-2030"));
    assert!(!is_phone("12345"));
    assert!(!is_phone("call me"));
  }

  #[test]
  fn first_message_per_field_wins() {
    let mut errors = FieldErrors::new();
    required(&mut errors, "name", "  ", 10);
    required(&mut errors, "name", "way too long for ten", 10);
    assert_eq!(errors.get("name"), Some("is required"));
    assert_eq!(errors.len(), 1);
  }

  #[test]
  fn display_lists_every_field() {
    let mut errors = FieldErrors::new();
    email(&mut errors, "email", "nope");
    required(&mut errors, "message", "", 100);
    assert_eq!(
      errors.to_string(),
      "email: must be a valid email address; message: is required"
    );
  }

  #[test]
  fn serialises_as_plain_map() {
    let mut errors = FieldErrors::new();
    errors.insert("email", "is required");
    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "is required" }));
  }
}
