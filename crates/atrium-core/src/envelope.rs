//! The `{ success, data?, message?, errors? }` response wrapper.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, validate::FieldErrors};

/// JSON wrapper used by every endpoint except `GET /api/subscribers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  /// Per-field validation messages; only present on validation failures.
  #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
  pub errors:  FieldErrors,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self { success: true, data: Some(data), message: None, errors: FieldErrors::new() }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data:    None,
      message: Some(message.into()),
      errors:  FieldErrors::new(),
    }
  }

  pub fn with_errors(mut self, errors: FieldErrors) -> Self {
    self.errors = errors;
    self
  }

  /// Unwrap into the payload, turning `success: false` into
  /// [`Error::Rejected`] carrying the server's message.
  pub fn into_result(self) -> Result<Option<T>> {
    if self.success {
      Ok(self.data)
    } else {
      Err(Error::Rejected {
        message: self.message.unwrap_or_else(|| "request failed".to_owned()),
        errors:  self.errors,
      })
    }
  }
}

impl Envelope<()> {
  /// A success envelope without payload.
  pub fn done(message: impl Into<String>) -> Self {
    Self {
      success: true,
      data:    None,
      message: Some(message.into()),
      errors:  FieldErrors::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ContactSubmission, Subscriber, SubscriberStatus};

  #[test]
  fn failure_becomes_rejected_with_message() {
    let env: Envelope<u32> =
      serde_json::from_str(r#"{"success":false,"message":"Not found"}"#).unwrap();
    let err = env.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Not found");
  }

  #[test]
  fn failure_without_message_gets_generic_text() {
    let env: Envelope<u32> = serde_json::from_str(r#"{"success":false}"#).unwrap();
    assert_eq!(env.into_result().unwrap_err().to_string(), "request failed");
  }

  #[test]
  fn success_without_data_is_none() {
    let env: Envelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert_eq!(env.into_result().unwrap(), None);
  }

  #[test]
  fn decodes_a_record_payload() {
    let env: Envelope<Subscriber> = serde_json::from_str(
      r#"{"success":true,"data":{"_id":"s1","email":"ada@example.com","status":"active","createdAt":"2024-01-01T00:00:00Z"}}"#,
    )
    .unwrap();
    let sub = env.into_result().unwrap().unwrap();
    assert_eq!(sub.id, "s1");
    assert_eq!(sub.status, SubscriberStatus::Active);
  }

  #[test]
  fn record_failure_without_data_decodes() {
    let env: Envelope<ContactSubmission> = serde_json::from_str(
      r#"{"success":false,"message":"Please correct the highlighted fields","errors":{"email":"is required"}}"#,
    )
    .unwrap();
    assert_eq!(env.data, None);
    assert_eq!(env.errors.get("email"), Some("is required"));
  }

  #[test]
  fn empty_errors_are_not_serialised() {
    let json = serde_json::to_value(Envelope::ok(3)).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true, "data": 3 }));
  }
}
