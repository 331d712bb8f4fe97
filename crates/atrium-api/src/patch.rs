//! Partial updates for `PATCH /{collection}/{id}`.
//!
//! The body is a JSON object carrying `status` and/or any editable field.
//! It is overlaid onto the stored record; backend-owned keys are ignored.

use atrium_core::{EditableFields, Record};
use serde_json::Value;

use crate::error::ApiError;

/// Keys a client may send but which never change through a patch.
pub const BACKEND_OWNED: &[&str] = &["id", "_id", "createdAt", "resume"];

/// Overlay `patch` onto `current`, then normalise and validate the editable
/// fields of the result.
pub fn apply<R: Record>(current: &R, patch: Value) -> Result<R, ApiError> {
  let Value::Object(patch) = patch else {
    return Err(ApiError::BadRequest("patch body must be a JSON object".into()));
  };

  let mut merged = serde_json::to_value(current).map_err(ApiError::store)?;
  let Some(target) = merged.as_object_mut() else {
    return Err(ApiError::BadRequest("record is not a JSON object".into()));
  };

  for (key, value) in patch {
    if BACKEND_OWNED.contains(&key.as_str()) {
      continue;
    }
    let editable = key == "status"
      || <R::Fields as EditableFields>::SPECS.iter().any(|s| s.name == key);
    if !editable {
      return Err(ApiError::BadRequest(format!("unknown field {key:?}")));
    }
    target.insert(key, value);
  }

  let mut updated: R = serde_json::from_value(merged)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let fields = updated.fields().normalized();
  fields.validate()?;
  updated.merge_fields(fields);
  Ok(updated)
}

#[cfg(test)]
mod tests {
  use super::*;
  use atrium_core::{ContactFields, ContactStatus, ContactSubmission};
  use chrono::Utc;
  use serde_json::json;

  fn record() -> ContactSubmission {
    ContactFields {
      name:    "Ada".into(),
      email:   "ada@example.com".into(),
      phone:   Some("+44 20 7946 0000".into()),
      company: None,
      subject: "Hello".into(),
      message: "Hi there".into(),
    }
    .into_record("c1".into(), Utc::now())
  }

  #[test]
  fn status_only_patch_changes_only_status() {
    let before = record();
    let after = apply(&before, json!({ "status": "archived" })).unwrap();
    assert_eq!(after.status, ContactStatus::Archived);
    assert_eq!(after.fields(), before.fields());
  }

  #[test]
  fn backend_owned_keys_are_ignored() {
    let before = record();
    let after = apply(
      &before,
      json!({ "id": "other", "createdAt": "2000-01-01T00:00:00Z", "subject": " New " }),
    )
    .unwrap();
    assert_eq!(after.id, "c1");
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.subject, "New");
  }

  #[test]
  fn null_clears_optional_field() {
    let after = apply(&record(), json!({ "phone": null })).unwrap();
    assert_eq!(after.phone, None);
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(matches!(
      apply(&record(), json!({ "status": "deleted" })),
      Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
      apply(&record(), json!({ "email": "not-an-email" })),
      Err(ApiError::Validation(e)) if e.get("email").is_some()
    ));
    assert!(matches!(
      apply(&record(), json!({ "favouriteColour": "blue" })),
      Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(apply(&record(), json!([1, 2])), Err(ApiError::BadRequest(_))));
  }
}
