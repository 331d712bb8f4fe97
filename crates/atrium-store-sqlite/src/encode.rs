//! Encoding and decoding helpers between record types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; payloads as compact JSON.

use atrium_core::{Record, RecordKind, StatusSet};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::Result;

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Fixed-width (microsecond, `Z`-suffixed) so that string order is time order.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─── RecordKind ───────────────────────────────────────────────────────────────

pub fn encode_kind(kind: RecordKind) -> String { kind.to_string() }

// ─── Records ──────────────────────────────────────────────────────────────────

/// Column values for one `records` row, ready for binding.
pub struct RawRecord {
  pub id:         String,
  pub kind:       String,
  pub status:     String,
  pub created_at: String,
  pub payload:    String,
}

impl RawRecord {
  pub fn encode<R: Record>(record: &R) -> Result<Self> {
    Ok(Self {
      id:         record.id().to_owned(),
      kind:       encode_kind(R::KIND),
      status:     record.status().as_str().to_owned(),
      created_at: encode_dt(record.created_at()),
      payload:    serde_json::to_string(record)?,
    })
  }
}

pub fn decode_payload<R: Record>(payload: &str) -> Result<R> {
  Ok(serde_json::from_str(payload)?)
}
