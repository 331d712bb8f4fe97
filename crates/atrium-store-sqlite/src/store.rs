//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use atrium_core::{
  CareerApplication, Record, RecordKind, ResumeMeta, StatusSet, Subscriber, SubscriberStatus,
  store::{RecordStore, StoredResume, Subscription},
};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use crate::{
  Error, Result,
  encode::{RawRecord, decode_payload, encode_kind},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Atrium record store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn payloads(&self, kind: RecordKind) -> Result<Vec<String>> {
    let kind_str = encode_kind(kind);
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT payload FROM records
           WHERE kind = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![kind_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── Statements ──────────────────────────────────────────────────────────────

/// Returns `false` when a record with the same kind and id already exists.
fn insert_raw(conn: &rusqlite::Connection, raw: &RawRecord) -> rusqlite::Result<bool> {
  let n = conn.execute(
    "INSERT OR IGNORE INTO records (id, kind, status, created_at, payload)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    rusqlite::params![raw.id, raw.kind, raw.status, raw.created_at, raw.payload],
  )?;
  Ok(n > 0)
}

fn write_resume(
  conn: &rusqlite::Connection,
  application_id: &str,
  meta: &ResumeMeta,
  bytes: &[u8],
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT OR REPLACE INTO resumes
       (application_id, file_name, content_type, size, content_hash, data)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      application_id,
      meta.file_name,
      meta.content_type,
      meta.size as i64,
      meta.content_hash,
      bytes,
    ],
  )?;
  Ok(())
}

/// Outcome of the subscribe transaction, before payload decoding.
enum Claim {
  Inserted,
  Reactivated(String),
  Active,
  IdTaken,
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn insert<R: Record>(&self, record: R) -> Result<R> {
    let raw = RawRecord::encode(&record)?;
    let id = raw.id.clone();

    let inserted = self
      .conn
      .call(move |conn| Ok(insert_raw(conn, &raw)?))
      .await?;

    if !inserted {
      return Err(Error::DuplicateId { kind: R::KIND, id });
    }
    tracing::debug!(kind = %R::KIND, %id, "record inserted");
    Ok(record)
  }

  async fn list<R: Record>(&self) -> Result<Vec<R>> {
    self
      .payloads(R::KIND)
      .await?
      .iter()
      .map(|p| decode_payload(p))
      .collect()
  }

  async fn get<R: Record>(&self, id: String) -> Result<Option<R>> {
    let kind_str = encode_kind(R::KIND);
    let payload: Option<String> = self
      .conn
      .call(move |conn| {
        let p = conn
          .query_row(
            "SELECT payload FROM records WHERE kind = ?1 AND id = ?2",
            rusqlite::params![kind_str, id],
            |r| r.get(0),
          )
          .optional()?;
        Ok(p)
      })
      .await?;

    payload.as_deref().map(decode_payload).transpose()
  }

  async fn replace<R: Record>(&self, record: R) -> Result<bool> {
    let raw = RawRecord::encode(&record)?;
    let updated = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE records SET status = ?3, payload = ?4
           WHERE kind = ?1 AND id = ?2",
          rusqlite::params![raw.kind, raw.id, raw.status, raw.payload],
        )?;
        Ok(n)
      })
      .await?;
    Ok(updated > 0)
  }

  async fn delete(&self, kind: RecordKind, id: String) -> Result<bool> {
    let kind_str = encode_kind(kind);
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM records WHERE kind = ?1 AND id = ?2",
          rusqlite::params![kind_str, id],
        )?;
        if n > 0 && kind == RecordKind::Career {
          tx.execute(
            "DELETE FROM resumes WHERE application_id = ?1",
            rusqlite::params![id],
          )?;
        }
        tx.commit()?;
        Ok(n)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn find_by_email<R: Record>(&self, email: String) -> Result<Option<R>> {
    let kind_str = encode_kind(R::KIND);
    let payload: Option<String> = self
      .conn
      .call(move |conn| {
        let p = conn
          .query_row(
            "SELECT payload FROM records
             WHERE kind = ?1
               AND lower(json_extract(payload, '$.email')) = lower(?2)
             ORDER BY created_at DESC
             LIMIT 1",
            rusqlite::params![kind_str, email],
            |r| r.get(0),
          )
          .optional()?;
        Ok(p)
      })
      .await?;

    payload.as_deref().map(decode_payload).transpose()
  }

  async fn subscribe(&self, candidate: Subscriber) -> Result<Subscription> {
    let raw = RawRecord::encode(&candidate)?;
    let email = candidate.email.clone();
    let active = SubscriberStatus::Active.as_str();

    let claim = self
      .conn
      .call(move |conn| {
        // Write lock held from the lookup through the insert.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: Option<(String, String)> = tx
          .query_row(
            "SELECT id, status FROM records
             WHERE kind = ?1
               AND lower(json_extract(payload, '$.email')) = lower(?2)
             ORDER BY created_at DESC
             LIMIT 1",
            rusqlite::params![raw.kind, email],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;

        let claim = match existing {
          Some((_, status)) if status == active => Claim::Active,
          Some((id, _)) => {
            tx.execute(
              "UPDATE records
               SET status = ?3, payload = json_set(payload, '$.status', ?3)
               WHERE kind = ?1 AND id = ?2",
              rusqlite::params![raw.kind, id, active],
            )?;
            let payload: String = tx.query_row(
              "SELECT payload FROM records WHERE kind = ?1 AND id = ?2",
              rusqlite::params![raw.kind, id],
              |r| r.get(0),
            )?;
            Claim::Reactivated(payload)
          }
          None if insert_raw(&tx, &raw)? => Claim::Inserted,
          None => Claim::IdTaken,
        };
        tx.commit()?;
        Ok(claim)
      })
      .await?;

    Ok(match claim {
      Claim::Inserted => {
        tracing::debug!(id = %candidate.id, "subscriber inserted");
        Subscription::Created(candidate)
      }
      Claim::Reactivated(payload) => Subscription::Reactivated(decode_payload(&payload)?),
      Claim::Active => Subscription::AlreadyActive,
      Claim::IdTaken => {
        return Err(Error::DuplicateId { kind: RecordKind::Subscriber, id: candidate.id });
      }
    })
  }

  async fn insert_application(
    &self,
    record: CareerApplication,
    resume: StoredResume,
  ) -> Result<CareerApplication> {
    let raw = RawRecord::encode(&record)?;
    let id = raw.id.clone();
    let StoredResume { meta, bytes } = resume;

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !insert_raw(&tx, &raw)? {
          return Ok(false);
        }
        write_resume(&tx, &raw.id, &meta, &bytes)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateId { kind: RecordKind::Career, id });
    }
    tracing::debug!(%id, "career application inserted with resume");
    Ok(record)
  }

  async fn put_resume(&self, application_id: String, resume: StoredResume) -> Result<()> {
    let career = encode_kind(RecordKind::Career);
    let id = application_id.clone();
    let StoredResume { meta, bytes } = resume;

    let attached = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM records WHERE kind = ?1 AND id = ?2",
            rusqlite::params![career, id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(false);
        }

        write_resume(conn, &id, &meta, &bytes)?;
        Ok(true)
      })
      .await?;

    if !attached {
      return Err(Error::ApplicationNotFound(application_id));
    }
    Ok(())
  }

  async fn get_resume(&self, application_id: String) -> Result<Option<StoredResume>> {
    let resume = self
      .conn
      .call(move |conn| {
        let r = conn
          .query_row(
            "SELECT file_name, content_type, size, content_hash, data
             FROM resumes WHERE application_id = ?1",
            rusqlite::params![application_id],
            |row| {
              Ok(StoredResume {
                meta:  ResumeMeta {
                  file_name:    row.get(0)?,
                  content_type: row.get(1)?,
                  size:         row.get::<_, i64>(2)? as u64,
                  content_hash: row.get(3)?,
                },
                bytes: row.get(4)?,
              })
            },
          )
          .optional()?;
        Ok(r)
      })
      .await?;
    Ok(resume)
  }
}
