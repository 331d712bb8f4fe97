//! Async HTTP client for the Atrium REST API.
//!
//! [`ApiClient`] covers both the admin endpoints, generically over
//! [`Record`], and the public submission endpoints. It also implements
//! [`atrium_table::RecordBackend`] so admin tables can run directly on it.

mod backend;
pub mod error;

use std::time::Duration;

use atrium_core::{
  CareerApplication, CareerFields, ContactFields, ContactSubmission, EditableFields, Envelope,
  FieldErrors, Record, RecordKind, Subscriber, SubscriberFields,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode, header, multipart};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

pub use error::{Error, Result};

/// Connection settings for the Atrium API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// A resume file to attach to a career application.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
  pub file_name:    String,
  pub content_type: String,
  pub bytes:        Vec<u8>,
}

/// A downloaded resume.
#[derive(Debug, Clone)]
pub struct DownloadedResume {
  /// Always `resume-<id>.pdf`.
  pub file_name:    String,
  pub content_type: Option<String>,
  pub bytes:        Vec<u8>,
}

/// Async HTTP client for the Atrium JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `GET /api/<collection>`
  pub async fn list_records<R: Record>(&self) -> Result<Vec<R>> {
    let path = R::KIND.collection_path();
    let resp = self.auth(self.client.get(self.url(path))).send().await?;
    if R::KIND.enveloped_list() {
      data(path, resp).await
    } else {
      let bytes = checked(resp).await?;
      Ok(serde_json::from_slice(&bytes)?)
    }
  }

  /// `PATCH /api/<collection>/<id>` with `{"status": ...}`.
  pub async fn set_status<R: Record>(&self, id: &str, status: R::Status) -> Result<R> {
    self.patch::<R>(id, json!({ "status": status })).await
  }

  /// `PATCH /api/<collection>/<id>` with every editable field.
  pub async fn set_fields<R: Record>(&self, id: &str, fields: &R::Fields) -> Result<R> {
    self.patch::<R>(id, serde_json::to_value(fields)?).await
  }

  async fn patch<R: Record>(&self, id: &str, body: Value) -> Result<R> {
    if !R::KIND.supports_update() {
      return Err(Error::Unsupported { kind: R::KIND });
    }
    let path = format!("{}/{id}", R::KIND.collection_path());
    let resp = self
      .auth(self.client.patch(self.url(&path)))
      .json(&body)
      .send()
      .await?;
    data(&path, resp).await
  }

  /// `DELETE /api/<collection>/<id>`
  pub async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<()> {
    let path = format!("{}/{id}", kind.collection_path());
    let resp = self.auth(self.client.delete(self.url(&path))).send().await?;
    envelope::<Value>(resp).await.map(|_| ())
  }

  /// `GET /api/career/<id>/resume`
  pub async fn download_resume(&self, id: &str) -> Result<DownloadedResume> {
    let path = format!("{}/{id}/resume", RecordKind::Career.collection_path());
    let resp = self.auth(self.client.get(self.url(&path))).send().await?;
    let content_type = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned);
    let bytes = checked(resp).await?;
    tracing::debug!(%id, size = bytes.len(), "downloaded resume");
    Ok(DownloadedResume { file_name: format!("resume-{id}.pdf"), content_type, bytes })
  }

  // ── Public submissions ────────────────────────────────────────────────────

  /// `POST /api/contact`
  pub async fn submit_contact(&self, fields: &ContactFields) -> Result<ContactSubmission> {
    self.post_json(RecordKind::Contact.collection_path(), fields).await
  }

  /// `POST /api/career` as multipart, one text part per non-empty field plus
  /// the resume file.
  pub async fn apply(
    &self,
    fields: &CareerFields,
    resume: ResumeUpload,
  ) -> Result<CareerApplication> {
    let mut form = multipart::Form::new();
    for spec in CareerFields::SPECS {
      if let Some(value) = fields.get(spec.name).filter(|v| !v.is_empty()) {
        form = form.text(spec.name, value);
      }
    }
    let part = multipart::Part::bytes(resume.bytes)
      .file_name(resume.file_name)
      .mime_str(&resume.content_type)?;
    form = form.part("resume", part);

    let path = RecordKind::Career.collection_path();
    let resp = self.client.post(self.url(path)).multipart(form).send().await?;
    data(path, resp).await
  }

  /// `POST /api/subscribe`
  pub async fn subscribe(&self, email: &str) -> Result<Subscriber> {
    self
      .post_json("/subscribe", &SubscriberFields { email: email.to_owned() })
      .await
  }

  async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
    let resp = self.client.post(self.url(path)).json(body).send().await?;
    data(path, resp).await
  }
}

// ─── Response handling ────────────────────────────────────────────────────────

/// The body of a 2xx response, or the server's rejection.
async fn checked(resp: Response) -> Result<Vec<u8>> {
  let status = resp.status();
  let bytes = resp.bytes().await?.to_vec();
  if status.is_success() {
    Ok(bytes)
  } else {
    Err(rejection(status, &bytes))
  }
}

async fn envelope<T: DeserializeOwned>(resp: Response) -> Result<Envelope<T>> {
  let status = resp.status();
  let bytes = checked(resp).await?;
  let env: Envelope<T> = serde_json::from_slice(&bytes)?;
  if env.success {
    Ok(env)
  } else {
    Err(Error::Api {
      status:  status.as_u16(),
      message: env.message.unwrap_or_else(|| status.to_string()),
      errors:  env.errors,
    })
  }
}

async fn data<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
  envelope(resp)
    .await?
    .data
    .ok_or_else(|| Error::MissingData { path: path.to_owned() })
}

/// Turn a non-2xx response into [`Error::Api`], preferring the envelope's
/// message over the status line.
fn rejection(status: StatusCode, body: &[u8]) -> Error {
  let (message, errors) = match serde_json::from_slice::<Envelope<Value>>(body) {
    Ok(env) => (env.message.unwrap_or_else(|| status.to_string()), env.errors),
    Err(_) => (status.to_string(), FieldErrors::new()),
  };
  tracing::debug!(%status, %message, "request rejected");
  Error::Api { status: status.as_u16(), message, errors }
}

#[cfg(test)]
mod tests;
