//! Career-application endpoints: the public multipart submission and the
//! admin resume download.

use atrium_core::{
  CareerApplication, CareerFields, EditableFields, Envelope, FieldErrors, ResumeMeta,
  career::validate_resume,
  store::{RecordStore, StoredResume},
};
use axum::{
  Json,
  body::Bytes,
  extract::{Multipart, Path, State, multipart::MultipartError},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::{AppState, auth::Authenticated, error::ApiError, handlers::new_id};

/// Name of the multipart part carrying the resume file.
pub const RESUME_PART: &str = "resume";

struct Upload {
  file_name:    String,
  content_type: String,
  bytes:        Bytes,
}

/// A body cut off by the request size limit is reported against the resume,
/// which is the only part that can grow that large.
fn multipart_error(e: MultipartError, max_upload_bytes: u64) -> ApiError {
  if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
    let mut errors = FieldErrors::new();
    errors.insert(RESUME_PART, format!("must be at most {max_upload_bytes} bytes"));
    ApiError::Validation(errors)
  } else {
    ApiError::BadRequest(e.body_text())
  }
}

/// `POST /career`: multipart body: text parts named after the
/// [`CareerFields`] wire names plus a `resume` file part.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<CareerApplication>>), ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let max_upload = state.limits.max_upload_bytes;
  let mut fields = CareerFields::default();
  let mut upload: Option<Upload> = None;

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| multipart_error(e, max_upload))?
  {
    let name = field.name().unwrap_or_default().to_owned();
    if name == RESUME_PART {
      let file_name = field.file_name().unwrap_or("resume").to_owned();
      let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_owned();
      let bytes = field
        .bytes()
        .await
        .map_err(|e| multipart_error(e, max_upload))?;
      upload = Some(Upload { file_name, content_type, bytes });
    } else {
      let value = field
        .text()
        .await
        .map_err(|e| multipart_error(e, max_upload))?;
      if !fields.set(&name, value) {
        tracing::debug!(part = %name, "ignoring unknown multipart part");
      }
    }
  }

  let fields = fields.normalized();
  let mut errors = fields.validate().err().unwrap_or_else(FieldErrors::new);
  match &upload {
    Some(u) => validate_resume(
      &mut errors,
      &u.content_type,
      u.bytes.len() as u64,
      max_upload,
    ),
    None => errors.insert(RESUME_PART, "is required"),
  }
  errors.into_result()?;

  let Some(upload) = upload else {
    let mut errors = FieldErrors::new();
    errors.insert(RESUME_PART, "is required");
    return Err(errors.into());
  };
  let resume = StoredResume {
    meta:  ResumeMeta {
      file_name:    upload.file_name,
      content_type: upload.content_type,
      size:         upload.bytes.len() as u64,
      content_hash: hex::encode(Sha256::digest(&upload.bytes)),
    },
    bytes: upload.bytes.to_vec(),
  };
  let mut record = fields.into_record(new_id(), Utc::now());
  record.resume = Some(resume.meta.clone());

  let record = state
    .store
    .insert_application(record, resume)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = %record.id, position = %record.position, "career application received");
  Ok((
    StatusCode::CREATED,
    Json(Envelope::ok(record).with_message("Application submitted successfully.")),
  ))
}

/// `GET /career/{id}/resume`: the stored file as an attachment.
pub async fn resume<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let resume = state
    .store
    .get_resume(id.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no resume for application {id}")))?;

  let file_name: String = resume
    .meta
    .file_name
    .chars()
    .filter(|c| !c.is_control() && *c != '"')
    .collect();

  Ok(
    (
      [
        (header::CONTENT_TYPE, resume.meta.content_type),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
      ],
      resume.bytes,
    )
      .into_response(),
  )
}
