//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use atrium_core::{
  CareerApplication, ContactStatus, ContactSubmission, Envelope, Subscriber, SubscriberStatus,
  store::RecordStore,
};
use atrium_store_sqlite::SqliteStore;
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt as _;

use crate::{AppState, AuthConfig, Limits, api_router};

async fn make_state() -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let salt  = SaltString::generate(&mut OsRng);
  let hash  = Argon2::default()
    .hash_password(b"secret", &salt)
    .unwrap()
    .to_string();

  AppState {
    store:  Arc::new(store),
    auth:   Arc::new(AuthConfig { username: "admin".into(), password_hash: hash }),
    limits: Limits { max_upload_bytes: 1024 },
  }
}

fn admin() -> String { format!("Basic {}", B64.encode("admin:secret")) }

async fn send(
  state:   &AppState<SqliteStore>,
  method:  &str,
  uri:     &str,
  auth:    bool,
  body:    Option<serde_json::Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if auth {
    builder = builder.header(header::AUTHORIZATION, admin());
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  api_router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap()
}

async fn json<T: DeserializeOwned>(resp: Response) -> T {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn contact_body() -> serde_json::Value {
  json!({
    "name": "Ada Lovelace",
    "email": "ada@example.com",
    "subject": "Website",
    "message": "Please build us a website."
  })
}

async fn create_contact(state: &AppState<SqliteStore>) -> ContactSubmission {
  let resp = send(state, "POST", "/contact", false, Some(contact_body())).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let env: Envelope<ContactSubmission> = json(resp).await;
  env.data.unwrap()
}

fn multipart(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> (String, Vec<u8>) {
  let boundary = "atrium-test-boundary";
  let mut body = Vec::new();
  for (name, file, data) in parts {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    match file {
      Some((file_name, content_type)) => body.extend_from_slice(
        format!(
          "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
           Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
      ),
      None => body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
      ),
    }
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
  (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn post_application(
  state: &AppState<SqliteStore>,
  resume: Option<(&str, &[u8])>,
) -> Response {
  let mut parts: Vec<(&str, Option<(&str, &str)>, &[u8])> = vec![
    ("name", None, "Grace Hopper".as_bytes()),
    ("email", None, "grace@example.com".as_bytes()),
    ("position", None, "Compiler Engineer".as_bytes()),
    ("coverLetter", None, "I like compilers.".as_bytes()),
  ];
  if let Some((content_type, bytes)) = resume {
    parts.push(("resume", Some(("cv.pdf", content_type)), bytes));
  }
  let (content_type, body) = multipart(&parts);
  let req = Request::builder()
    .method("POST")
    .uri("/career")
    .header(header::CONTENT_TYPE, content_type)
    .body(Body::from(body))
    .unwrap();
  api_router(state.clone()).oneshot(req).await.unwrap()
}

// ── Auth ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_list_requires_credentials() {
  let state = make_state().await;
  let resp  = send(&state, "GET", "/contact", false, None).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  let env: Envelope<()> = json(resp).await;
  assert!(!env.success);
}

// ── Contact ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn public_contact_submission_is_listed_for_admin() {
  let state   = make_state().await;
  let created = create_contact(&state).await;
  assert_eq!(created.status, ContactStatus::New);

  let resp = send(&state, "GET", "/contact", true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let env: Envelope<Vec<ContactSubmission>> = json(resp).await;
  assert!(env.success);
  assert_eq!(env.data.unwrap(), vec![created]);
}

#[tokio::test]
async fn invalid_contact_reports_field_errors() {
  let state = make_state().await;
  let resp  = send(
    &state,
    "POST",
    "/contact",
    false,
    Some(json!({ "name": "", "email": "nope", "subject": "x", "message": "y" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.errors.get("name"), Some("is required"));
  assert_eq!(env.errors.get("email"), Some("must be a valid email address"));
}

#[tokio::test]
async fn malformed_json_is_an_envelope_400() {
  let state = make_state().await;
  let req = Request::builder()
    .method("POST")
    .uri("/contact")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = api_router(state).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let env: Envelope<()> = json(resp).await;
  assert!(!env.success);
  assert!(env.message.is_some());
}

#[tokio::test]
async fn patch_status_returns_updated_record() {
  let state   = make_state().await;
  let created = create_contact(&state).await;

  let resp = send(
    &state,
    "PATCH",
    &format!("/contact/{}", created.id),
    true,
    Some(json!({ "status": "replied" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let env: Envelope<ContactSubmission> = json(resp).await;
  let updated = env.data.unwrap();
  assert_eq!(updated.status, ContactStatus::Replied);
  assert_eq!(updated.name, created.name);
}

#[tokio::test]
async fn patch_and_delete_missing_record_are_404() {
  let state = make_state().await;
  let resp  = send(&state, "PATCH", "/contact/ghost", true, Some(json!({ "status": "read" }))).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(&state, "DELETE", "/contact/ghost", true, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.message.as_deref(), Some("contact ghost not found"));
}

#[tokio::test]
async fn delete_removes_record() {
  let state   = make_state().await;
  let created = create_contact(&state).await;

  let resp = send(&state, "DELETE", &format!("/contact/{}", created.id), true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let env: Envelope<Vec<ContactSubmission>> =
    json(send(&state, "GET", "/contact", true, None).await).await;
  assert!(env.data.unwrap().is_empty());
}

// ── Career ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn application_with_resume_can_be_downloaded() {
  let state = make_state().await;
  let resp  = post_application(&state, Some(("application/pdf", "%PDF-1.4 cv".as_bytes()))).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let env: Envelope<CareerApplication> = json(resp).await;
  let app = env.data.unwrap();
  let meta = app.resume.clone().unwrap();
  assert_eq!(meta.size, 11);
  assert_eq!(meta.content_hash.len(), 64);
  assert_eq!(app.cover_letter.as_deref(), Some("I like compilers."));

  let resp = send(&state, "GET", &format!("/career/{}/resume", app.id), true, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..], b"%PDF-1.4 cv");
}

#[tokio::test]
async fn application_rejects_missing_or_wrong_resume() {
  let state = make_state().await;

  let resp = post_application(&state, None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.errors.get("resume"), Some("is required"));

  let resp = post_application(&state, Some(("image/png", "png".as_bytes()))).await;
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.errors.get("resume"), Some("must be a PDF or Word document"));

  let big = vec![b'x'; 2048];
  let resp = post_application(&state, Some(("application/pdf", big.as_slice()))).await;
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.errors.get("resume"), Some("must be at most 1024 bytes"));
}

#[tokio::test]
async fn resume_past_the_body_limit_fails_on_the_resume_field() {
  let state = make_state().await;
  let huge = vec![b'x'; 200 * 1024];
  let resp = post_application(&state, Some(("application/pdf", huge.as_slice()))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let env: Envelope<()> = json(resp).await;
  assert!(!env.success);
  assert_eq!(env.errors.get("resume"), Some("must be at most 1024 bytes"));
  assert!(state.store.list::<CareerApplication>().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_resume_download_is_404() {
  let state = make_state().await;
  let resp  = send(&state, "GET", "/career/nope/resume", true, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Subscribers ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn subscribers_list_is_a_bare_array() {
  let state = make_state().await;
  let resp  = send(&state, "POST", "/subscribe", false, Some(json!({ "email": "a@b.co" }))).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let resp = send(&state, "GET", "/subscribers", true, None).await;
  let list: Vec<Subscriber> = json(resp).await;
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].email, "a@b.co");
}

#[tokio::test]
async fn duplicate_subscription_conflicts_and_unsubscribed_is_reactivated() {
  let state = make_state().await;
  let body  = json!({ "email": "ada@example.com" });
  send(&state, "POST", "/subscribe", false, Some(body.clone())).await;

  let resp = send(&state, "POST", "/subscribe", false, Some(json!({ "email": "ADA@example.com" }))).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
  let env: Envelope<()> = json(resp).await;
  assert_eq!(env.message.as_deref(), Some("Email is already subscribed"));

  let mut sub: Subscriber = state.store.list::<Subscriber>().await.unwrap().remove(0);
  sub.status = SubscriberStatus::Unsubscribed;
  state.store.replace(sub).await.unwrap();

  let resp = send(&state, "POST", "/subscribe", false, Some(body)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let env: Envelope<Subscriber> = json(resp).await;
  assert_eq!(env.data.unwrap().status, SubscriberStatus::Active);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_subscribes_for_one_address_create_once() {
  let state = make_state().await;
  for round in 0..10 {
    let body = json!({ "email": format!("racer{round}@example.com") });
    let (a, b) = tokio::join!(
      send(&state, "POST", "/subscribe", false, Some(body.clone())),
      send(&state, "POST", "/subscribe", false, Some(body.clone())),
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT], "round {round}");
  }
  assert_eq!(state.store.list::<Subscriber>().await.unwrap().len(), 10);
}

#[tokio::test]
async fn subscribers_cannot_be_patched() {
  let state = make_state().await;
  let resp  = send(&state, "PATCH", "/subscribers/x", true, Some(json!({ "status": "active" }))).await;
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
