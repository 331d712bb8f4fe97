//! Client tests against a real server on an ephemeral port.

use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use atrium_api::{AppState, AuthConfig, Limits};
use atrium_core::{CareerStatus, ContactStatus, SubscriberStatus};
use atrium_store_sqlite::SqliteStore;
use atrium_table::{LoadState, TableController};
use rand_core::OsRng;

use super::*;

async fn spawn_server() -> String {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(b"secret", &salt)
    .unwrap()
    .to_string();
  let state = AppState {
    store:  Arc::new(store),
    auth:   Arc::new(AuthConfig { username: "admin".into(), password_hash: hash }),
    limits: Limits { max_upload_bytes: 4096 },
  };

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, atrium_server::router(state)).await.unwrap();
  });
  format!("http://{addr}")
}

fn client(base_url: &str, password: &str) -> ApiClient {
  ApiClient::new(ApiConfig {
    base_url: base_url.to_owned(),
    username: "admin".into(),
    password: password.into(),
  })
  .unwrap()
}

fn contact_fields(name: &str) -> ContactFields {
  ContactFields {
    name:    name.into(),
    email:   format!("{}@example.com", name.to_lowercase()),
    phone:   Some("+1 (555) 010-0000".into()),
    company: None,
    subject: "Partnership".into(),
    message: "Let's talk.".into(),
  }
}

fn pdf_resume() -> ResumeUpload {
  ResumeUpload {
    file_name:    "cv.pdf".into(),
    content_type: "application/pdf".into(),
    bytes:        b"%PDF-1.4 fake resume".to_vec(),
  }
}

#[tokio::test]
async fn contact_lifecycle() {
  let base = spawn_server().await;
  let api = client(&base, "secret");

  let created = api.submit_contact(&contact_fields("Ada")).await.unwrap();
  assert_eq!(created.status, ContactStatus::New);

  let listed: Vec<ContactSubmission> = api.list_records().await.unwrap();
  assert_eq!(listed, vec![created.clone()]);

  let updated = api
    .set_status::<ContactSubmission>(&created.id, ContactStatus::Replied)
    .await
    .unwrap();
  assert_eq!(updated.status, ContactStatus::Replied);

  let mut fields = updated.fields();
  fields.subject = "Follow-up".into();
  let updated = api.set_fields::<ContactSubmission>(&created.id, &fields).await.unwrap();
  assert_eq!(updated.subject, "Follow-up");
  assert_eq!(updated.status, ContactStatus::Replied);
  assert_eq!(updated.created_at, created.created_at);

  api.delete_record(RecordKind::Contact, &created.id).await.unwrap();
  assert!(api.list_records::<ContactSubmission>().await.unwrap().is_empty());
}

#[tokio::test]
async fn validation_errors_carry_fields() {
  let base = spawn_server().await;
  let api = client(&base, "secret");

  let mut fields = contact_fields("Ada");
  fields.email = "nope".into();
  let err = api.submit_contact(&fields).await.unwrap_err();

  assert_eq!(err.status(), Some(400));
  assert_eq!(err.to_string(), "Please correct the highlighted fields");
  let Error::Api { errors, .. } = err else { unreachable!() };
  assert_eq!(errors.get("email"), Some("must be a valid email address"));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
  let base = spawn_server().await;
  let err = client(&base, "wrong")
    .list_records::<ContactSubmission>()
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(401));
  assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn missing_record_surfaces_server_message() {
  let base = spawn_server().await;
  let err = client(&base, "secret")
    .delete_record(RecordKind::Career, "missing")
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(404));
  assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn application_with_resume() {
  let base = spawn_server().await;
  let api = client(&base, "secret");

  let fields = CareerFields {
    name:         "Grace".into(),
    email:        "grace@example.com".into(),
    phone:        None,
    position:     "Compiler Engineer".into(),
    experience:   Some("12 years".into()),
    cover_letter: Some("I wrote the first one.".into()),
  };
  let app = api.apply(&fields, pdf_resume()).await.unwrap();
  assert_eq!(app.status, CareerStatus::Pending);
  assert_eq!(app.cover_letter.as_deref(), Some("I wrote the first one."));
  assert_eq!(app.resume.as_ref().unwrap().file_name, "cv.pdf");

  let resume = api.download_resume(&app.id).await.unwrap();
  assert_eq!(resume.file_name, format!("resume-{}.pdf", app.id));
  assert_eq!(resume.content_type.as_deref(), Some("application/pdf"));
  assert_eq!(resume.bytes, pdf_resume().bytes);

  let status = api
    .set_status::<CareerApplication>(&app.id, CareerStatus::Shortlisted)
    .await
    .unwrap();
  assert_eq!(status.status, CareerStatus::Shortlisted);
  assert!(status.resume.is_some());
}

#[tokio::test]
async fn oversized_resume_is_rejected() {
  let base = spawn_server().await;
  let mut resume = pdf_resume();
  resume.bytes = vec![b'x'; 5000];
  let fields = CareerFields {
    name: "Grace".into(),
    email: "grace@example.com".into(),
    position: "Engineer".into(),
    ..Default::default()
  };
  let err = client(&base, "secret").apply(&fields, resume).await.unwrap_err();
  let Error::Api { status, errors, .. } = err else { panic!("expected API error") };
  assert_eq!(status, 400);
  assert!(errors.get("resume").is_some());
}

#[tokio::test]
async fn subscribers() {
  let base = spawn_server().await;
  let api = client(&base, "secret");

  let sub = api.subscribe("News@Example.com").await.unwrap();
  assert_eq!(sub.email, "news@example.com");
  assert_eq!(sub.status, SubscriberStatus::Active);

  let err = api.subscribe("news@example.com").await.unwrap_err();
  assert_eq!(err.status(), Some(409));
  assert_eq!(err.to_string(), "Email is already subscribed");

  let listed: Vec<Subscriber> = api.list_records().await.unwrap();
  assert_eq!(listed.len(), 1);

  let err = api
    .set_status::<Subscriber>(&sub.id, SubscriberStatus::Unsubscribed)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unsupported { kind: RecordKind::Subscriber }));

  api.delete_record(RecordKind::Subscriber, &sub.id).await.unwrap();
  assert!(api.list_records::<Subscriber>().await.unwrap().is_empty());
}

#[tokio::test]
async fn table_runs_on_the_client() {
  let base = spawn_server().await;
  let api = Arc::new(client(&base, "secret"));
  for name in ["Ann", "Bob", "Cy"] {
    api.submit_contact(&contact_fields(name)).await.unwrap();
  }

  let mut table = TableController::<ContactSubmission, _>::new(api.clone());
  table.mount().await;
  assert_eq!(table.state().load, LoadState::Ready);
  assert_eq!(table.state().records.len(), 3);

  let id = table.state().records[0].id.clone();
  table.cycle_status(&id).await;
  assert_eq!(table.state().records[0].status, ContactStatus::Read);

  let server_side: Vec<ContactSubmission> = api.list_records().await.unwrap();
  let stored = server_side.iter().find(|c| c.id == id).unwrap();
  assert_eq!(stored.status, ContactStatus::Read);

  // Deleting twice: the second call reaches the server, which reports the
  // record missing, and local state stays as it was.
  table.run(atrium_table::Command::Delete { id: id.clone() }).await;
  let after = table.state().records.clone();
  table.run(atrium_table::Command::Delete { id }).await;
  assert_eq!(table.state().records, after);
  assert_eq!(after.len(), 2);
}

#[tokio::test]
async fn unreachable_server_fails_the_load() {
  let api = Arc::new(client("http://127.0.0.1:9", "secret"));
  let mut table = TableController::<Subscriber, _>::new(api);
  table.mount().await;
  assert!(matches!(table.state().load, LoadState::Failed(_)));
}
