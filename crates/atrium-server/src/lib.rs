//! Atrium HTTP server: configuration and top-level router.
//!
//! The JSON API from [`atrium_api`] is mounted under `/api` and wrapped in a
//! request-tracing layer.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use atrium_api::{AppState, AuthConfig, Limits};
use atrium_core::store::RecordStore;
use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ATRIUM_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes:   u64,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/atrium/atrium.db") }

fn default_max_upload_bytes() -> u64 { Limits::default().max_upload_bytes }

impl ServerConfig {
  /// Layer the optional file at `path` under `ATRIUM_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix("ATRIUM")),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  /// Shared handler state for `store` under this configuration.
  pub fn app_state<S: RecordStore>(&self, store: S) -> AppState<S> {
    AppState {
      store:  Arc::new(store),
      auth:   Arc::new(AuthConfig {
        username:      self.auth_username.clone(),
        password_hash: self.auth_password_hash.clone(),
      }),
      limits: Limits { max_upload_bytes: self.max_upload_bytes },
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", atrium_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;
  use atrium_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  fn parse(toml: &str) -> Result<ServerConfig, ConfigError> {
    ServerConfig::from_builder(
      Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
  }

  #[test]
  fn defaults_fill_missing_keys() {
    let cfg = parse(
      r#"
        auth_username = "admin"
        auth_password_hash = "$argon2id$placeholder"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.max_upload_bytes, 5 * 1024 * 1024);
  }

  #[test]
  fn credentials_are_required() {
    assert!(parse("port = 9000").is_err());
  }

  #[test]
  fn tilde_expansion_only_touches_leading_tilde() {
    assert_eq!(expand_tilde(Path::new("/var/lib/a.db")), PathBuf::from("/var/lib/a.db"));
    assert_eq!(expand_tilde(Path::new("data/~/a.db")), PathBuf::from("data/~/a.db"));
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let cfg = parse(
      r#"
        auth_username = "admin"
        auth_password_hash = "$argon2id$placeholder"
      "#,
    )
    .unwrap();
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app   = router(cfg.app_state(store));

    let req = Request::builder()
      .method("POST")
      .uri("/api/subscribe")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"email":"ada@example.com"}"#))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req  = Request::builder().uri("/api/subscribers").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
