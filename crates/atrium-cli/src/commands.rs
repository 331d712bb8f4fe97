//! Non-interactive subcommands.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context, Result, bail};
use atrium_client::ApiClient;
use atrium_core::{CareerApplication, ContactSubmission, RecordKind, Subscriber};
use atrium_table::{
  Action, LoadState, StatusFilter, TableController,
  export::{ExportFormat, Exportable},
};

/// Load, filter and export every record of `kind` matching `query` and
/// `status`. Returns the written file.
pub async fn export(
  client: ApiClient,
  kind: RecordKind,
  format: ExportFormat,
  query: &str,
  status: Option<&str>,
  out: &Path,
) -> Result<PathBuf> {
  let client = Arc::new(client);
  match kind {
    RecordKind::Contact => export_kind::<ContactSubmission>(client, format, query, status, out).await,
    RecordKind::Career => export_kind::<CareerApplication>(client, format, query, status, out).await,
    RecordKind::Subscriber => export_kind::<Subscriber>(client, format, query, status, out).await,
  }
}

async fn export_kind<R: Exportable>(
  client: Arc<ApiClient>,
  format: ExportFormat,
  query: &str,
  status: Option<&str>,
  out: &Path,
) -> Result<PathBuf> {
  let mut table = TableController::<R, _>::new(client);
  table.mount().await;
  if let LoadState::Failed(message) = &table.state().load {
    bail!("loading {}: {message}", R::KIND.title().to_lowercase());
  }

  table.dispatch(Action::SetQuery(query.to_owned()));
  if let Some(status) = status {
    let filter = StatusFilter::parse(R::KIND, status)?;
    table.dispatch(Action::SetStatusFilter(filter));
  }

  let file = table.export(format)?;
  let path = out.join(&file.file_name);
  std::fs::write(&path, &file.bytes)
    .with_context(|| format!("writing {}", path.display()))?;
  tracing::info!(path = %path.display(), rows = file.rows, "export written");
  Ok(path)
}

/// Save the resume of application `id` as `resume-<id>.pdf` under `out`.
pub async fn resume(client: &ApiClient, id: &str, out: &Path) -> Result<PathBuf> {
  let resume = client
    .download_resume(id)
    .await
    .with_context(|| format!("downloading resume for {id}"))?;
  let path = out.join(&resume.file_name);
  std::fs::write(&path, &resume.bytes)
    .with_context(|| format!("writing {}", path.display()))?;
  tracing::info!(path = %path.display(), size = resume.bytes.len(), "resume saved");
  Ok(path)
}
