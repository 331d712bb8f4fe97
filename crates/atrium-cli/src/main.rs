//! `atrium`: terminal admin for the Atrium back office.
//!
//! # Usage
//!
//! ```text
//! atrium --url http://localhost:8080 --user admin --password secret
//! atrium --config ~/.config/atrium/config.toml --log-file atrium.log
//! atrium export career --format xlsx --status shortlisted --out reports/
//! atrium resume 3f2a9c… --out downloads/
//! ```

mod app;
mod commands;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use atrium_client::{ApiClient, ApiConfig};
use atrium_core::RecordKind;
use atrium_table::export::ExportFormat;
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "atrium", about = "Terminal admin for the Atrium back office")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the atrium server (default: http://localhost:8080).
  #[arg(long, env = "ATRIUM_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "ATRIUM_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "ATRIUM_PASSWORD")]
  password: Option<String>,

  /// Write logs to this file. The interactive UI logs nothing otherwise.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Export the records of one kind to PDF or XLSX.
  Export {
    /// contact, career or subscriber.
    kind:   RecordKind,
    #[arg(short, long, default_value = "xlsx")]
    format: ExportFormat,
    /// Only records containing this text.
    #[arg(short, long, default_value = "")]
    query:  String,
    /// Only records with this status.
    #[arg(short, long)]
    status: Option<String>,
    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out:    PathBuf,
  },
  /// Download the resume attached to a career application.
  Resume {
    id:  String,
    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()))
      .unwrap_or_default(),
  };

  init_tracing(args.log_file.as_ref(), args.command.is_some())?;
  let client = ApiClient::new(api_config).context("building HTTP client")?;

  match args.command {
    Some(Command::Export { kind, format, query, status, out }) => {
      let path = commands::export(client, kind, format, &query, status.as_deref(), &out).await?;
      println!("{}", path.display());
      Ok(())
    }
    Some(Command::Resume { id, out }) => {
      let path = commands::resume(&client, &id, &out).await?;
      println!("{}", path.display());
      Ok(())
    }
    None => run_tui(client).await,
  }
}

/// Subcommands log to stderr. The interactive UI owns the terminal, so it
/// logs only to `--log-file`.
fn init_tracing(log_file: Option<&PathBuf>, to_stderr: bool) -> Result<()> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  if let Some(path) = log_file {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  } else if to_stderr {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
  }
  Ok(())
}

async fn run_tui(client: ApiClient) -> Result<()> {
  let out_dir = std::env::current_dir().context("resolving working directory")?;
  let mut app = App::new(client, out_dir);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;
  app.unmount();

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  // Paint the loading state before the first fetch blocks.
  terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
  app.mount_current().await;

  loop {
    app.tick(Utc::now());
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(100))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if key.kind != KeyEventKind::Press {
        continue;
      }
      if !app.handle_key(key).await? {
        break;
      }
    }
  }

  Ok(())
}
