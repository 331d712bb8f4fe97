//! The admin record table, written once and instantiated per record kind.
//!
//! A table is a [`TableState`] driven by a pure [`reduce`] function. The
//! [`TableController`] owns one state, talks to a [`RecordBackend`] through
//! [`Command`]s, and hands filtered records to the [`export`] module.
//!
//! ```text
//! backend ──list──▶ records ──filter──▶ visible ──paginate──▶ page
//!                      ▲                   │
//!             Patched  │                   └──export──▶ PDF / XLSX
//!    Command ──execute─┘
//! ```

#![allow(async_fn_in_trait)]

pub mod backend;
pub mod command;
pub mod controller;
pub mod export;
pub mod filter;
pub mod paginate;
pub mod reducer;
pub mod state;

pub use backend::RecordBackend;
pub use command::{Command, GatewayError, Patched};
pub use controller::TableController;
pub use filter::StatusFilter;
pub use paginate::{PAGE_SIZE, Page};
pub use reducer::{Action, reduce};
pub use state::{LoadState, Modal, Notice, NoticeLevel, TableState};
pub use tokio_util::sync::CancellationToken;
