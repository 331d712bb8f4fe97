//! Route handlers, grouped by collection.
//!
//! | Method   | Path | Auth | Handler |
//! |----------|------|------|---------|
//! | `GET`    | `/contact` | admin | [`records::list`] |
//! | `POST`   | `/contact` | public | [`contact::create`] |
//! | `PATCH`  | `/contact/{id}` | admin | [`records::update`] |
//! | `DELETE` | `/contact/{id}` | admin | [`records::delete`] |
//! | `GET`    | `/career` | admin | [`records::list`] |
//! | `POST`   | `/career` | public | [`career::create`] (multipart) |
//! | `PATCH`  | `/career/{id}` | admin | [`records::update`] |
//! | `DELETE` | `/career/{id}` | admin | [`records::delete`] |
//! | `GET`    | `/career/{id}/resume` | admin | [`career::resume`] |
//! | `GET`    | `/subscribers` | admin | [`subscribers::list`] (bare array) |
//! | `DELETE` | `/subscribers/{id}` | admin | [`records::delete`] |
//! | `POST`   | `/subscribe` | public | [`subscribers::subscribe`] |

pub mod career;
pub mod contact;
pub mod records;
pub mod subscribers;

/// A fresh opaque record identifier.
pub(crate) fn new_id() -> String { uuid::Uuid::new_v4().simple().to_string() }
