//! Contactos — a small contact-management backend.
//!
//! Single Rust binary. Serves an HTTP API for contact CRUD, exports the
//! contact book as an XLSX workbook, and sends a welcome email when a
//! contact is created.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod export;
pub mod notify;
pub mod store;
pub mod validate;

pub mod http;
