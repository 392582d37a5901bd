// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Shift Alert system.
//!
//! This crate provides `SQLite`-backed storage for booking alerts,
//! staff profiles, and the audit log.
//!
//! ## Concurrency Contract
//!
//! Alerts carry an integer `version` column. After creation, every
//! mutation goes through [`SqliteAlertStore::compare_and_swap`], which
//! performs a single conditional `UPDATE` keyed on the version the
//! caller read. A lost race surfaces as
//! [`PersistenceError::Conflict`] carrying the current record; the
//! store never silently overwrites a concurrent write, and the audit
//! event for a transition commits in the same transaction as the
//! record itself.
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against private in-memory `SQLite` databases
//! - No external infrastructure is required
//! - Tests fail fast if schema initialization fails

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod data_models;
mod error;
mod schema;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::SqliteAlertStore;
