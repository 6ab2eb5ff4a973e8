// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the GLaDOS assistant.
//!
//! A single [`Database`] handle (WAL mode, serialized writes through one
//! background connection) backs every persistence trait via
//! [`SqliteStorage`]. Schema changes ship as embedded refinery migrations.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::{Database, now_rfc3339};
