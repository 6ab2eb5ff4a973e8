// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool surface of the GLaDOS assistant.
//!
//! The catalog declares what exists, the dispatcher routes by namespace tag,
//! and the executors do the work against the [`DomainStore`] boundary, the
//! chat transport, and the escalation service.

pub mod dispatcher;
pub mod domain;
pub mod executors;
pub mod namespace;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{CallContext, Dispatcher, ToolResult};
pub use domain::{BomItem, DomainError, DomainStore, Event, Member, Order, OrderStatus, Part};
pub use namespace::{ToolNamespace, ToolSpec, catalog};
