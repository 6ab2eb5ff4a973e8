// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules, one per table family.

pub mod alerts;
pub mod audit;
pub mod history;
pub mod queue;
pub mod teams;
