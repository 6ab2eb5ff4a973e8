// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The team-data boundary: inventory, orders, BOM, members, events.
//!
//! `DomainStore` is a black box to the rest of the workspace. Executors call
//! it and report its answers; nothing else encodes business rules about team
//! data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Failure at the team-data boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid operation: {0}")]
    Invalid(String),
}

/// An inventory part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i64,
}

/// Purchase order lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Submitted,
    Received,
    Cancelled,
}

/// A purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub vendor: String,
    pub description: String,
    pub status: OrderStatus,
}

/// One bill-of-materials line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomItem {
    pub id: String,
    pub part_name: String,
    pub quantity: i64,
    pub subsystem: Option<String>,
}

/// A registered team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: String,
    pub display_name: String,
    pub role: String,
}

/// A scheduled team event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub starts_at: String,
    pub location: Option<String>,
}

/// Team-data CRUD, always scoped to one team.
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn list_parts(
        &self,
        team_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<Part>, DomainError>;

    async fn get_part(&self, team_id: &str, part_id: &str) -> Result<Part, DomainError>;

    /// Applies a signed quantity delta. Rejects adjustments that would take
    /// the stocked quantity below zero.
    async fn adjust_part_quantity(
        &self,
        team_id: &str,
        part_id: &str,
        delta: i64,
    ) -> Result<Part, DomainError>;

    async fn list_orders(
        &self,
        team_id: &str,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError>;

    async fn get_order(&self, team_id: &str, order_id: &str) -> Result<Order, DomainError>;

    async fn set_order_status(
        &self,
        team_id: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, DomainError>;

    async fn list_bom(&self, team_id: &str) -> Result<Vec<BomItem>, DomainError>;

    async fn add_bom_item(
        &self,
        team_id: &str,
        part_name: &str,
        quantity: i64,
        subsystem: Option<&str>,
    ) -> Result<BomItem, DomainError>;

    async fn list_members(&self, team_id: &str) -> Result<Vec<Member>, DomainError>;

    async fn list_events(&self, team_id: &str) -> Result<Vec<Event>, DomainError>;
}
