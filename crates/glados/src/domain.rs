// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory team-data backend for the console runtime.
//!
//! The real team data lives in the team-management application; this process
//! only needs a `DomainStore` to stand behind the tool executors when run
//! locally. Seeded with a small plausible inventory.

use std::sync::Mutex;

use async_trait::async_trait;
use glados_tools::domain::{
    BomItem, DomainError, DomainStore, Event, Member, Order, OrderStatus, Part,
};

pub struct LocalDomain {
    parts: Mutex<Vec<Part>>,
    orders: Mutex<Vec<Order>>,
    bom: Mutex<Vec<BomItem>>,
    members: Mutex<Vec<Member>>,
    events: Mutex<Vec<Event>>,
}

impl LocalDomain {
    pub fn seeded() -> Self {
        Self {
            parts: Mutex::new(vec![
                Part {
                    id: "part-1".into(),
                    name: "4in traction wheel".into(),
                    category: "wheels".into(),
                    quantity: 8,
                },
                Part {
                    id: "part-2".into(),
                    name: "NEO brushless motor".into(),
                    category: "motors".into(),
                    quantity: 6,
                },
                Part {
                    id: "part-3".into(),
                    name: "1x1 aluminum tube 1m".into(),
                    category: "structure".into(),
                    quantity: 24,
                },
            ]),
            orders: Mutex::new(vec![Order {
                id: "order-1".into(),
                vendor: "AndyMark".into(),
                description: "spare wheel hubs".into(),
                status: OrderStatus::Submitted,
            }]),
            bom: Mutex::new(vec![BomItem {
                id: "bom-1".into(),
                part_name: "NEO brushless motor".into(),
                quantity: 4,
                subsystem: Some("drivetrain".into()),
            }]),
            members: Mutex::new(vec![
                Member {
                    user_id: "mentor-1".into(),
                    display_name: "Sam".into(),
                    role: "mentor".into(),
                },
                Member {
                    user_id: "student-1".into(),
                    display_name: "Ada".into(),
                    role: "member".into(),
                },
            ]),
            events: Mutex::new(vec![Event {
                id: "event-1".into(),
                name: "Regional qualifier".into(),
                starts_at: "2026-10-03T09:00:00Z".into(),
                location: Some("Cleveland, OH".into()),
            }]),
        }
    }
}

#[async_trait]
impl DomainStore for LocalDomain {
    async fn list_parts(
        &self,
        _team_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<Part>, DomainError> {
        Ok(self
            .parts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }

    async fn get_part(&self, _team_id: &str, part_id: &str) -> Result<Part, DomainError> {
        self.parts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == part_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("part {part_id}")))
    }

    async fn adjust_part_quantity(
        &self,
        _team_id: &str,
        part_id: &str,
        delta: i64,
    ) -> Result<Part, DomainError> {
        let mut parts = self.parts.lock().unwrap();
        let part = parts
            .iter_mut()
            .find(|p| p.id == part_id)
            .ok_or_else(|| DomainError::NotFound(format!("part {part_id}")))?;
        let next = part.quantity + delta;
        if next < 0 {
            return Err(DomainError::Invalid(format!(
                "adjustment would leave {} at {next}",
                part.name
            )));
        }
        part.quantity = next;
        Ok(part.clone())
    }

    async fn list_orders(
        &self,
        _team_id: &str,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect())
    }

    async fn get_order(&self, _team_id: &str, order_id: &str) -> Result<Order, DomainError> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("order {order_id}")))
    }

    async fn set_order_status(
        &self,
        _team_id: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| DomainError::NotFound(format!("order {order_id}")))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn list_bom(&self, _team_id: &str) -> Result<Vec<BomItem>, DomainError> {
        Ok(self.bom.lock().unwrap().clone())
    }

    async fn add_bom_item(
        &self,
        _team_id: &str,
        part_name: &str,
        quantity: i64,
        subsystem: Option<&str>,
    ) -> Result<BomItem, DomainError> {
        if quantity < 1 {
            return Err(DomainError::Invalid("quantity must be positive".into()));
        }
        let mut bom = self.bom.lock().unwrap();
        let item = BomItem {
            id: format!("bom-{}", bom.len() + 1),
            part_name: part_name.to_string(),
            quantity,
            subsystem: subsystem.map(String::from),
        };
        bom.push(item.clone());
        Ok(item)
    }

    async fn list_members(&self, _team_id: &str) -> Result<Vec<Member>, DomainError> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn list_events(&self, _team_id: &str) -> Result<Vec<Event>, DomainError> {
        Ok(self.events.lock().unwrap().clone())
    }
}
