// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory collaborators for this crate's tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use glados_core::types::{
    AlertAckToken, AlertStatus, ChannelInfo, MessageId, QueueTask, RichContent, SafetyAlert,
    Team, YppContact,
};
use glados_core::{ChatTransport, GladosError, SafetyStore, TaskQueue, TeamDirectory};
use glados_safety::EscalationService;

use crate::domain::{BomItem, DomainError, DomainStore, Event, Member, Order, OrderStatus, Part};

/// Seedable in-memory domain backend.
#[derive(Default)]
pub struct MemoryDomain {
    pub parts: Mutex<Vec<Part>>,
    pub orders: Mutex<Vec<Order>>,
    pub bom: Mutex<Vec<BomItem>>,
    pub members: Mutex<Vec<Member>>,
    pub events: Mutex<Vec<Event>>,
}

#[async_trait]
impl DomainStore for MemoryDomain {
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
                "quantity would become negative ({next})"
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

#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(String, String)>>,
    pub channels: Mutex<Vec<ChannelInfo>>,
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        target: &str,
        text: &str,
        _rich: Option<RichContent>,
    ) -> Result<MessageId, GladosError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((target.to_string(), text.to_string()));
        Ok(MessageId(format!("msg-{}", sent.len())))
    }

    async fn list_channels(&self, _guild_id: &str) -> Result<Vec<ChannelInfo>, GladosError> {
        Ok(self.channels.lock().unwrap().clone())
    }
}

/// Safety store that only counts; enough for dispatcher-level tests.
#[derive(Default)]
pub struct CountingSafetyStore {
    pub alerts: Mutex<Vec<SafetyAlert>>,
    pub tokens: Mutex<HashMap<String, AlertAckToken>>,
}

#[async_trait]
impl SafetyStore for CountingSafetyStore {
    async fn insert_alert(&self, alert: &SafetyAlert) -> Result<(), GladosError> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn get_alert(&self, alert_id: &str) -> Result<Option<SafetyAlert>, GladosError> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == alert_id)
            .cloned())
    }

    async fn set_alert_status(
        &self,
        alert_id: &str,
        status: AlertStatus,
    ) -> Result<(), GladosError> {
        if let Some(alert) = self
            .alerts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|a| a.id == alert_id)
        {
            alert.status = status;
        }
        Ok(())
    }

    async fn insert_ack_token(&self, token: &AlertAckToken) -> Result<(), GladosError> {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_ack_token(&self, token: &str) -> Result<Option<AlertAckToken>, GladosError> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn consume_ack_token(
        &self,
        token: &str,
        used_by: &str,
        used_at: &str,
    ) -> Result<bool, GladosError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(t) if t.used_at.is_none() => {
                t.used_at = Some(used_at.to_string());
                t.used_by = Some(used_by.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_token_notified(
        &self,
        token: &str,
        notified_at: &str,
    ) -> Result<bool, GladosError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(t) if t.notified_at.is_none() => {
                t.notified_at = Some(notified_at.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub struct FixedTeams {
    pub teams: Vec<Team>,
    pub contacts: Vec<YppContact>,
}

#[async_trait]
impl TeamDirectory for FixedTeams {
    async fn get_team(&self, team_id: &str) -> Result<Option<Team>, GladosError> {
        Ok(self.teams.iter().find(|t| t.id == team_id).cloned())
    }

    async fn contacts_for_team(&self, team_id: &str) -> Result<Vec<YppContact>, GladosError> {
        Ok(self
            .contacts
            .iter()
            .filter(|c| c.team_id == team_id)
            .cloned()
            .collect())
    }
}

/// Counts enqueued payloads, never delivers.
#[derive(Default)]
pub struct SinkQueue {
    pub enqueued: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TaskQueue for SinkQueue {
    async fn enqueue(&self, queue_name: &str, payload: &str) -> Result<i64, GladosError> {
        let mut enqueued = self.enqueued.lock().unwrap();
        enqueued.push((queue_name.to_string(), payload.to_string()));
        Ok(enqueued.len() as i64)
    }

    async fn dequeue(&self, _queue_name: &str) -> Result<Option<QueueTask>, GladosError> {
        Ok(None)
    }

    async fn ack(&self, _task_id: i64) -> Result<(), GladosError> {
        Ok(())
    }

    async fn fail(&self, _task_id: i64) -> Result<(), GladosError> {
        Ok(())
    }
}

/// An escalation service wired to counting stubs, plus the stores for
/// inspection.
pub fn stub_escalation(
    contacts: Vec<YppContact>,
) -> (Arc<EscalationService>, Arc<CountingSafetyStore>, Arc<SinkQueue>) {
    let safety = Arc::new(CountingSafetyStore::default());
    let queue = Arc::new(SinkQueue::default());
    let teams = Arc::new(FixedTeams {
        teams: vec![Team {
            id: "team-1".into(),
            name: "Team".into(),
            guild_id: Some("guild-1".into()),
        }],
        contacts,
    });
    let escalation = Arc::new(EscalationService::new(
        safety.clone(),
        teams,
        queue.clone(),
        "safety_notifications",
        7,
    ));
    (escalation, safety, queue)
}
