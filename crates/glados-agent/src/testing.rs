// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic collaborators for pipeline tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use glados_core::types::{
    AlertAckToken, AlertStatus, AuditLogEntry, ConversationTurn, ModelRequest, ModelResponse,
    QueueTask, Role, SafetyAlert, Team, TurnRole, YppContact,
};
use glados_core::{
    AuditLog, ClassificationResult, Classifier, GladosError, HistoryStore, ModelProvider,
    RiskLevel, SafetyStore, TaskQueue, TeamDirectory,
};
use glados_tools::domain::{BomItem, DomainError, DomainStore, Event, Member, Order, OrderStatus, Part};

/// Classifier returning a canned verdict.
pub struct FixedClassifier {
    pub result: ClassificationResult,
}

impl FixedClassifier {
    pub fn level(level: RiskLevel, flags: &[&str]) -> Self {
        Self {
            result: ClassificationResult {
                risk_level: level,
                flags: flags.iter().map(|s| s.to_string()).collect(),
                reasoning: None,
            },
        }
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _message: &str) -> ClassificationResult {
        self.result.clone()
    }
}

/// Provider that plays a script, then optionally repeats a final response
/// forever. Records every request it sees.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ModelResponse, String>>>,
    repeat: Option<ModelResponse>,
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Result<ModelResponse, String>>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the same response on every call.
    pub fn always(response: ModelResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, GladosError> {
        self.requests.lock().unwrap().push(request);
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(GladosError::Provider {
                message,
                source: None,
            }),
            None => match &self.repeat {
                Some(response) => Ok(response.clone()),
                None => Err(GladosError::Provider {
                    message: "script exhausted".into(),
                    source: None,
                }),
            },
        }
    }
}

#[derive(Default)]
pub struct MemoryHistory {
    pub turns: Mutex<Vec<(String, String, ConversationTurn)>>,
    pub fail: bool,
}

impl MemoryHistory {
    pub fn failing() -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append_turn(
        &self,
        team_id: &str,
        channel_id: &str,
        role: TurnRole,
        content: &str,
    ) -> Result<(), GladosError> {
        if self.fail {
            return Err(GladosError::Internal("history unavailable".into()));
        }
        self.turns.lock().unwrap().push((
            team_id.to_string(),
            channel_id.to_string(),
            ConversationTurn {
                role,
                content: content.to_string(),
                created_at: "2026-01-01T00:00:00.000Z".into(),
            },
        ));
        Ok(())
    }

    async fn recent_turns(
        &self,
        team_id: &str,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, GladosError> {
        if self.fail {
            return Err(GladosError::Internal("history unavailable".into()));
        }
        let turns = self.turns.lock().unwrap();
        let mut matching: Vec<ConversationTurn> = turns
            .iter()
            .filter(|(t, c, _)| t == team_id && c == channel_id)
            .map(|(_, _, turn)| turn.clone())
            .collect();
        if matching.len() > limit {
            matching = matching.split_off(matching.len() - limit);
        }
        Ok(matching)
    }
}

#[derive(Default)]
pub struct MemoryAudit {
    pub entries: Mutex<Vec<AuditLogEntry>>,
    pub fail: bool,
}

impl MemoryAudit {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl AuditLog for MemoryAudit {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), GladosError> {
        if self.fail {
            return Err(GladosError::Internal("audit unavailable".into()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn entries_for_team(
        &self,
        role: Role,
        team_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        if !role.is_elevated() {
            return Err(GladosError::AccessDenied("elevated role required".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn entries_for_user(
        &self,
        role: Role,
        team_id: &str,
        user_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        if !role.is_elevated() {
            return Err(GladosError::AccessDenied("elevated role required".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.team_id == team_id && e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn safety_entries(
        &self,
        role: Role,
        team_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        if !role.is_elevated() {
            return Err(GladosError::AccessDenied("elevated role required".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.team_id == team_id && e.contains_safety_alert)
            .cloned()
            .collect())
    }

    async fn count_since(
        &self,
        role: Role,
        team_id: &str,
        since: &str,
    ) -> Result<u64, GladosError> {
        if !role.is_elevated() {
            return Err(GladosError::AccessDenied("elevated role required".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.team_id == team_id && e.created_at.as_str() >= since)
            .count() as u64)
    }
}

#[derive(Default)]
pub struct MemorySafety {
    pub alerts: Mutex<Vec<SafetyAlert>>,
    pub tokens: Mutex<Vec<AlertAckToken>>,
}

#[async_trait]
impl SafetyStore for MemorySafety {
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
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn find_ack_token(&self, token: &str) -> Result<Option<AlertAckToken>, GladosError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn consume_ack_token(
        &self,
        token: &str,
        used_by: &str,
        used_at: &str,
    ) -> Result<bool, GladosError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.token == token) {
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
        match tokens.iter_mut().find(|t| t.token == token) {
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

/// Domain backend with one seeded part, enough for tool-loop tests.
pub struct OnePartDomain;

#[async_trait]
impl DomainStore for OnePartDomain {
    async fn list_parts(
        &self,
        _team_id: &str,
        _category: Option<&str>,
    ) -> Result<Vec<Part>, DomainError> {
        Ok(vec![self.part()])
    }

    async fn get_part(&self, _team_id: &str, part_id: &str) -> Result<Part, DomainError> {
        if part_id == "part-1" {
            Ok(self.part())
        } else {
            Err(DomainError::NotFound(format!("part {part_id}")))
        }
    }

    async fn adjust_part_quantity(
        &self,
        _team_id: &str,
        part_id: &str,
        _delta: i64,
    ) -> Result<Part, DomainError> {
        if part_id == "part-1" {
            Ok(self.part())
        } else {
            Err(DomainError::NotFound(format!("part {part_id}")))
        }
    }

    async fn list_orders(
        &self,
        _team_id: &str,
        _status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(Vec::new())
    }

    async fn get_order(&self, _team_id: &str, order_id: &str) -> Result<Order, DomainError> {
        Err(DomainError::NotFound(format!("order {order_id}")))
    }

    async fn set_order_status(
        &self,
        _team_id: &str,
        order_id: &str,
        _status: OrderStatus,
    ) -> Result<Order, DomainError> {
        Err(DomainError::NotFound(format!("order {order_id}")))
    }

    async fn list_bom(&self, _team_id: &str) -> Result<Vec<BomItem>, DomainError> {
        Ok(Vec::new())
    }

    async fn add_bom_item(
        &self,
        _team_id: &str,
        part_name: &str,
        quantity: i64,
        subsystem: Option<&str>,
    ) -> Result<BomItem, DomainError> {
        Ok(BomItem {
            id: "bom-1".into(),
            part_name: part_name.to_string(),
            quantity,
            subsystem: subsystem.map(String::from),
        })
    }

    async fn list_members(&self, _team_id: &str) -> Result<Vec<Member>, DomainError> {
        Ok(Vec::new())
    }

    async fn list_events(&self, _team_id: &str) -> Result<Vec<Event>, DomainError> {
        Ok(Vec::new())
    }
}

impl OnePartDomain {
    fn part(&self) -> Part {
        Part {
            id: "part-1".into(),
            name: "traction wheel".into(),
            category: "wheels".into(),
            quantity: 4,
        }
    }
}

/// Transport stub that accepts everything silently.
pub struct NullTransport;

#[async_trait]
impl glados_core::ChatTransport for NullTransport {
    async fn send_message(
        &self,
        _target: &str,
        _text: &str,
        _rich: Option<glados_core::types::RichContent>,
    ) -> Result<glados_core::MessageId, GladosError> {
        Ok(glados_core::MessageId("msg-0".into()))
    }

    async fn list_channels(
        &self,
        _guild_id: &str,
    ) -> Result<Vec<glados_core::types::ChannelInfo>, GladosError> {
        Ok(Vec::new())
    }
}

/// Convenience for a registered team with one reachable contact.
pub fn default_teams() -> Arc<FixedTeams> {
    Arc::new(FixedTeams {
        teams: vec![Team {
            id: "team-1".into(),
            name: "Rust Belt Robotics".into(),
            guild_id: Some("guild-1".into()),
        }],
        contacts: vec![YppContact {
            team_id: "team-1".into(),
            user_id: "mentor-1".into(),
            dm_target: Some("dm-mentor-1".into()),
        }],
    })
}
