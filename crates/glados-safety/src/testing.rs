// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory trait implementations shared by this crate's tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use glados_core::types::{
    AlertAckToken, AlertStatus, ChannelInfo, MessageId, QueueTask, RichContent, SafetyAlert,
    Team, YppContact,
};
use glados_core::{ChatTransport, GladosError, SafetyStore, TaskQueue, TeamDirectory};

#[derive(Default)]
pub struct MemorySafetyStore {
    alerts: Mutex<HashMap<String, SafetyAlert>>,
    tokens: Mutex<HashMap<String, AlertAckToken>>,
}

impl MemorySafetyStore {
    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl SafetyStore for MemorySafetyStore {
    async fn insert_alert(&self, alert: &SafetyAlert) -> Result<(), GladosError> {
        self.alerts
            .lock()
            .unwrap()
            .insert(alert.id.clone(), alert.clone());
        Ok(())
    }

    async fn get_alert(&self, alert_id: &str) -> Result<Option<SafetyAlert>, GladosError> {
        Ok(self.alerts.lock().unwrap().get(alert_id).cloned())
    }

    async fn set_alert_status(
        &self,
        alert_id: &str,
        status: AlertStatus,
    ) -> Result<(), GladosError> {
        if let Some(alert) = self.alerts.lock().unwrap().get_mut(alert_id) {
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

pub struct MemoryTeams {
    teams: Vec<Team>,
    contacts: Vec<YppContact>,
}

impl MemoryTeams {
    pub fn new(teams: Vec<Team>, contacts: Vec<YppContact>) -> Self {
        Self { teams, contacts }
    }
}

#[async_trait]
impl TeamDirectory for MemoryTeams {
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

struct MemoryTask {
    task: QueueTask,
    claimed: bool,
}

/// Pending-count queue mirroring the durable queue's claim semantics:
/// a claimed task is invisible until acked (removed) or failed (requeued).
#[derive(Default)]
pub struct MemoryQueue {
    tasks: Mutex<Vec<MemoryTask>>,
    next_id: Mutex<i64>,
}

impl MemoryQueue {
    pub fn len(&self, queue_name: &str) -> usize {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.task.queue_name == queue_name)
            .count()
    }
}

#[async_trait]
impl TaskQueue for MemoryQueue {
    async fn enqueue(&self, queue_name: &str, payload: &str) -> Result<i64, GladosError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;
        self.tasks.lock().unwrap().push(MemoryTask {
            task: QueueTask {
                id,
                queue_name: queue_name.to_string(),
                payload: payload.to_string(),
                attempts: 0,
                max_attempts: 5,
            },
            claimed: false,
        });
        Ok(id)
    }

    async fn dequeue(&self, queue_name: &str) -> Result<Option<QueueTask>, GladosError> {
        let mut tasks = self.tasks.lock().unwrap();
        for entry in tasks.iter_mut() {
            if entry.task.queue_name == queue_name && !entry.claimed {
                entry.claimed = true;
                return Ok(Some(entry.task.clone()));
            }
        }
        Ok(None)
    }

    async fn ack(&self, task_id: i64) -> Result<(), GladosError> {
        self.tasks.lock().unwrap().retain(|t| t.task.id != task_id);
        Ok(())
    }

    async fn fail(&self, task_id: i64) -> Result<(), GladosError> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(entry) = tasks.iter_mut().find(|t| t.task.id == task_id) {
            entry.claimed = false;
            entry.task.attempts += 1;
        }
        Ok(())
    }
}

pub struct MemoryTransport {
    sent: Mutex<Vec<(String, String, Option<RichContent>)>>,
    fail: bool,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }
}

impl MemoryTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String, Option<RichContent>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MemoryTransport {
    async fn send_message(
        &self,
        target: &str,
        text: &str,
        rich: Option<RichContent>,
    ) -> Result<MessageId, GladosError> {
        if self.fail {
            return Err(GladosError::Transport {
                message: "simulated delivery failure".into(),
                source: None,
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.to_string(), text.to_string(), rich));
        Ok(MessageId(format!("msg-{}", self.sent.lock().unwrap().len())))
    }

    async fn list_channels(&self, _guild_id: &str) -> Result<Vec<ChannelInfo>, GladosError> {
        Ok(Vec::new())
    }
}
