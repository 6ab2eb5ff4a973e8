// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Team directory and YPP contact operations.

use glados_core::GladosError;
use glados_core::types::{Team, YppContact};
use rusqlite::params;

use crate::database::Database;

/// Register a team.
pub async fn create_team(db: &Database, team: &Team) -> Result<(), GladosError> {
    let team = team.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO teams (id, name, guild_id) VALUES (?1, ?2, ?3)",
                params![team.id, team.name, team.guild_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a team by id.
pub async fn get_team(db: &Database, team_id: &str) -> Result<Option<Team>, GladosError> {
    let team_id = team_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT id, name, guild_id FROM teams WHERE id = ?1")?;
            let mut rows = stmt.query_map(params![team_id], |row| {
                Ok(Team {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    guild_id: row.get(2)?,
                })
            })?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Designate a safety contact for a team.
pub async fn add_contact(db: &Database, contact: &YppContact) -> Result<(), GladosError> {
    let contact = contact.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO ypp_contacts (team_id, user_id, dm_target) VALUES (?1, ?2, ?3)",
                params![contact.team_id, contact.user_id, contact.dm_target],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A team's designated contacts, in registration order.
pub async fn contacts_for_team(
    db: &Database,
    team_id: &str,
) -> Result<Vec<YppContact>, GladosError> {
    let team_id = team_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT team_id, user_id, dm_target FROM ypp_contacts
                 WHERE team_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![team_id], |row| {
                Ok(YppContact {
                    team_id: row.get(0)?,
                    user_id: row.get(1)?,
                    dm_target: row.get(2)?,
                })
            })?;
            let mut contacts = Vec::new();
            for row in rows {
                contacts.push(row?);
            }
            Ok(contacts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_team() {
        let (db, _dir) = setup_db().await;
        let team = Team {
            id: "team-1".into(),
            name: "Rust Belt Robotics".into(),
            guild_id: Some("guild-9".into()),
        };
        create_team(&db, &team).await.unwrap();

        let found = get_team(&db, "team-1").await.unwrap().unwrap();
        assert_eq!(found, team);
        assert!(get_team(&db, "nope").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn contacts_preserve_registration_order() {
        let (db, _dir) = setup_db().await;
        let team = Team {
            id: "team-1".into(),
            name: "T".into(),
            guild_id: None,
        };
        create_team(&db, &team).await.unwrap();

        for (user, dm) in [("mentor-a", Some("dm-a")), ("mentor-b", None)] {
            add_contact(
                &db,
                &YppContact {
                    team_id: "team-1".into(),
                    user_id: user.into(),
                    dm_target: dm.map(String::from),
                },
            )
            .await
            .unwrap();
        }

        let contacts = contacts_for_team(&db, "team-1").await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].user_id, "mentor-a");
        assert_eq!(contacts[1].user_id, "mentor-b");
        assert!(contacts[1].dm_target.is_none());
        db.close().await.unwrap();
    }
}
