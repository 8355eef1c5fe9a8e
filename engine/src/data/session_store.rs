// Holds the last workbook loaded by each dashboard session.
use chrono::{DateTime, Duration, Utc};
use shared::models::ProjectTable;
use std::collections::HashMap;

use super::workbook::Workbook;
use crate::error::EngineError;

struct Session {
    workbook: Workbook,
    last_access: DateTime<Utc>,
}

pub struct SessionStore {
    sessions: HashMap<String, Session>,
    ttl: Duration,
}

/// Longest accepted idle time: ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 3600;

impl SessionStore {
    /// `ttl_secs` is clamped to `1..=MAX_SESSION_TTL_SECS`.
    pub fn new(ttl_secs: i64) -> Self {
        SessionStore {
            sessions: HashMap::new(),
            ttl: Duration::seconds(ttl_secs.clamp(1, MAX_SESSION_TTL_SECS)),
        }
    }

    /// Stores `workbook` for `session_id`, replacing any earlier one, and drops
    /// sessions idle for longer than the ttl.
    pub fn insert(&mut self, session_id: &str, workbook: Workbook, now: DateTime<Utc>) {
        let pruned = self.prune_idle(now);
        if pruned > 0 {
            tracing::info!(pruned, "Dropped idle sessions");
        }
        self.sessions.insert(
            session_id.to_string(),
            Session { workbook, last_access: now },
        );
    }

    pub fn sheet_names(&mut self, session_id: &str, now: DateTime<Utc>) -> Result<Vec<String>, EngineError> {
        let session = self.touch(session_id, now)?;
        Ok(session.workbook.sheet_names())
    }

    /// Returns a copy of one sheet so the store lock is not held during evaluation.
    pub fn table(&mut self, session_id: &str, sheet_name: &str, now: DateTime<Utc>) -> Result<ProjectTable, EngineError> {
        let session = self.touch(session_id, now)?;
        session
            .workbook
            .sheet(sheet_name)
            .cloned()
            .ok_or_else(|| {
                EngineError::SessionError(format!(
                    "Sheet '{}' not found in session '{}'",
                    sheet_name, session_id
                ))
            })
    }

    pub fn prune_idle(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, s| now - s.last_access <= ttl);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn touch(&mut self, session_id: &str, now: DateTime<Utc>) -> Result<&Session, EngineError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| EngineError::SessionError(format!("Session '{}' not found", session_id)))?;
        session.last_access = now;
        Ok(session)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    fn workbook(sheet: &str, value: f64) -> Workbook {
        Workbook {
            sheets: vec![(
                sheet.to_string(),
                ProjectTable::new(vec!["Revenues".into()], vec![vec![CellValue::Number(value)]]),
            )],
        }
    }

    #[test]
    fn test_insert_and_read_back() {
        let now = Utc::now();
        let mut store = SessionStore::default();
        store.insert("a", workbook("Flux", 1.0), now);
        assert_eq!(store.sheet_names("a", now).unwrap(), vec!["Flux".to_string()]);
        let table = store.table("a", "Flux", now).unwrap();
        assert_eq!(table.numeric_column("Revenues").unwrap(), vec![1.0]);
    }

    #[test]
    fn test_sessions_are_isolated_and_replaced() {
        let now = Utc::now();
        let mut store = SessionStore::default();
        store.insert("a", workbook("Flux", 1.0), now);
        store.insert("b", workbook("Flux", 2.0), now);
        store.insert("a", workbook("Autre", 3.0), now);
        assert_eq!(store.len(), 2);
        assert!(store.table("a", "Flux", now).is_err());
        assert_eq!(store.table("a", "Autre", now).unwrap().numeric_column("Revenues").unwrap(), vec![3.0]);
        assert_eq!(store.table("b", "Flux", now).unwrap().numeric_column("Revenues").unwrap(), vec![2.0]);
    }

    #[test]
    fn test_unknown_session_and_sheet() {
        let now = Utc::now();
        let mut store = SessionStore::default();
        match store.sheet_names("missing", now) {
            Err(EngineError::SessionError(msg)) => assert!(msg.contains("not found")),
            other => panic!("unexpected: {:?}", other),
        }
        store.insert("a", workbook("Flux", 1.0), now);
        match store.table("a", "Nope", now) {
            Err(EngineError::SessionError(msg)) => assert!(msg.contains("Sheet 'Nope' not found")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_idle_sessions_are_pruned() {
        let start = Utc::now();
        let mut store = SessionStore::new(60);
        store.insert("old", workbook("Flux", 1.0), start);
        store.insert("recent", workbook("Flux", 1.0), start + Duration::seconds(50));
        store.insert("new", workbook("Flux", 1.0), start + Duration::seconds(90));
        assert_eq!(store.len(), 2);
        assert!(store.table("old", "Flux", start + Duration::seconds(90)).is_err());
    }

    #[test]
    fn test_access_keeps_session_alive() {
        let start = Utc::now();
        let mut store = SessionStore::new(60);
        store.insert("a", workbook("Flux", 1.0), start);
        store.table("a", "Flux", start + Duration::seconds(45)).unwrap();
        assert_eq!(store.prune_idle(start + Duration::seconds(100)), 0);
        assert_eq!(store.prune_idle(start + Duration::seconds(106)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let start = Utc::now();
        let mut store = SessionStore::new(i64::MAX);
        store.insert("a", workbook("Flux", 1.0), start);
        assert_eq!(store.prune_idle(start + Duration::days(365)), 0);
        assert_eq!(store.len(), 1);
    }
}
