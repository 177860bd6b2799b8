//! AuditLogger - Audit trail for access decisions

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: String,
    pub event_type: AuditEventType,
    pub user_id: String,
    pub role: String,
    /// Required permission as `module:action:resource`
    pub permission: Option<String>,
    pub route: Option<String>,
    pub success: bool,
    pub reason: Option<String>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    AccessGranted,
    AccessDenied,
    TemplateAssigned,
    SuperuserExpanded,
}

/// Audit logger
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
        }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    fn entry(&self, event_type: AuditEventType, user_id: &str, role: &str, success: bool) -> AuditEntry {
        AuditEntry {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type,
            user_id: user_id.to_string(),
            role: role.to_string(),
            permission: None,
            route: None,
            success,
            reason: None,
        }
    }

    /// Log an access decision
    pub fn log_access(
        &mut self,
        user_id: &str,
        role: &str,
        permission: &str,
        route: Option<&str>,
        granted: bool,
        reason: Option<&str>,
    ) {
        let event_type = if granted {
            AuditEventType::AccessGranted
        } else {
            AuditEventType::AccessDenied
        };
        let mut entry = self.entry(event_type, user_id, role, granted);
        entry.permission = Some(permission.to_string());
        entry.route = route.map(|r| r.to_string());
        entry.reason = reason.map(|s| s.to_string());
        self.log(entry);
    }

    /// Log a denied request for a route that has no registered requirement
    pub fn log_unknown_route(&mut self, user_id: &str, role: &str, route: &str) {
        let mut entry = self.entry(AuditEventType::AccessDenied, user_id, role, false);
        entry.route = Some(route.to_string());
        entry.reason = Some("Route not registered".to_string());
        self.log(entry);
    }

    /// Log a role template assignment
    pub fn log_template_assigned(&mut self, user_id: &str, from_role: &str, to_role: &str) {
        let mut entry = self.entry(AuditEventType::TemplateAssigned, user_id, to_role, true);
        entry.reason = Some(format!("Assigned from '{}'", from_role));
        self.log(entry);
    }

    /// Log that a role was expanded to the superuser tuple
    pub fn log_superuser_expansion(&mut self, user_id: &str, role: &str) {
        let mut entry = self.entry(AuditEventType::SuperuserExpanded, user_id, role, true);
        entry.permission = Some("*:*:*".to_string());
        entry.reason = Some(format!("Role '{}' is a superuser role", role));
        self.log(entry);
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent denials, newest first
    pub fn get_recent_denials(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(limit)
            .collect()
    }

    /// Entries for one user, oldest first
    pub fn entries_for_user(&self, user_id: &str) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.user_id == user_id).collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let count = |t: AuditEventType| self.entries.iter().filter(|e| e.event_type == t).count();

        AuditStats {
            total_entries: self.entries.len(),
            denial_count: self.entries.iter().filter(|e| !e.success).count(),
            assignment_count: count(AuditEventType::TemplateAssigned),
            superuser_count: count(AuditEventType::SuperuserExpanded),
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub denial_count: usize,
    pub assignment_count: usize,
    pub superuser_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}
