//! Audit event emission.
//!
//! The engine's obligation is to emit a structured record of
//! (actor, action, entity, before/after) on every run state transition and
//! every locked-record mutation attempt. Persistence belongs to an external
//! audit log that consumes the `audit` tracing target.

use serde::Serialize;

use crate::context::RequestContext;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known audit action types.
pub mod actions {
    pub const RUN_CREATED: &str = "run_created";
    pub const RUN_COMPUTE_STARTED: &str = "run_compute_started";
    pub const RUN_COMPUTED: &str = "run_computed";
    pub const RUN_APPROVED: &str = "run_approved";
    pub const RUN_RELEASED: &str = "run_released";
    pub const RUN_CANCELLED: &str = "run_cancelled";
    pub const RECORDS_LOCKED: &str = "records_locked";
    pub const LOCKED_MUTATION_REJECTED: &str = "locked_mutation_rejected";
    pub const ATTENDANCE_OVERRIDDEN: &str = "attendance_overridden";
    pub const CALENDAR_EVENT_CREATED: &str = "calendar_event_created";
    pub const CALENDAR_EVENT_UPDATED: &str = "calendar_event_updated";
    pub const CALENDAR_EVENT_DELETED: &str = "calendar_event_deleted";
    pub const CALENDAR_EVENT_REJECTED: &str = "calendar_event_rejected";
    pub const SHIFT_TEMPLATE_UPDATED: &str = "shift_template_updated";
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One structured audit record.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub actor_id: DbId,
    pub company_id: DbId,
    pub action: &'static str,
    pub entity: &'static str,
    pub entity_id: DbId,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        ctx: &RequestContext,
        action: &'static str,
        entity: &'static str,
        entity_id: DbId,
    ) -> Self {
        Self {
            actor_id: ctx.user_id,
            company_id: ctx.company_id,
            action,
            entity,
            entity_id,
            before: None,
            after: None,
        }
    }

    pub fn with_before(mut self, before: serde_json::Value) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_after(mut self, after: serde_json::Value) -> Self {
        self.after = Some(after);
        self
    }

    /// Emit the event on the `audit` tracing target.
    pub fn emit(self) {
        tracing::info!(
            target: "audit",
            actor_id = self.actor_id,
            company_id = self.company_id,
            action = self.action,
            entity = self.entity,
            entity_id = self.entity_id,
            before = self.before.as_ref().map(|v| v.to_string()),
            after = self.after.as_ref().map(|v| v.to_string()),
            "audit event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new(1, 42)
    }

    #[test]
    fn event_carries_actor_and_tenant() {
        let event = AuditEvent::new(&ctx(), actions::RUN_APPROVED, "payroll_run", 9);
        assert_eq!(event.actor_id, 42);
        assert_eq!(event.company_id, 1);
        assert_eq!(event.action, "run_approved");
        assert!(event.before.is_none());
    }

    #[test]
    fn before_after_snapshots_attach() {
        let event = AuditEvent::new(&ctx(), actions::CALENDAR_EVENT_UPDATED, "calendar_event", 3)
            .with_before(serde_json::json!({"day_type": "workday"}))
            .with_after(serde_json::json!({"day_type": "regular_holiday"}));
        assert_eq!(event.before.unwrap()["day_type"], "workday");
        assert_eq!(event.after.unwrap()["day_type"], "regular_holiday");
    }
}
