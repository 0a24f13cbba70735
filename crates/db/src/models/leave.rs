//! Approved leave models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `leave_approvals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveApproval {
    pub id: DbId,
    pub company_id: DbId,
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an approved leave.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeaveApproval {
    pub employee_id: DbId,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
