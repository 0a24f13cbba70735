//! Repository for the `leave_approvals` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::leave::{CreateLeaveApproval, LeaveApproval};

/// Column list for leave_approvals queries.
const COLUMNS: &str =
    "id, company_id, employee_id, leave_type, start_date, end_date, created_at, updated_at";

/// Provides operations for approved leave records.
pub struct LeaveRepo;

impl LeaveRepo {
    /// Insert an approved leave, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateLeaveApproval,
    ) -> Result<LeaveApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO leave_approvals
                (company_id, employee_id, leave_type, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaveApproval>(&query)
            .bind(company_id)
            .bind(input.employee_id)
            .bind(&input.leave_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// List one employee's approved leaves overlapping a date range.
    pub async fn list_for_employee_range(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leave_approvals
             WHERE employee_id = $1 AND start_date <= $3 AND end_date >= $2
             ORDER BY start_date ASC"
        );
        sqlx::query_as::<_, LeaveApproval>(&query)
            .bind(employee_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
