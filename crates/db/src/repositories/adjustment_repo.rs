//! Repository for the `manual_adjustments` table.

use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::payslip::{CreateManualAdjustment, ManualAdjustment};

/// Column list for manual_adjustments queries.
const COLUMNS: &str = "id, company_id, pay_period_id, employee_id, kind, description, \
    amount, created_at, updated_at";

/// Provides operations for manual commissions and deductions.
pub struct AdjustmentRepo;

impl AdjustmentRepo {
    /// Insert a new adjustment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateManualAdjustment,
    ) -> Result<ManualAdjustment, sqlx::Error> {
        let query = format!(
            "INSERT INTO manual_adjustments
                (company_id, pay_period_id, employee_id, kind, description, amount)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualAdjustment>(&query)
            .bind(company_id)
            .bind(input.pay_period_id)
            .bind(input.employee_id)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(input.amount)
            .fetch_one(pool)
            .await
    }

    /// List the adjustments for one employee in one pay period.
    pub async fn list_for_employee_period(
        pool: &PgPool,
        pay_period_id: DbId,
        employee_id: DbId,
    ) -> Result<Vec<ManualAdjustment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manual_adjustments
             WHERE pay_period_id = $1 AND employee_id = $2
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ManualAdjustment>(&query)
            .bind(pay_period_id)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// List all adjustments for a pay period.
    pub async fn list_for_period(
        pool: &PgPool,
        pay_period_id: DbId,
    ) -> Result<Vec<ManualAdjustment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manual_adjustments
             WHERE pay_period_id = $1
             ORDER BY employee_id ASC, id ASC"
        );
        sqlx::query_as::<_, ManualAdjustment>(&query)
            .bind(pay_period_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an adjustment by ID. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM manual_adjustments WHERE id = $1 AND company_id = $2")
                .bind(id)
                .bind(company_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
