//! Repository for the `payslips`, `payslip_lines`, `payslip_statutory`, and
//! `payslip_source_days` tables.

use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::payslip::{
    NewPayslip, Payslip, PayslipFactsRow, PayslipLine, PayslipStatutory,
};

/// Column list for payslips queries.
const COLUMNS: &str = "id, run_id, employee_id, status, error_code, error_message, \
    wage_type, base_rate, pay_frequency, gross, total_statutory_employee, \
    total_adjustments, net, ot_minutes, created_at, updated_at";

/// Column list for payslip_lines queries.
const LINE_COLUMNS: &str = "id, payslip_id, category, description, quantity, rate, \
    multiplier, amount, created_at, updated_at";

/// Column list for payslip_statutory queries.
const STATUTORY_COLUMNS: &str = "id, payslip_id, kind, table_version, employee_share, \
    employer_share, created_at, updated_at";

/// Provides operations for payslips and their child rows.
pub struct PayslipRepo;

impl PayslipRepo {
    /// Insert one payslip with its lines, statutory breakdown, and source day
    /// references in a single transaction.
    pub async fn create(
        pool: &PgPool,
        run_id: DbId,
        input: &NewPayslip,
    ) -> Result<Payslip, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO payslips
                (run_id, employee_id, status, error_code, error_message,
                 wage_type, base_rate, pay_frequency, gross,
                 total_statutory_employee, total_adjustments, net, ot_minutes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let payslip = sqlx::query_as::<_, Payslip>(&query)
            .bind(run_id)
            .bind(input.employee_id)
            .bind(&input.status)
            .bind(&input.error_code)
            .bind(&input.error_message)
            .bind(&input.wage_type)
            .bind(input.base_rate)
            .bind(&input.pay_frequency)
            .bind(input.gross)
            .bind(input.total_statutory_employee)
            .bind(input.total_adjustments)
            .bind(input.net)
            .bind(input.ot_minutes)
            .fetch_one(&mut *tx)
            .await?;

        for line in &input.lines {
            sqlx::query(
                "INSERT INTO payslip_lines
                    (payslip_id, category, description, quantity, rate, multiplier, amount)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(payslip.id)
            .bind(&line.category)
            .bind(&line.description)
            .bind(line.quantity)
            .bind(line.rate)
            .bind(line.multiplier)
            .bind(line.amount)
            .execute(&mut *tx)
            .await?;
        }

        for row in &input.statutory {
            sqlx::query(
                "INSERT INTO payslip_statutory
                    (payslip_id, kind, table_version, employee_share, employer_share)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(payslip.id)
            .bind(&row.kind)
            .bind(row.table_version)
            .bind(row.employee_share)
            .bind(row.employer_share)
            .execute(&mut *tx)
            .await?;
        }

        for &day_id in &input.source_day_ids {
            sqlx::query(
                "INSERT INTO payslip_source_days (payslip_id, attendance_day_id)
                 VALUES ($1, $2)",
            )
            .bind(payslip.id)
            .bind(day_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(payslip)
    }

    /// Find a payslip by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payslip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payslips WHERE id = $1");
        sqlx::query_as::<_, Payslip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a run's payslips, ordered by employee.
    pub async fn list_for_run(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Vec<Payslip>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payslips
             WHERE run_id = $1
             ORDER BY employee_id ASC"
        );
        sqlx::query_as::<_, Payslip>(&query)
            .bind(run_id)
            .fetch_all(pool)
            .await
    }

    /// List a payslip's lines in insertion order.
    pub async fn list_lines(
        pool: &PgPool,
        payslip_id: DbId,
    ) -> Result<Vec<PayslipLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM payslip_lines
             WHERE payslip_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, PayslipLine>(&query)
            .bind(payslip_id)
            .fetch_all(pool)
            .await
    }

    /// List a payslip's statutory breakdown.
    pub async fn list_statutory(
        pool: &PgPool,
        payslip_id: DbId,
    ) -> Result<Vec<PayslipStatutory>, sqlx::Error> {
        let query = format!(
            "SELECT {STATUTORY_COLUMNS} FROM payslip_statutory
             WHERE payslip_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, PayslipStatutory>(&query)
            .bind(payslip_id)
            .fetch_all(pool)
            .await
    }

    /// Delete all payslips for a run. Child rows go with them via cascade.
    pub async fn delete_for_run(pool: &PgPool, run_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payslips WHERE run_id = $1")
            .bind(run_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Per-employee gross and OT facts for a run's computed payslips, for the
    /// run-to-run diff.
    pub async fn facts_for_run(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Vec<PayslipFactsRow>, sqlx::Error> {
        sqlx::query_as::<_, PayslipFactsRow>(
            "SELECT employee_id, gross, ot_minutes FROM payslips
             WHERE run_id = $1 AND status = 'computed'
             ORDER BY employee_id ASC",
        )
        .bind(run_id)
        .fetch_all(pool)
        .await
    }

    /// Year-to-date sum of a category's line amounts across released runs.
    /// Used for thirteenth month pay, which accrues from basic pay.
    pub async fn ytd_category_total(
        pool: &PgPool,
        employee_id: DbId,
        year: i32,
        category: &str,
    ) -> Result<rust_decimal::Decimal, sqlx::Error> {
        let (total,): (Option<rust_decimal::Decimal>,) = sqlx::query_as(
            "SELECT SUM(pl.amount)
             FROM payslip_lines pl
             JOIN payslips p ON p.id = pl.payslip_id
             JOIN payroll_runs r ON r.id = p.run_id
             JOIN pay_periods pp ON pp.id = r.pay_period_id
             WHERE p.employee_id = $1
               AND pl.category = $2
               AND r.status = 'released'
               AND EXTRACT(YEAR FROM pp.end_date) = $3",
        )
        .bind(employee_id)
        .bind(category)
        .bind(year)
        .fetch_one(pool)
        .await?;
        Ok(total.unwrap_or_default())
    }
}
