//! Repository for the `pay_periods` and `payroll_runs` tables.

use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::payroll_run::{CreatePayPeriod, PayPeriod, PayrollRun};

/// Column list for pay_periods queries.
const PERIOD_COLUMNS: &str =
    "id, company_id, start_date, end_date, frequency, created_at, updated_at";

/// Column list for payroll_runs queries.
const RUN_COLUMNS: &str = "id, company_id, pay_period_id, status, created_by_id, \
    approved_by_id, computed_at, approved_at, released_at, cancelled_at, \
    created_at, updated_at";

/// Provides operations for pay periods.
pub struct PayPeriodRepo;

impl PayPeriodRepo {
    /// Insert a new pay period, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreatePayPeriod,
    ) -> Result<PayPeriod, sqlx::Error> {
        let query = format!(
            "INSERT INTO pay_periods (company_id, start_date, end_date, frequency)
             VALUES ($1, $2, $3, $4)
             RETURNING {PERIOD_COLUMNS}"
        );
        sqlx::query_as::<_, PayPeriod>(&query)
            .bind(company_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.frequency)
            .fetch_one(pool)
            .await
    }

    /// Find a pay period by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<PayPeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {PERIOD_COLUMNS} FROM pay_periods WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, PayPeriod>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's pay periods, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<PayPeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {PERIOD_COLUMNS} FROM pay_periods
             WHERE company_id = $1
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, PayPeriod>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// The period immediately before the given one, matching its frequency.
    /// Used to pick the prior run for the review diff.
    pub async fn find_prior(
        pool: &PgPool,
        company_id: DbId,
        period_id: DbId,
    ) -> Result<Option<PayPeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {PERIOD_COLUMNS} FROM pay_periods p
             WHERE p.company_id = $1
               AND p.frequency = (SELECT frequency FROM pay_periods WHERE id = $2)
               AND p.end_date < (SELECT start_date FROM pay_periods WHERE id = $2)
             ORDER BY p.end_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PayPeriod>(&query)
            .bind(company_id)
            .bind(period_id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides operations for payroll runs and their status transitions.
pub struct PayrollRunRepo;

impl PayrollRunRepo {
    /// Insert a new draft run, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        pay_period_id: DbId,
        created_by_id: DbId,
    ) -> Result<PayrollRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO payroll_runs (company_id, pay_period_id, created_by_id)
             VALUES ($1, $2, $3)
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(company_id)
            .bind(pay_period_id)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Find a run by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let query = format!(
            "SELECT {RUN_COLUMNS} FROM payroll_runs WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's runs, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<PayrollRun>, sqlx::Error> {
        let query = format!(
            "SELECT {RUN_COLUMNS} FROM payroll_runs
             WHERE company_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// The latest run for a period whose payslips are worth diffing against:
    /// the most recent approved or released run, falling back to the most
    /// recent computed one.
    pub async fn find_latest_for_period(
        pool: &PgPool,
        company_id: DbId,
        pay_period_id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let query = format!(
            "SELECT {RUN_COLUMNS} FROM payroll_runs
             WHERE company_id = $1 AND pay_period_id = $2 AND status != 'cancelled'
             ORDER BY
                CASE status
                    WHEN 'released' THEN 0
                    WHEN 'approved' THEN 1
                    ELSE 2
                END,
                created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(company_id)
            .bind(pay_period_id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim a run for computation. The status guard makes
    /// concurrent compute requests lose the race instead of double-writing.
    /// Returns `None` when the run was not in a recomputable status.
    pub async fn try_begin_compute(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let query = format!(
            "UPDATE payroll_runs SET status = 'computing'
             WHERE id = $1 AND company_id = $2 AND status IN ('draft', 'review')
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a computing run to review and stamp computed_at.
    pub async fn finish_compute(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let query = format!(
            "UPDATE payroll_runs SET status = 'review', computed_at = now()
             WHERE id = $1 AND status = 'computing'
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Put a failed compute back to draft so the run can be retried.
    pub async fn abort_compute(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE payroll_runs SET status = 'draft'
             WHERE id = $1 AND status = 'computing'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Approve a run and lock every attendance day its payslips consumed,
    /// in one transaction. Rolls back when another run for the same period
    /// is already approved or released.
    pub async fn approve_and_lock(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        approver_id: DbId,
    ) -> Result<ApproveOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (conflict,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM payroll_runs other
                WHERE other.pay_period_id =
                    (SELECT pay_period_id FROM payroll_runs WHERE id = $1)
                  AND other.id != $1
                  AND other.status IN ('approved', 'released')
             )",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if conflict {
            tx.rollback().await?;
            return Ok(ApproveOutcome::PeriodAlreadyApproved);
        }

        let query = format!(
            "UPDATE payroll_runs SET
                status = 'approved',
                approved_by_id = $1,
                approved_at = now()
             WHERE id = $2 AND company_id = $3 AND status = 'review'
             RETURNING {RUN_COLUMNS}"
        );
        let run = sqlx::query_as::<_, PayrollRun>(&query)
            .bind(approver_id)
            .bind(id)
            .bind(company_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(run) = run else {
            tx.rollback().await?;
            return Ok(ApproveOutcome::NotInReview);
        };

        sqlx::query(
            "UPDATE attendance_days SET is_locked = TRUE
             WHERE id IN (
                SELECT sd.attendance_day_id
                FROM payslip_source_days sd
                JOIN payslips p ON p.id = sd.payslip_id
                WHERE p.run_id = $1
             )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ApproveOutcome::Approved(run))
    }

    /// Move an approved run to released.
    pub async fn release(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let query = format!(
            "UPDATE payroll_runs SET status = 'released', released_at = now()
             WHERE id = $1 AND company_id = $2 AND status = 'approved'
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, PayrollRun>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a draft or in-review run. Its payslips are removed so a later
    /// run for the same period starts clean.
    pub async fn cancel(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<PayrollRun>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE payroll_runs SET status = 'cancelled', cancelled_at = now()
             WHERE id = $1 AND company_id = $2 AND status IN ('draft', 'review')
             RETURNING {RUN_COLUMNS}"
        );
        let run = sqlx::query_as::<_, PayrollRun>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(&mut *tx)
            .await?;

        if run.is_some() {
            sqlx::query("DELETE FROM payslips WHERE run_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(run)
    }
}

/// Result of an approval attempt.
#[derive(Debug)]
pub enum ApproveOutcome {
    Approved(PayrollRun),
    /// The run was not in review when the approval landed.
    NotInReview,
    /// Another run for the same period is already approved or released.
    PeriodAlreadyApproved,
}
