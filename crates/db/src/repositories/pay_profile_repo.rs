//! Repository for the `pay_profiles` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::pay_profile::{CreatePayProfile, PayProfile};

/// Column list for pay_profiles queries.
const COLUMNS: &str = "id, company_id, employee_id, wage_type, base_rate, pay_frequency, \
    effective_date, created_at, updated_at";

/// Provides operations for versioned pay profiles.
pub struct PayProfileRepo;

impl PayProfileRepo {
    /// Insert a new pay profile version, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreatePayProfile,
    ) -> Result<PayProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO pay_profiles
                (company_id, employee_id, wage_type, base_rate, pay_frequency, effective_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayProfile>(&query)
            .bind(company_id)
            .bind(input.employee_id)
            .bind(&input.wage_type)
            .bind(input.base_rate)
            .bind(&input.pay_frequency)
            .bind(input.effective_date)
            .fetch_one(pool)
            .await
    }

    /// The profile version in effect on a given date: the latest one with
    /// `effective_date <= as_of`.
    pub async fn effective_for(
        pool: &PgPool,
        employee_id: DbId,
        as_of: NaiveDate,
    ) -> Result<Option<PayProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pay_profiles
             WHERE employee_id = $1 AND effective_date <= $2
             ORDER BY effective_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PayProfile>(&query)
            .bind(employee_id)
            .bind(as_of)
            .fetch_optional(pool)
            .await
    }

    /// List all profile versions for an employee, newest first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<PayProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pay_profiles
             WHERE employee_id = $1
             ORDER BY effective_date DESC"
        );
        sqlx::query_as::<_, PayProfile>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
