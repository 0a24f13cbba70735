//! Repository for the `shift_templates` table.

use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::shift_template::{CreateShiftTemplate, ShiftTemplate, UpdateShiftTemplate};

/// Column list for shift_templates queries.
const COLUMNS: &str = "id, company_id, code, name, start_time, end_time, is_overnight, \
    break_minutes, grace_late_min, grace_early_out_min, created_at, updated_at";

/// Provides CRUD operations for shift templates.
pub struct ShiftTemplateRepo;

impl ShiftTemplateRepo {
    /// Insert a new shift template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateShiftTemplate,
    ) -> Result<ShiftTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO shift_templates
                (company_id, code, name, start_time, end_time, is_overnight,
                 break_minutes, grace_late_min, grace_early_out_min)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShiftTemplate>(&query)
            .bind(company_id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.is_overnight)
            .bind(input.break_minutes)
            .bind(input.grace_late_min)
            .bind(input.grace_early_out_min)
            .fetch_one(pool)
            .await
    }

    /// Find a shift template by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<ShiftTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shift_templates WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, ShiftTemplate>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List all shift templates for a company, ordered by code.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<ShiftTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shift_templates
             WHERE company_id = $1
             ORDER BY code ASC"
        );
        sqlx::query_as::<_, ShiftTemplate>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        input: &UpdateShiftTemplate,
    ) -> Result<Option<ShiftTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE shift_templates SET
                name = COALESCE($1, name),
                start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time),
                is_overnight = COALESCE($4, is_overnight),
                break_minutes = COALESCE($5, break_minutes),
                grace_late_min = COALESCE($6, grace_late_min),
                grace_early_out_min = COALESCE($7, grace_early_out_min)
             WHERE id = $8 AND company_id = $9
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShiftTemplate>(&query)
            .bind(&input.name)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.is_overnight)
            .bind(input.break_minutes)
            .bind(input.grace_late_min)
            .bind(input.grace_early_out_min)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Count locked attendance days belonging to employees on this template.
    /// A non-zero count blocks schedule edits that would rewrite history.
    pub async fn count_locked_references(
        pool: &PgPool,
        id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM attendance_days a
             JOIN employees e ON e.id = a.employee_id
             WHERE e.shift_template_id = $1 AND a.is_locked = TRUE",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
