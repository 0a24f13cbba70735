//! Repository for the `employees` table.

use sqlx::PgPool;
use suweldo_core::types::DbId;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};

/// Column list for employees queries.
const COLUMNS: &str = "id, company_id, employee_code, first_name, last_name, \
    shift_template_id, rest_days, is_active, created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateEmployee,
    ) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (company_id, employee_code, first_name, last_name, shift_template_id, rest_days)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{6,7}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(company_id)
            .bind(&input.employee_code)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.shift_template_id)
            .bind(input.rest_days.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find an employee by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees WHERE id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an employee by its company-scoped code.
    pub async fn find_by_code(
        pool: &PgPool,
        company_id: DbId,
        employee_code: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE company_id = $1 AND employee_code = $2"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(company_id)
            .bind(employee_code)
            .fetch_optional(pool)
            .await
    }

    /// List all active employees for a company, ordered by employee code.
    pub async fn list_active(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE company_id = $1 AND is_active = TRUE
             ORDER BY employee_code ASC"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                shift_template_id = COALESCE($3, shift_template_id),
                rest_days = COALESCE($4, rest_days),
                is_active = COALESCE($5, is_active)
             WHERE id = $6 AND company_id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.shift_template_id)
            .bind(input.rest_days.as_deref())
            .bind(input.is_active)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }
}
