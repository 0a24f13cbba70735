//! Employee models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use suweldo_core::types::{DbId, Timestamp};

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub company_id: DbId,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub shift_template_id: Option<DbId>,
    /// ISO weekday numbers, 1 = Monday .. 7 = Sunday.
    pub rest_days: Vec<i16>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub shift_template_id: Option<DbId>,
    pub rest_days: Option<Vec<i16>>,
}

/// DTO for updating an employee. Only provided fields change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub shift_template_id: Option<DbId>,
    pub rest_days: Option<Vec<i16>>,
    pub is_active: Option<bool>,
}
