//! Repository for the `statutory_brackets` table.

use sqlx::PgPool;

use crate::models::statutory::{CreateBracket, StatutoryBracket};

/// Column list for statutory_brackets queries.
const COLUMNS: &str = "id, kind, version, floor, ceiling, employee_fixed, employee_rate, \
    employer_fixed, employer_rate, rate_base, is_active, created_at, updated_at";

/// Provides operations for versioned statutory bracket tables.
pub struct StatutoryRepo;

impl StatutoryRepo {
    /// The active bracket set for one contribution kind, in floor order.
    pub async fn active_brackets(
        pool: &PgPool,
        kind: &str,
    ) -> Result<Vec<StatutoryBracket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM statutory_brackets
             WHERE kind = $1 AND is_active = TRUE
             ORDER BY floor ASC"
        );
        sqlx::query_as::<_, StatutoryBracket>(&query)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// Publish a new table version for one kind: deactivate the current
    /// version and insert the new brackets as active, in one transaction.
    pub async fn publish_version(
        pool: &PgPool,
        kind: &str,
        brackets: &[CreateBracket],
    ) -> Result<Vec<StatutoryBracket>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (next_version,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM statutory_brackets WHERE kind = $1",
        )
        .bind(kind)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE statutory_brackets SET is_active = FALSE WHERE kind = $1")
            .bind(kind)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO statutory_brackets
                (kind, version, floor, ceiling, employee_fixed, employee_rate,
                 employer_fixed, employer_rate, rate_base)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(brackets.len());
        for bracket in brackets {
            let row = sqlx::query_as::<_, StatutoryBracket>(&insert)
                .bind(kind)
                .bind(next_version)
                .bind(bracket.floor)
                .bind(bracket.ceiling)
                .bind(bracket.employee_fixed)
                .bind(bracket.employee_rate)
                .bind(bracket.employer_fixed)
                .bind(bracket.employer_rate)
                .bind(&bracket.rate_base)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }
}
