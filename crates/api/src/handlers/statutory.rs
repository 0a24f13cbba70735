//! Handlers for statutory bracket tables.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use suweldo_core::statutory::ContributionKind;
use suweldo_db::models::statutory::CreateBracketTable;
use suweldo_db::repositories::StatutoryRepo;

use crate::context::Ctx;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/statutory/{kind}
///
/// The active bracket table for one contribution kind.
pub async fn get_active_table(
    Ctx(_ctx): Ctx,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = ContributionKind::parse(&kind)?;
    let brackets = StatutoryRepo::active_brackets(&state.pool, kind.as_str()).await?;
    Ok(Json(DataResponse { data: brackets }))
}

/// POST /api/v1/statutory
///
/// Publish a new table version: the previous version is deactivated, runs
/// computed afterwards pick up the new brackets, and already-written payslips
/// keep the version number they were computed against.
pub async fn publish_table(
    Ctx(ctx): Ctx,
    State(state): State<AppState>,
    Json(input): Json<CreateBracketTable>,
) -> AppResult<impl IntoResponse> {
    let kind = ContributionKind::parse(&input.kind)?;
    if input.brackets.is_empty() {
        return Err(AppError::BadRequest(
            "A bracket table needs at least one bracket".to_string(),
        ));
    }
    for bracket in &input.brackets {
        if !matches!(bracket.rate_base.as_str(), "gross" | "excess_over_floor") {
            return Err(AppError::BadRequest(format!(
                "Unknown rate base '{}'",
                bracket.rate_base
            )));
        }
    }

    let brackets =
        StatutoryRepo::publish_version(&state.pool, kind.as_str(), &input.brackets).await?;

    tracing::info!(
        user_id = ctx.user_id,
        kind = kind.as_str(),
        version = brackets.first().map(|b| b.version).unwrap_or(0),
        brackets = brackets.len(),
        "Statutory bracket table published"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: brackets })))
}
