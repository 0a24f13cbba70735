//! Tenant and actor extraction.
//!
//! Identity is established upstream (gateway or reverse proxy) and forwarded
//! as headers. Handlers receive a [`RequestContext`] extractor; requests
//! without both headers are rejected before any handler code runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use suweldo_core::context::RequestContext;
use suweldo_core::types::DbId;

/// Header carrying the tenant (company) id.
pub const COMPANY_ID_HEADER: &str = "x-company-id";

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Newtype extractor wrapping the core [`RequestContext`].
#[derive(Debug, Clone, Copy)]
pub struct Ctx(pub RequestContext);

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let company_id = parse_header(parts, COMPANY_ID_HEADER)?;
        let user_id = parse_header(parts, USER_ID_HEADER)?;
        Ok(Ctx(RequestContext::new(company_id, user_id)))
    }
}

fn parse_header(parts: &Parts, name: &'static str) -> Result<DbId, Response> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<DbId>().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({
                    "error": format!("Missing or invalid {name} header"),
                    "code": "MISSING_CONTEXT",
                })),
            )
                .into_response()
        })
}
