//! Per-request tenant and actor context.
//!
//! Every core operation that scopes data by company or attributes an action
//! to a user takes a [`RequestContext`] parameter explicitly. There is no
//! ambient/global session state anywhere in the engine.

use crate::types::DbId;

/// Identifies the tenant and acting user for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Tenant scope. All reads and writes are restricted to this company.
    pub company_id: DbId,
    /// The authenticated user performing the operation.
    pub user_id: DbId,
}

impl RequestContext {
    pub fn new(company_id: DbId, user_id: DbId) -> Self {
        Self {
            company_id,
            user_id,
        }
    }
}
