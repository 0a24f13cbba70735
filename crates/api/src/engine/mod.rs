//! The payroll computation engine.
//!
//! Drives a run through compute: claims the run, loads statutory tables and
//! the employee roster, computes one payslip per employee, and moves the run
//! to review. One employee's bad data fails that employee's payslip, never
//! the run; the summary carries the per-error-code tallies reviewers act on.

mod employee;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use suweldo_core::audit::{actions, AuditEvent};
use suweldo_core::context::RequestContext;
use suweldo_core::error::CoreError;
use suweldo_core::statutory::{Bracket, BracketTable, ContributionKind, RateBase, StatutoryTables};
use suweldo_core::timeclock::CalendarDayType;
use suweldo_core::types::DbId;
use suweldo_db::models::payroll_run::{PayPeriod, PayrollRun};
use suweldo_db::models::payslip::NewPayslip;
use suweldo_db::repositories::{
    CalendarRepo, EmployeeRepo, PayPeriodRepo, PayrollRunRepo, PayslipRepo, StatutoryRepo,
};
use suweldo_db::DbPool;

use crate::error::{AppError, AppResult};

pub use employee::compute_employee;

/// Outcome of one run computation.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeSummary {
    pub run_id: DbId,
    pub employees_total: usize,
    pub computed: usize,
    pub failed: usize,
    /// Failure tallies keyed by stable error code.
    pub failures_by_code: BTreeMap<String, usize>,
    /// Non-fatal per-day warning tallies keyed by stable error code, e.g.
    /// incomplete punch pairs.
    pub warnings_by_code: BTreeMap<String, usize>,
}

/// Compute a payroll run end to end.
///
/// Claims the run with a status guard so a concurrent compute request loses
/// the race cleanly. On a fatal error (database failure, missing period) the
/// run is put back to draft for retry.
pub async fn compute_run(
    pool: &DbPool,
    ctx: &RequestContext,
    run_id: DbId,
) -> AppResult<(PayrollRun, ComputeSummary)> {
    let run = PayrollRunRepo::find_by_id(pool, ctx.company_id, run_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayrollRun",
            id: run_id,
        })?;

    let run = PayrollRunRepo::try_begin_compute(pool, ctx.company_id, run_id)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition {
            reason: format!("{} -> computing", run.status),
        })?;

    AuditEvent::new(ctx, actions::RUN_COMPUTE_STARTED, "payroll_run", run_id).emit();

    match compute_run_inner(pool, ctx, &run).await {
        Ok(summary) => {
            let run = PayrollRunRepo::finish_compute(pool, run_id)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError("Run left computing status mid-compute".to_string())
                })?;

            AuditEvent::new(ctx, actions::RUN_COMPUTED, "payroll_run", run_id)
                .with_after(serde_json::json!({
                    "computed": summary.computed,
                    "failed": summary.failed,
                    "failures_by_code": summary.failures_by_code,
                    "warnings_by_code": summary.warnings_by_code,
                }))
                .emit();

            Ok((run, summary))
        }
        Err(err) => {
            PayrollRunRepo::abort_compute(pool, run_id).await?;
            Err(err)
        }
    }
}

async fn compute_run_inner(
    pool: &DbPool,
    ctx: &RequestContext,
    run: &PayrollRun,
) -> AppResult<ComputeSummary> {
    let period = PayPeriodRepo::find_by_id(pool, ctx.company_id, run.pay_period_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayPeriod",
            id: run.pay_period_id,
        })?;

    let tables = load_statutory_tables(pool).await?;
    let events = load_calendar_events(pool, ctx.company_id, &period).await?;

    // A recompute replaces the previous payslips wholesale.
    PayslipRepo::delete_for_run(pool, run.id).await?;

    let employees = EmployeeRepo::list_active(pool, ctx.company_id).await?;
    let today = chrono::Utc::now().date_naive();

    let mut summary = ComputeSummary {
        run_id: run.id,
        employees_total: employees.len(),
        computed: 0,
        failed: 0,
        failures_by_code: BTreeMap::new(),
        warnings_by_code: BTreeMap::new(),
    };

    for emp in &employees {
        let slip = match compute_employee(pool, ctx, emp, &period, &tables, &events, today).await {
            Ok((slip, warnings)) => {
                summary.computed += 1;
                for warning in &warnings {
                    *summary
                        .warnings_by_code
                        .entry(warning.code().to_string())
                        .or_default() += 1;
                }
                slip
            }
            Err(AppError::Core(core)) => {
                summary.failed += 1;
                *summary
                    .failures_by_code
                    .entry(core.code().to_string())
                    .or_default() += 1;
                tracing::warn!(
                    employee_id = emp.id,
                    run_id = run.id,
                    code = core.code(),
                    error = %core,
                    "Payslip computation failed"
                );
                failed_payslip(emp.id, &core)
            }
            // Infrastructure failures abort the whole run.
            Err(other) => return Err(other),
        };
        PayslipRepo::create(pool, run.id, &slip).await?;
    }

    Ok(summary)
}

/// Calendar events covering the period, keyed by date. Every employee in the
/// run sees the same holidays.
async fn load_calendar_events(
    pool: &DbPool,
    company_id: DbId,
    period: &PayPeriod,
) -> AppResult<HashMap<NaiveDate, (DbId, CalendarDayType)>> {
    let rows =
        CalendarRepo::list_events_in_range(pool, company_id, period.start_date, period.end_date)
            .await?;
    let mut events = HashMap::with_capacity(rows.len());
    for row in rows {
        let day_type = CalendarDayType::parse(&row.day_type)?;
        events.insert(row.event_date, (row.id, day_type));
    }
    Ok(events)
}

/// Build the active statutory tables from the database.
///
/// An empty bracket set is loaded as-is; the lookup then misses loudly per
/// employee instead of silently underdeducting.
pub async fn load_statutory_tables(pool: &DbPool) -> AppResult<LoadedTables> {
    let mut versions = BTreeMap::new();

    let sss = load_table(pool, ContributionKind::Sss, &mut versions).await?;
    let philhealth = load_table(pool, ContributionKind::Philhealth, &mut versions).await?;
    let pagibig = load_table(pool, ContributionKind::Pagibig, &mut versions).await?;
    let withholding_tax =
        load_table(pool, ContributionKind::WithholdingTax, &mut versions).await?;

    Ok(LoadedTables {
        tables: StatutoryTables {
            sss,
            philhealth,
            pagibig,
            withholding_tax,
        },
        versions,
    })
}

async fn load_table(
    pool: &DbPool,
    kind: ContributionKind,
    versions: &mut BTreeMap<String, i32>,
) -> AppResult<BracketTable> {
    let rows = StatutoryRepo::active_brackets(pool, kind.as_str()).await?;
    let version = rows.first().map(|r| r.version).unwrap_or(0);
    versions.insert(kind.as_str().to_string(), version);

    let brackets = rows
        .into_iter()
        .map(|row| {
            let rate_base = match row.rate_base.as_str() {
                "excess_over_floor" => RateBase::ExcessOverFloor,
                _ => RateBase::Gross,
            };
            Bracket {
                floor: row.floor,
                ceiling: row.ceiling,
                employee_fixed: row.employee_fixed,
                employee_rate: row.employee_rate,
                employer_fixed: row.employer_fixed,
                employer_rate: row.employer_rate,
                rate_base,
            }
        })
        .collect();

    Ok(BracketTable {
        kind,
        version: version.to_string(),
        brackets,
    })
}

/// Active statutory tables plus their database version numbers, which are
/// stamped onto every payslip's statutory rows.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub tables: StatutoryTables,
    /// Active version per contribution kind string.
    pub versions: BTreeMap<String, i32>,
}

impl LoadedTables {
    pub fn version_of(&self, kind: &str) -> i32 {
        self.versions.get(kind).copied().unwrap_or(0)
    }
}

/// A payslip row recording why an employee's computation failed. Totals are
/// zero; the error code and message carry the diagnosis.
fn failed_payslip(employee_id: DbId, err: &CoreError) -> NewPayslip {
    use rust_decimal::Decimal;

    NewPayslip {
        employee_id,
        status: "failed".to_string(),
        error_code: Some(err.code().to_string()),
        error_message: Some(err.to_string()),
        wage_type: "monthly".to_string(),
        base_rate: Decimal::ZERO,
        pay_frequency: "monthly".to_string(),
        gross: Decimal::ZERO,
        total_statutory_employee: Decimal::ZERO,
        total_adjustments: Decimal::ZERO,
        net: Decimal::ZERO,
        ot_minutes: 0,
        lines: Vec::new(),
        statutory: Vec::new(),
        source_day_ids: Vec::new(),
    }
}

/// Run-to-run diff inputs: the period immediately before this run's period,
/// and its most authoritative run.
pub async fn prior_run_for_diff(
    pool: &DbPool,
    company_id: DbId,
    period: &PayPeriod,
) -> AppResult<Option<PayrollRun>> {
    let Some(prior_period) = PayPeriodRepo::find_prior(pool, company_id, period.id).await? else {
        return Ok(None);
    };
    Ok(PayrollRunRepo::find_latest_for_period(pool, company_id, prior_period.id).await?)
}
