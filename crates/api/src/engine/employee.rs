//! Per-employee payslip computation.
//!
//! Loads one employee's inputs for the period, resolves every day on the
//! attendance timeline, prices the resolved days, applies statutory
//! contributions and manual adjustments, and returns the payslip to write.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use suweldo_core::adjustments::{
    net_adjustment, validate_adjustment, AdjustmentItem, AdjustmentKind,
};
use suweldo_core::context::RequestContext;
use suweldo_core::earnings::{
    aggregate_lines, compute_day_lines, gross_of, LineCategory, LineDraft, MULT_BASIC,
    MULT_DEDUCTION,
};
use suweldo_core::error::CoreError;
use suweldo_core::rates::{
    derive_rates, PayFrequency, PayProfileSnapshot, WageType,
};
use suweldo_core::statutory::compute_statutory;
use suweldo_core::timeclock::{
    resolve_day, AttendanceStatus, CalendarDayType, DayInput, DayType, DayTypeSource,
    MinuteBuckets, ResolvedDay, ShiftSchedule, StatusRule, MINUTES_PER_DAY,
};
use suweldo_core::types::DbId;
use suweldo_db::models::attendance::{AttendanceDay, ResolvedAttendance};
use suweldo_db::models::employee::Employee;
use suweldo_db::models::payroll_run::PayPeriod;
use suweldo_db::models::payslip::{NewPayslip, NewPayslipLine, NewPayslipStatutory};
use suweldo_db::repositories::{
    AdjustmentRepo, AttendanceRepo, LeaveRepo, PayProfileRepo, ShiftTemplateRepo,
};
use suweldo_db::DbPool;

use super::LoadedTables;
use crate::error::AppError;

/// Compute one employee's payslip for the period.
///
/// Domain errors (`AppError::Core`) mean this employee's payslip failed;
/// database errors propagate and abort the run. The second element carries
/// non-fatal per-day warnings (incomplete punch pairs) for the run summary.
pub async fn compute_employee(
    pool: &DbPool,
    ctx: &RequestContext,
    emp: &Employee,
    period: &PayPeriod,
    tables: &LoadedTables,
    events: &HashMap<NaiveDate, (DbId, CalendarDayType)>,
    today: NaiveDate,
) -> Result<(NewPayslip, Vec<CoreError>), AppError> {
    let profile = PayProfileRepo::effective_for(pool, emp.id, period.end_date)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "PayProfile",
            id: emp.id,
        })?;

    let snapshot = PayProfileSnapshot {
        wage_type: WageType::parse(&profile.wage_type)?,
        base_rate: profile.base_rate,
        pay_frequency: PayFrequency::parse(&profile.pay_frequency)?,
    };
    let rates = derive_rates(&snapshot)?;

    let schedule = match emp.shift_template_id {
        Some(template_id) => {
            let template = ShiftTemplateRepo::find_by_id(pool, ctx.company_id, template_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "ShiftTemplate",
                    id: template_id,
                })?;
            Some(ShiftSchedule {
                start: template.start_time,
                end: template.end_time,
                is_overnight: template.is_overnight,
                break_minutes: template.break_minutes,
                grace_late_min: template.grace_late_min,
                grace_early_out_min: template.grace_early_out_min,
            })
        }
        None => None,
    };

    let weekly_rest_days = parse_rest_days(&emp.rest_days)?;

    AttendanceRepo::seed_range(pool, ctx.company_id, emp.id, period.start_date, period.end_date)
        .await?;
    let days =
        AttendanceRepo::list_for_employee_range(pool, emp.id, period.start_date, period.end_date)
            .await?;

    let leaves =
        LeaveRepo::list_for_employee_range(pool, emp.id, period.start_date, period.end_date)
            .await?;

    let mut all_lines: Vec<LineDraft> = Vec::new();
    let mut ot_minutes = 0;
    let mut source_day_ids = Vec::with_capacity(days.len());
    let mut warnings: Vec<CoreError> = Vec::new();

    for row in &days {
        // Locked days belong to an approved run; their stored resolution is
        // authoritative. Re-resolving against the current template, calendar,
        // or leave data would reprice approved history.
        let resolved = if row.is_locked {
            stored_resolution(row)?
        } else {
            let event = events.get(&row.work_date).copied();
            let has_approved_leave = leaves
                .iter()
                .any(|l| l.start_date <= row.work_date && row.work_date <= l.end_date);

            let input = DayInput {
                date: row.work_date,
                today,
                shift: schedule.clone(),
                schedule_override: None,
                day_type_override: row
                    .day_type_override
                    .as_deref()
                    .map(DayType::parse)
                    .transpose()?,
                calendar_event: event.map(|(_, day_type)| day_type),
                weekly_rest_days: weekly_rest_days.clone(),
                has_approved_leave,
                clock_in: row.clock_in_min.map(time_of_minute),
                clock_out: row.clock_out_min.map(time_of_minute),
                break_override: None,
                worked_through_break: row.worked_through_break,
                early_in_approved: row.early_in_approved,
                late_out_approved: row.late_out_approved,
            };

            let resolved = resolve_day(&input);
            AttendanceRepo::store_resolution(pool, row.id, &to_stored(&resolved, event)).await?;
            resolved
        };

        if resolved.incomplete {
            let gap = incomplete_warning(emp.id, row.work_date);
            tracing::warn!(employee_id = emp.id, code = gap.code(), "{gap}");
            warnings.push(gap);
        }

        // A per-day rate override reprices that day without touching the
        // profile.
        let day_rates = match row.daily_rate_override {
            Some(daily) => derive_rates(&PayProfileSnapshot {
                wage_type: WageType::Daily,
                base_rate: daily,
                pay_frequency: snapshot.pay_frequency,
            })?,
            None => rates,
        };

        all_lines.extend(compute_day_lines(&resolved, &day_rates));
        ot_minutes += resolved.minutes.total_ot();
        source_day_ids.push(row.id);
    }

    let mut lines = aggregate_lines(all_lines);
    let gross = gross_of(&lines);

    // Manual adjustments ride along as display lines but are tracked
    // separately from earned gross.
    let adjustments = AdjustmentRepo::list_for_employee_period(pool, period.id, emp.id).await?;
    let mut adjustment_items = Vec::with_capacity(adjustments.len());
    for adj in &adjustments {
        let item = AdjustmentItem {
            kind: AdjustmentKind::parse(&adj.kind)?,
            description: adj.description.clone(),
            amount: adj.amount,
        };
        validate_adjustment(&item)?;
        lines.push(adjustment_line(&item));
        adjustment_items.push(item);
    }
    let total_adjustments = net_adjustment(&adjustment_items);

    // Statutory brackets key off the monthly-equivalent wage, scaled back to
    // this period's share of the month.
    let breakdown = compute_statutory(rates.monthly, &tables.tables)?;
    let fraction = period_fraction(snapshot.pay_frequency);
    let statutory: Vec<NewPayslipStatutory> = breakdown
        .lines
        .iter()
        .map(|line| NewPayslipStatutory {
            kind: line.kind.as_str().to_string(),
            table_version: tables.version_of(line.kind.as_str()),
            employee_share: line.employee_share * fraction,
            employer_share: line.employer_share * fraction,
        })
        .collect();
    let total_statutory_employee = breakdown.total_employee * fraction;

    let net = gross - total_statutory_employee + total_adjustments;

    let slip = NewPayslip {
        employee_id: emp.id,
        status: "computed".to_string(),
        error_code: None,
        error_message: None,
        wage_type: snapshot.wage_type.as_str().to_string(),
        base_rate: snapshot.base_rate,
        pay_frequency: snapshot.pay_frequency.as_str().to_string(),
        gross,
        total_statutory_employee,
        total_adjustments,
        net,
        ot_minutes,
        lines: lines.into_iter().map(to_stored_line).collect(),
        statutory,
        source_day_ids,
    };
    Ok((slip, warnings))
}

/// Rebuild a locked day's resolution from its stored columns. The rule
/// provenance fields are not persisted; pricing never reads them.
fn stored_resolution(row: &AttendanceDay) -> Result<ResolvedDay, CoreError> {
    Ok(ResolvedDay {
        date: row.work_date,
        day_type: DayType::parse(&row.day_type)?,
        day_type_source: DayTypeSource::Default,
        status: AttendanceStatus::parse(&row.status)?,
        status_rule: StatusRule::TimeLogs,
        scheduled_window: None,
        scheduled_work_minutes: row.scheduled_work_minutes,
        minutes: MinuteBuckets {
            worked: row.worked_minutes,
            basic: row.basic_minutes,
            late: row.late_minutes,
            undertime: row.undertime_minutes,
            ot_early_in: row.ot_early_in_minutes,
            ot_late_out: row.ot_late_out_minutes,
            ot_rest_day: row.ot_rest_day_minutes,
            ot_holiday: row.ot_holiday_minutes,
            night_diff: row.night_diff_minutes,
            break_applied: row.break_applied_minutes,
        },
        incomplete: row.is_incomplete,
    })
}

/// Clock-in without clock-out. Reported in the run summary, never fatal.
fn incomplete_warning(employee_id: DbId, date: NaiveDate) -> CoreError {
    CoreError::IncompleteAttendance { employee_id, date }
}

/// The share of a month one period of the given frequency represents.
pub fn period_fraction(frequency: PayFrequency) -> Decimal {
    match frequency {
        PayFrequency::Monthly => Decimal::ONE,
        PayFrequency::SemiMonthly => dec!(0.5),
        PayFrequency::Weekly => Decimal::from(12) / Decimal::from(52),
    }
}

fn parse_rest_days(iso_days: &[i16]) -> Result<Vec<Weekday>, CoreError> {
    iso_days
        .iter()
        .map(|&d| match d {
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            7 => Ok(Weekday::Sun),
            other => Err(CoreError::Validation(format!(
                "Invalid rest day number {other}, expected 1-7"
            ))),
        })
        .collect()
}

/// Minute-of-day back to wall-clock time. Stored punches are 0..1439; the
/// modulo guards against bad imports.
fn time_of_minute(min: i32) -> NaiveTime {
    let min = min.rem_euclid(MINUTES_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(min * 60, 0)
        .unwrap_or(NaiveTime::MIN)
}

fn to_stored(resolved: &ResolvedDay, event: Option<(DbId, CalendarDayType)>) -> ResolvedAttendance {
    ResolvedAttendance {
        day_type: resolved.day_type.as_str().to_string(),
        status: resolved.status.as_str().to_string(),
        calendar_event_id: event.map(|(id, _)| id),
        worked_minutes: resolved.minutes.worked,
        basic_minutes: resolved.minutes.basic,
        late_minutes: resolved.minutes.late,
        undertime_minutes: resolved.minutes.undertime,
        ot_early_in_minutes: resolved.minutes.ot_early_in,
        ot_late_out_minutes: resolved.minutes.ot_late_out,
        ot_rest_day_minutes: resolved.minutes.ot_rest_day,
        ot_holiday_minutes: resolved.minutes.ot_holiday,
        night_diff_minutes: resolved.minutes.night_diff,
        break_applied_minutes: resolved.minutes.break_applied,
        scheduled_work_minutes: resolved.scheduled_work_minutes,
        is_incomplete: resolved.incomplete,
    }
}

fn to_stored_line(line: LineDraft) -> NewPayslipLine {
    NewPayslipLine {
        category: line.category.as_str().to_string(),
        description: line.description,
        quantity: line.quantity,
        rate: line.rate,
        multiplier: line.multiplier,
        amount: line.amount,
    }
}

fn adjustment_line(item: &AdjustmentItem) -> LineDraft {
    let (category, multiplier) = match item.kind {
        AdjustmentKind::Commission => (LineCategory::Commission, MULT_BASIC),
        AdjustmentKind::Deduction => (LineCategory::Deduction, MULT_DEDUCTION),
    };
    LineDraft {
        category,
        description: item.description.clone(),
        quantity: Decimal::ONE,
        rate: item.amount,
        multiplier,
        amount: item.signed_amount(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_fraction_matches_frequency() {
        assert_eq!(period_fraction(PayFrequency::Monthly), Decimal::ONE);
        assert_eq!(period_fraction(PayFrequency::SemiMonthly), dec!(0.5));
        let weekly = period_fraction(PayFrequency::Weekly);
        assert!(weekly > dec!(0.23) && weekly < dec!(0.24));
    }

    #[test]
    fn rest_day_numbers_follow_iso() {
        let days = parse_rest_days(&[6, 7]).unwrap();
        assert_eq!(days, vec![Weekday::Sat, Weekday::Sun]);
        assert!(parse_rest_days(&[0]).is_err());
        assert!(parse_rest_days(&[8]).is_err());
    }

    #[test]
    fn minute_of_day_round_trips() {
        assert_eq!(
            time_of_minute(8 * 60 + 30),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(time_of_minute(0), NaiveTime::MIN);
    }

    fn locked_rest_day_row() -> AttendanceDay {
        AttendanceDay {
            id: 1,
            company_id: 1,
            employee_id: 7,
            work_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            clock_in_min: Some(480),
            clock_out_min: Some(1140),
            day_type: "rest_day".into(),
            day_type_override: None,
            status: "present".into(),
            calendar_event_id: None,
            worked_minutes: 600,
            basic_minutes: 480,
            late_minutes: 0,
            undertime_minutes: 0,
            ot_early_in_minutes: 0,
            ot_late_out_minutes: 0,
            ot_rest_day_minutes: 120,
            ot_holiday_minutes: 0,
            night_diff_minutes: 0,
            break_applied_minutes: 60,
            scheduled_work_minutes: Some(480),
            daily_rate_override: None,
            worked_through_break: false,
            early_in_approved: false,
            late_out_approved: false,
            is_incomplete: false,
            is_locked: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn locked_day_is_priced_from_stored_resolution() {
        let row = locked_rest_day_row();
        let resolved = stored_resolution(&row).unwrap();
        assert_eq!(resolved.day_type, DayType::RestDay);
        assert_eq!(resolved.status, AttendanceStatus::Present);
        assert_eq!(resolved.minutes.basic, 480);
        assert_eq!(resolved.minutes.ot_rest_day, 120);
        assert_eq!(resolved.scheduled_work_minutes, Some(480));
        assert!(!resolved.incomplete);
    }

    #[test]
    fn incomplete_day_warning_has_stable_code() {
        let gap = incomplete_warning(7, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(gap.code(), "INCOMPLETE_ATTENDANCE");
        assert!(gap.to_string().contains("2025-03-03"));
    }

    #[test]
    fn deduction_adjustment_carries_negative_amount() {
        let item = AdjustmentItem {
            kind: AdjustmentKind::Deduction,
            description: "Cash advance".into(),
            amount: dec!(500),
        };
        let line = adjustment_line(&item);
        assert_eq!(line.category, LineCategory::Deduction);
        assert_eq!(line.amount, dec!(-500));
    }
}
