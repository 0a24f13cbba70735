//! Earnings and deduction line computation.
//!
//! Applies the Philippine premium multiplier table to a resolved
//! employee-day and produces itemized payslip line drafts. Lines are
//! computed per day and aggregated per category for the payslip, so
//! category totals reconcile exactly to the sum of per-day contributions.
//!
//! Compounding order: the day type's basic multiplier applies first and the
//! overtime premium multiplies on top of it (rest-day OT = 1.30 x 1.30).
//! Night differential is a flat +10% of the plain minute rate per
//! qualifying minute, added on top of whatever those minutes already earn.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rates::DerivedRates;
use crate::timeclock::{AttendanceStatus, DayType, ResolvedDay};

// ---------------------------------------------------------------------------
// Premium multipliers
// ---------------------------------------------------------------------------

/// Basic worked minute.
pub const MULT_BASIC: Decimal = dec!(1.00);
/// Approved overtime on an ordinary workday.
pub const MULT_REGULAR_OT: Decimal = dec!(1.25);
/// Work performed on a rest day.
pub const MULT_REST_DAY: Decimal = dec!(1.30);
/// Overtime on a rest day (1.30 x 1.30).
pub const MULT_REST_DAY_OT: Decimal = dec!(1.69);
/// Work performed on a regular holiday.
pub const MULT_REGULAR_HOLIDAY: Decimal = dec!(2.00);
/// Overtime on a regular holiday (2.00 x 1.30).
pub const MULT_REGULAR_HOLIDAY_OT: Decimal = dec!(2.60);
/// Work performed on a special (non-working) holiday.
pub const MULT_SPECIAL_HOLIDAY: Decimal = dec!(1.30);
/// Overtime on a special holiday (1.30 x 1.30).
pub const MULT_SPECIAL_HOLIDAY_OT: Decimal = dec!(1.69);
/// Night differential premium on top of the applicable rate.
pub const NIGHT_DIFF_RATE: Decimal = dec!(0.10);
/// Deduction multiplier for late/undertime/absence.
pub const MULT_DEDUCTION: Decimal = dec!(-1.00);

// ---------------------------------------------------------------------------
// Line categories
// ---------------------------------------------------------------------------

/// Category of a payslip line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    Basic,
    HolidayPay,
    RestDayPay,
    RegularHolidayPay,
    SpecialHolidayPay,
    OvertimeRegular,
    OvertimeRestDay,
    OvertimeRegularHoliday,
    OvertimeSpecialHoliday,
    NightDiff,
    LateDeduction,
    UndertimeDeduction,
    AbsenceDeduction,
    ThirteenthMonth,
    Commission,
    Deduction,
}

impl LineCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::HolidayPay => "holiday_pay",
            Self::RestDayPay => "rest_day_pay",
            Self::RegularHolidayPay => "regular_holiday_pay",
            Self::SpecialHolidayPay => "special_holiday_pay",
            Self::OvertimeRegular => "overtime_regular",
            Self::OvertimeRestDay => "overtime_rest_day",
            Self::OvertimeRegularHoliday => "overtime_regular_holiday",
            Self::OvertimeSpecialHoliday => "overtime_special_holiday",
            Self::NightDiff => "night_diff",
            Self::LateDeduction => "late_deduction",
            Self::UndertimeDeduction => "undertime_deduction",
            Self::AbsenceDeduction => "absence_deduction",
            Self::ThirteenthMonth => "thirteenth_month",
            Self::Commission => "commission",
            Self::Deduction => "deduction",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "basic" => Ok(Self::Basic),
            "holiday_pay" => Ok(Self::HolidayPay),
            "rest_day_pay" => Ok(Self::RestDayPay),
            "regular_holiday_pay" => Ok(Self::RegularHolidayPay),
            "special_holiday_pay" => Ok(Self::SpecialHolidayPay),
            "overtime_regular" => Ok(Self::OvertimeRegular),
            "overtime_rest_day" => Ok(Self::OvertimeRestDay),
            "overtime_regular_holiday" => Ok(Self::OvertimeRegularHoliday),
            "overtime_special_holiday" => Ok(Self::OvertimeSpecialHoliday),
            "night_diff" => Ok(Self::NightDiff),
            "late_deduction" => Ok(Self::LateDeduction),
            "undertime_deduction" => Ok(Self::UndertimeDeduction),
            "absence_deduction" => Ok(Self::AbsenceDeduction),
            "thirteenth_month" => Ok(Self::ThirteenthMonth),
            "commission" => Ok(Self::Commission),
            "deduction" => Ok(Self::Deduction),
            other => Err(CoreError::Validation(format!(
                "Invalid line category '{other}'"
            ))),
        }
    }

    /// Whether lines in this category subtract from gross.
    pub fn is_deduction(self) -> bool {
        matches!(
            self,
            Self::LateDeduction | Self::UndertimeDeduction | Self::AbsenceDeduction | Self::Deduction
        )
    }
}

// ---------------------------------------------------------------------------
// Line drafts
// ---------------------------------------------------------------------------

/// An itemized earnings/deduction line before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDraft {
    pub category: LineCategory,
    pub description: String,
    /// Minutes for minute-rated lines, days for day-rated lines.
    pub quantity: Decimal,
    /// The rate the quantity is priced at (minute or daily rate).
    pub rate: Decimal,
    pub multiplier: Decimal,
    pub amount: Decimal,
}

impl LineDraft {
    fn new(
        category: LineCategory,
        description: &str,
        quantity: Decimal,
        rate: Decimal,
        multiplier: Decimal,
    ) -> Self {
        Self {
            category,
            description: description.to_string(),
            quantity,
            rate,
            multiplier,
            amount: quantity * rate * multiplier,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-day computation
// ---------------------------------------------------------------------------

/// Compute the earnings/deduction lines one resolved day contributes.
///
/// The basic line for a scheduled workday pays the full scheduled work
/// minutes; lateness, undertime, and absence then subtract as explicit
/// negative lines. This keeps approved leave paid, makes grace minutes
/// payable, and nets an absent day to zero.
pub fn compute_day_lines(day: &ResolvedDay, rates: &DerivedRates) -> Vec<LineDraft> {
    let mut lines = Vec::new();
    let m = &day.minutes;
    let minute_rate = rates.minute;

    // Future days contribute nothing.
    if day.status == AttendanceStatus::NoData {
        return lines;
    }

    match day.day_type {
        DayType::Workday => {
            match day.scheduled_work_minutes {
                Some(sched) if sched > 0 => {
                    lines.push(LineDraft::new(
                        LineCategory::Basic,
                        "Basic pay",
                        Decimal::from(sched),
                        minute_rate,
                        MULT_BASIC,
                    ));
                    if day.status == AttendanceStatus::Absent {
                        // Deducts exactly what the basic line paid, so an
                        // absent day nets to zero on any schedule length.
                        lines.push(LineDraft::new(
                            LineCategory::AbsenceDeduction,
                            "Absence",
                            Decimal::from(sched),
                            minute_rate,
                            MULT_DEDUCTION,
                        ));
                    }
                    if m.late > 0 {
                        lines.push(LineDraft::new(
                            LineCategory::LateDeduction,
                            "Late",
                            Decimal::from(m.late),
                            minute_rate,
                            MULT_DEDUCTION,
                        ));
                    }
                    if m.undertime > 0 {
                        lines.push(LineDraft::new(
                            LineCategory::UndertimeDeduction,
                            "Undertime",
                            Decimal::from(m.undertime),
                            minute_rate,
                            MULT_DEDUCTION,
                        ));
                    }
                }
                _ => {
                    // No schedule: pay what was clocked.
                    if m.basic > 0 {
                        lines.push(LineDraft::new(
                            LineCategory::Basic,
                            "Basic pay",
                            Decimal::from(m.basic),
                            minute_rate,
                            MULT_BASIC,
                        ));
                    }
                }
            }
            let ot = m.ot_early_in + m.ot_late_out;
            if ot > 0 {
                lines.push(LineDraft::new(
                    LineCategory::OvertimeRegular,
                    "Overtime",
                    Decimal::from(ot),
                    minute_rate,
                    MULT_REGULAR_OT,
                ));
            }
        }
        DayType::RestDay => {
            if m.basic > 0 {
                lines.push(LineDraft::new(
                    LineCategory::RestDayPay,
                    "Rest day work",
                    Decimal::from(m.basic),
                    minute_rate,
                    MULT_REST_DAY,
                ));
            }
            if m.ot_rest_day > 0 {
                lines.push(LineDraft::new(
                    LineCategory::OvertimeRestDay,
                    "Rest day overtime",
                    Decimal::from(m.ot_rest_day),
                    minute_rate,
                    MULT_REST_DAY_OT,
                ));
            }
        }
        DayType::RegularHoliday => {
            if day.status.is_worked() {
                if m.basic > 0 {
                    lines.push(LineDraft::new(
                        LineCategory::RegularHolidayPay,
                        "Regular holiday work",
                        Decimal::from(m.basic),
                        minute_rate,
                        MULT_REGULAR_HOLIDAY,
                    ));
                }
                if m.ot_holiday > 0 {
                    lines.push(LineDraft::new(
                        LineCategory::OvertimeRegularHoliday,
                        "Regular holiday overtime",
                        Decimal::from(m.ot_holiday),
                        minute_rate,
                        MULT_REGULAR_HOLIDAY_OT,
                    ));
                }
            } else {
                // An unworked regular holiday is still paid one day at the
                // base rate.
                lines.push(LineDraft::new(
                    LineCategory::HolidayPay,
                    "Regular holiday (unworked)",
                    Decimal::ONE,
                    rates.daily,
                    MULT_BASIC,
                ));
            }
        }
        DayType::SpecialHoliday => {
            // No work, no pay on special holidays.
            if m.basic > 0 {
                lines.push(LineDraft::new(
                    LineCategory::SpecialHolidayPay,
                    "Special holiday work",
                    Decimal::from(m.basic),
                    minute_rate,
                    MULT_SPECIAL_HOLIDAY,
                ));
            }
            if m.ot_holiday > 0 {
                lines.push(LineDraft::new(
                    LineCategory::OvertimeSpecialHoliday,
                    "Special holiday overtime",
                    Decimal::from(m.ot_holiday),
                    minute_rate,
                    MULT_SPECIAL_HOLIDAY_OT,
                ));
            }
        }
    }

    if m.night_diff > 0 && day.status.is_worked() {
        lines.push(LineDraft::new(
            LineCategory::NightDiff,
            "Night differential",
            Decimal::from(m.night_diff),
            minute_rate,
            NIGHT_DIFF_RATE,
        ));
    }

    lines
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold per-day lines into one line per category, summing quantities and
/// amounts. Rate and multiplier are uniform within a category. Output is
/// ordered by category.
pub fn aggregate_lines(day_lines: Vec<LineDraft>) -> Vec<LineDraft> {
    let mut by_category: std::collections::BTreeMap<LineCategory, LineDraft> =
        std::collections::BTreeMap::new();

    for line in day_lines {
        by_category
            .entry(line.category)
            .and_modify(|agg| {
                agg.quantity += line.quantity;
                agg.amount += line.amount;
            })
            .or_insert(line);
    }

    by_category.into_values().collect()
}

/// Sum of all line amounts (deductions are already negative).
pub fn gross_of(lines: &[LineDraft]) -> Decimal {
    lines.iter().map(|l| l.amount).sum()
}

// ---------------------------------------------------------------------------
// 13th month
// ---------------------------------------------------------------------------

/// Statutory 13th-month pay: one twelfth of the basic pay earned in the
/// calendar year. Triggered by a separate scheduled job, never per period.
pub fn thirteenth_month_pay(ytd_basic: Decimal) -> Decimal {
    ytd_basic / dec!(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{derive_rates, PayFrequency, PayProfileSnapshot, WageType};
    use crate::timeclock::{
        AttendanceStatus, DayType, DayTypeSource, MinuteBuckets, StatusRule,
    };
    use chrono::NaiveDate;

    fn rates_26k() -> DerivedRates {
        derive_rates(&PayProfileSnapshot {
            wage_type: WageType::Monthly,
            base_rate: dec!(26000),
            pay_frequency: PayFrequency::SemiMonthly,
        })
        .unwrap()
    }

    fn day(
        day_type: DayType,
        status: AttendanceStatus,
        scheduled_window: Option<(i32, i32)>,
        minutes: MinuteBuckets,
    ) -> ResolvedDay {
        ResolvedDay {
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            day_type,
            day_type_source: DayTypeSource::Default,
            status,
            status_rule: StatusRule::TimeLogs,
            scheduled_window,
            scheduled_work_minutes: scheduled_window
                .map(|(s, e)| (e - s - minutes.break_applied).max(0)),
            minutes,
            incomplete: false,
        }
    }

    fn find(lines: &[LineDraft], category: LineCategory) -> Option<&LineDraft> {
        lines.iter().find(|l| l.category == category)
    }

    #[test]
    fn unworked_regular_holiday_pays_one_day_at_base() {
        let rates = rates_26k();
        let d = day(
            DayType::RegularHoliday,
            AttendanceStatus::Holiday,
            Some((480, 1020)),
            MinuteBuckets::default(),
        );
        let lines = compute_day_lines(&d, &rates);
        assert_eq!(lines.len(), 1);
        let holiday = &lines[0];
        assert_eq!(holiday.category, LineCategory::HolidayPay);
        assert_eq!(holiday.amount, dec!(1000));
        assert!(find(&lines, LineCategory::AbsenceDeduction).is_none());
    }

    #[test]
    fn special_holiday_ot_compounds_premiums() {
        let rates = rates_26k();
        let minutes = MinuteBuckets {
            worked: 600,
            basic: 480,
            ot_holiday: 120,
            ..Default::default()
        };
        let d = day(
            DayType::SpecialHoliday,
            AttendanceStatus::Present,
            Some((480, 1020)),
            minutes,
        );
        let lines = compute_day_lines(&d, &rates);

        let basic = find(&lines, LineCategory::SpecialHolidayPay).unwrap();
        assert_eq!(basic.multiplier, dec!(1.30));

        let ot = find(&lines, LineCategory::OvertimeSpecialHoliday).unwrap();
        assert_eq!(ot.multiplier, dec!(1.69));
        assert_eq!(ot.amount, dec!(120) * rates.minute * dec!(1.69));
    }

    #[test]
    fn workday_pays_schedule_and_deducts_late() {
        let rates = rates_26k();
        let minutes = MinuteBuckets {
            worked: 460,
            basic: 460,
            late: 5,
            break_applied: 60,
            ..Default::default()
        };
        let d = day(
            DayType::Workday,
            AttendanceStatus::Present,
            Some((480, 1020)), // 08:00-17:00, 60m break: 480 scheduled
            minutes,
        );
        let lines = compute_day_lines(&d, &rates);

        let basic = find(&lines, LineCategory::Basic).unwrap();
        assert_eq!(basic.quantity, dec!(480));
        assert_eq!(basic.amount, dec!(480) * rates.minute);

        let late = find(&lines, LineCategory::LateDeduction).unwrap();
        assert_eq!(late.amount, dec!(5) * rates.minute * dec!(-1));
    }

    #[test]
    fn absent_workday_nets_to_zero() {
        let rates = rates_26k();
        let d = day(
            DayType::Workday,
            AttendanceStatus::Absent,
            Some((480, 1020)),
            MinuteBuckets {
                break_applied: 60,
                ..Default::default()
            },
        );
        let lines = compute_day_lines(&d, &rates);
        // 480 scheduled minutes at the minute rate == one daily rate.
        assert_eq!(gross_of(&lines), Decimal::ZERO);
        assert!(find(&lines, LineCategory::AbsenceDeduction).is_some());
    }

    #[test]
    fn absent_part_time_day_nets_to_zero() {
        let rates = rates_26k();
        let d = day(
            DayType::Workday,
            AttendanceStatus::Absent,
            Some((540, 780)), // 09:00-13:00, no break: 240 scheduled minutes
            MinuteBuckets::default(),
        );
        let lines = compute_day_lines(&d, &rates);

        let basic = find(&lines, LineCategory::Basic).unwrap();
        assert_eq!(basic.amount, dec!(240) * rates.minute);

        let absence = find(&lines, LineCategory::AbsenceDeduction).unwrap();
        assert_eq!(absence.quantity, dec!(240));
        assert_eq!(absence.amount, dec!(240) * rates.minute * dec!(-1));

        assert_eq!(gross_of(&lines), Decimal::ZERO);
    }

    #[test]
    fn absent_long_schedule_day_nets_to_zero() {
        let rates = rates_26k();
        let d = day(
            DayType::Workday,
            AttendanceStatus::Absent,
            Some((360, 1080)), // 06:00-18:00, 12h schedule, no break
            MinuteBuckets::default(),
        );
        let lines = compute_day_lines(&d, &rates);
        assert_eq!(gross_of(&lines), Decimal::ZERO);
    }

    #[test]
    fn approved_workday_ot_pays_1_25() {
        let rates = rates_26k();
        let minutes = MinuteBuckets {
            worked: 600,
            basic: 480,
            ot_late_out: 120,
            break_applied: 60,
            ..Default::default()
        };
        let d = day(
            DayType::Workday,
            AttendanceStatus::Present,
            Some((480, 1020)),
            minutes,
        );
        let lines = compute_day_lines(&d, &rates);
        let ot = find(&lines, LineCategory::OvertimeRegular).unwrap();
        assert_eq!(ot.amount, dec!(120) * rates.minute * dec!(1.25));
    }

    #[test]
    fn night_diff_adds_ten_percent_of_minute_rate() {
        let rates = rates_26k();
        let minutes = MinuteBuckets {
            worked: 480,
            basic: 480,
            night_diff: 120,
            ..Default::default()
        };
        let d = day(
            DayType::Workday,
            AttendanceStatus::Present,
            Some((1320, 1800)),
            minutes,
        );
        let lines = compute_day_lines(&d, &rates);
        let nd = find(&lines, LineCategory::NightDiff).unwrap();
        assert_eq!(nd.amount, dec!(120) * rates.minute * dec!(0.10));
    }

    #[test]
    fn special_holiday_unworked_pays_nothing() {
        let rates = rates_26k();
        let d = day(
            DayType::SpecialHoliday,
            AttendanceStatus::Holiday,
            None,
            MinuteBuckets::default(),
        );
        assert!(compute_day_lines(&d, &rates).is_empty());
    }

    #[test]
    fn future_day_contributes_nothing() {
        let rates = rates_26k();
        let d = day(
            DayType::Workday,
            AttendanceStatus::NoData,
            Some((480, 1020)),
            MinuteBuckets::default(),
        );
        assert!(compute_day_lines(&d, &rates).is_empty());
    }

    #[test]
    fn aggregation_reconciles_to_per_day_sum() {
        let rates = rates_26k();
        let minutes = MinuteBuckets {
            worked: 480,
            basic: 480,
            break_applied: 60,
            ..Default::default()
        };
        let d = day(
            DayType::Workday,
            AttendanceStatus::Present,
            Some((480, 1020)),
            minutes,
        );

        let mut all = Vec::new();
        for _ in 0..10 {
            all.extend(compute_day_lines(&d, &rates));
        }
        let per_day_total = gross_of(&all);

        let aggregated = aggregate_lines(all);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].quantity, dec!(4800));
        assert_eq!(gross_of(&aggregated), per_day_total);
    }

    #[test]
    fn thirteenth_month_is_one_twelfth_of_ytd_basic() {
        assert_eq!(thirteenth_month_pay(dec!(312000)), dec!(26000));
    }
}
