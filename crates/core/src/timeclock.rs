//! Attendance time resolution.
//!
//! Turns one employee-day's raw facts (shift schedule, clock events,
//! calendar day type, leave approval, manual overrides) into a resolved
//! record with derived minute buckets. All minute math runs on a single
//! continuous timeline anchored to the shift's calendar date: minute 0 is
//! that date's midnight, and an overnight clock-out lands past minute 1440
//! rather than wrapping to the next calendar date.

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Night differential window start, 22:00, in minutes since midnight.
pub const NIGHT_WINDOW_START_MIN: i32 = 22 * 60;

/// Night differential window end, 06:00 the following day.
pub const NIGHT_WINDOW_END_MIN: i32 = 6 * 60;

/// Overtime threshold for rest days and holidays without an assigned shift:
/// work beyond eight hours counts as day-type overtime.
pub const UNSCHEDULED_OT_THRESHOLD_MIN: i32 = 8 * 60;

// ---------------------------------------------------------------------------
// Day type
// ---------------------------------------------------------------------------

/// Classification of an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Workday,
    RestDay,
    RegularHoliday,
    SpecialHoliday,
}

impl DayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workday => "workday",
            Self::RestDay => "rest_day",
            Self::RegularHoliday => "regular_holiday",
            Self::SpecialHoliday => "special_holiday",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "workday" => Ok(Self::Workday),
            "rest_day" => Ok(Self::RestDay),
            "regular_holiday" => Ok(Self::RegularHoliday),
            "special_holiday" => Ok(Self::SpecialHoliday),
            other => Err(CoreError::Validation(format!(
                "Invalid day type '{other}'"
            ))),
        }
    }

    /// Whether this day type is a holiday (regular or special).
    pub fn is_holiday(self) -> bool {
        matches!(self, Self::RegularHoliday | Self::SpecialHoliday)
    }
}

/// Day type carried by a calendar event. `SpecialWorking` declares an
/// otherwise-special date an ordinary working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarDayType {
    RegularHoliday,
    SpecialHoliday,
    SpecialWorking,
    RestDay,
}

impl CalendarDayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegularHoliday => "regular_holiday",
            Self::SpecialHoliday => "special_holiday",
            Self::SpecialWorking => "special_working",
            Self::RestDay => "rest_day",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "regular_holiday" => Ok(Self::RegularHoliday),
            "special_holiday" => Ok(Self::SpecialHoliday),
            "special_working" => Ok(Self::SpecialWorking),
            "rest_day" => Ok(Self::RestDay),
            other => Err(CoreError::Validation(format!(
                "Invalid calendar day type '{other}'"
            ))),
        }
    }

    /// The attendance day type this event resolves to.
    pub fn resolves_to(self) -> DayType {
        match self {
            Self::RegularHoliday => DayType::RegularHoliday,
            Self::SpecialHoliday => DayType::SpecialHoliday,
            Self::SpecialWorking => DayType::Workday,
            Self::RestDay => DayType::RestDay,
        }
    }
}

// ---------------------------------------------------------------------------
// Attendance status
// ---------------------------------------------------------------------------

/// Resolved attendance status for one employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    HalfDay,
    OnLeave,
    Holiday,
    RestDay,
    Absent,
    /// No logs, no leave, and the date has not yet passed.
    NoData,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::HalfDay => "half_day",
            Self::OnLeave => "on_leave",
            Self::Holiday => "holiday",
            Self::RestDay => "rest_day",
            Self::Absent => "absent",
            Self::NoData => "no_data",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "present" => Ok(Self::Present),
            "half_day" => Ok(Self::HalfDay),
            "on_leave" => Ok(Self::OnLeave),
            "holiday" => Ok(Self::Holiday),
            "rest_day" => Ok(Self::RestDay),
            "absent" => Ok(Self::Absent),
            "no_data" => Ok(Self::NoData),
            other => Err(CoreError::Validation(format!(
                "Invalid attendance status '{other}'"
            ))),
        }
    }

    /// Statuses that indicate the employee actually clocked work.
    pub fn is_worked(self) -> bool {
        matches!(self, Self::Present | Self::HalfDay)
    }
}

// ---------------------------------------------------------------------------
// Precedence rules
// ---------------------------------------------------------------------------

/// Source that decided the day type, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayTypeSource {
    ManualOverride,
    CalendarEvent,
    RestDayPattern,
    Default,
}

/// Day-type resolution order, first match wins. Exported so the priority
/// order is a testable artifact rather than implicit in code order.
pub const DAY_TYPE_PRECEDENCE: &[DayTypeSource] = &[
    DayTypeSource::ManualOverride,
    DayTypeSource::CalendarEvent,
    DayTypeSource::RestDayPattern,
    DayTypeSource::Default,
];

/// Rule that decided the attendance status, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRule {
    TimeLogs,
    ApprovedLeave,
    DayTypeStatus,
    FutureDate,
    Absent,
}

/// Attendance-status resolution order, first match wins.
pub const STATUS_PRECEDENCE: &[StatusRule] = &[
    StatusRule::TimeLogs,
    StatusRule::ApprovedLeave,
    StatusRule::DayTypeStatus,
    StatusRule::FutureDate,
    StatusRule::Absent,
];

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Shift schedule facts copied from the assigned template.
#[derive(Debug, Clone)]
pub struct ShiftSchedule {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub is_overnight: bool,
    /// Default break minutes from the template's break policy.
    pub break_minutes: i32,
    pub grace_late_min: i32,
    pub grace_early_out_min: i32,
}

impl ShiftSchedule {
    /// Scheduled window on the continuous timeline: `(start_min, end_min)`
    /// where an overnight end lands past [`MINUTES_PER_DAY`].
    pub fn window(&self) -> (i32, i32) {
        let start = minute_of_day(self.start);
        let mut end = minute_of_day(self.end);
        if self.is_overnight || end <= start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }

    /// Scheduled work minutes: shift span minus the default break.
    pub fn scheduled_work_minutes(&self) -> i32 {
        let (start, end) = self.window();
        (end - start - self.break_minutes).max(0)
    }
}

/// Everything known about one employee-day before resolution.
#[derive(Debug, Clone)]
pub struct DayInput {
    pub date: NaiveDate,
    /// The date resolution runs on; dates past `today` resolve to `NoData`.
    pub today: NaiveDate,
    pub shift: Option<ShiftSchedule>,
    /// Manual schedule override `(start, end)` on the continuous timeline,
    /// in minutes. Replaces the shift-derived window without altering the
    /// underlying shift assignment.
    pub schedule_override: Option<(i32, i32)>,
    /// Manual day-type override; authoritative once present.
    pub day_type_override: Option<DayType>,
    pub calendar_event: Option<CalendarDayType>,
    /// Weekly rest-day pattern (e.g. Sunday).
    pub weekly_rest_days: Vec<Weekday>,
    pub has_approved_leave: bool,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    /// Break override; `Some(0)` is an explicit zero-break override.
    pub break_override: Option<i32>,
    /// No break was taken although the shift expected one. The expected
    /// break minutes then stay inside paid worked time instead of being
    /// deducted, which keeps worked-through breaks payable without an
    /// approval flag.
    pub worked_through_break: bool,
    pub early_in_approved: bool,
    pub late_out_approved: bool,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Derived minute buckets for one employee-day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBuckets {
    pub worked: i32,
    /// Worked minutes paid at the day type's basic multiplier. Inside the
    /// scheduled window when one exists; unapproved out-of-window minutes
    /// belong to no bucket and are unpaid.
    pub basic: i32,
    pub late: i32,
    pub undertime: i32,
    pub ot_early_in: i32,
    pub ot_late_out: i32,
    pub ot_rest_day: i32,
    pub ot_holiday: i32,
    pub night_diff: i32,
    pub break_applied: i32,
}

impl MinuteBuckets {
    /// Total paid overtime minutes across all buckets.
    pub fn total_ot(&self) -> i32 {
        self.ot_early_in + self.ot_late_out + self.ot_rest_day + self.ot_holiday
    }
}

/// The resolved employee-day.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub day_type_source: DayTypeSource,
    pub status: AttendanceStatus,
    pub status_rule: StatusRule,
    /// Scheduled window actually used, if any (override or shift-derived).
    pub scheduled_window: Option<(i32, i32)>,
    /// Scheduled work minutes: window span minus the applied break.
    pub scheduled_work_minutes: Option<i32>,
    pub minutes: MinuteBuckets,
    /// Clock-in present without clock-out. Reported, never fatal.
    pub incomplete: bool,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Minutes since midnight for a time-of-day.
pub fn minute_of_day(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Resolve the day type by walking [`DAY_TYPE_PRECEDENCE`].
pub fn resolve_day_type(input: &DayInput) -> (DayType, DayTypeSource) {
    for rule in DAY_TYPE_PRECEDENCE {
        match rule {
            DayTypeSource::ManualOverride => {
                if let Some(dt) = input.day_type_override {
                    return (dt, DayTypeSource::ManualOverride);
                }
            }
            DayTypeSource::CalendarEvent => {
                if let Some(event) = input.calendar_event {
                    return (event.resolves_to(), DayTypeSource::CalendarEvent);
                }
            }
            DayTypeSource::RestDayPattern => {
                if input.weekly_rest_days.contains(&weekday_of(input.date)) {
                    return (DayType::RestDay, DayTypeSource::RestDayPattern);
                }
            }
            DayTypeSource::Default => {}
        }
    }
    (DayType::Workday, DayTypeSource::Default)
}

fn weekday_of(date: NaiveDate) -> Weekday {
    chrono::Datelike::weekday(&date)
}

/// Resolve the attendance status by walking [`STATUS_PRECEDENCE`].
///
/// `worked` and `scheduled` minutes decide between Present and HalfDay when
/// time logs exist: less than half the scheduled work is a half day.
fn resolve_status(
    input: &DayInput,
    day_type: DayType,
    worked: i32,
    scheduled: Option<i32>,
    incomplete: bool,
) -> (AttendanceStatus, StatusRule) {
    for rule in STATUS_PRECEDENCE {
        match rule {
            StatusRule::TimeLogs => {
                if input.clock_in.is_some() {
                    // An incomplete pair still counts as present; the gap is
                    // reported separately.
                    let status = match scheduled {
                        Some(s) if !incomplete && s > 0 && worked * 2 < s => {
                            AttendanceStatus::HalfDay
                        }
                        _ => AttendanceStatus::Present,
                    };
                    return (status, StatusRule::TimeLogs);
                }
            }
            StatusRule::ApprovedLeave => {
                if input.has_approved_leave {
                    return (AttendanceStatus::OnLeave, StatusRule::ApprovedLeave);
                }
            }
            StatusRule::DayTypeStatus => match day_type {
                DayType::RegularHoliday | DayType::SpecialHoliday => {
                    return (AttendanceStatus::Holiday, StatusRule::DayTypeStatus)
                }
                DayType::RestDay => {
                    return (AttendanceStatus::RestDay, StatusRule::DayTypeStatus)
                }
                DayType::Workday => {}
            },
            StatusRule::FutureDate => {
                if input.date > input.today {
                    return (AttendanceStatus::NoData, StatusRule::FutureDate);
                }
            }
            StatusRule::Absent => {}
        }
    }
    (AttendanceStatus::Absent, StatusRule::Absent)
}

/// Overlap in minutes between `[start, end)` and the 22:00-06:00 night
/// window, on the continuous timeline.
pub fn night_overlap_minutes(start: i32, end: i32) -> i32 {
    let mut total = 0;
    // Night windows repeat every day: [22:00 of day k, 06:00 of day k+1).
    for k in -1..=2 {
        let win_start = k * MINUTES_PER_DAY + NIGHT_WINDOW_START_MIN;
        let win_end = (k + 1) * MINUTES_PER_DAY + NIGHT_WINDOW_END_MIN;
        total += overlap(start, end, win_start, win_end);
    }
    total
}

fn overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> i32 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Resolve one employee-day into its derived record.
pub fn resolve_day(input: &DayInput) -> ResolvedDay {
    let (day_type, day_type_source) = resolve_day_type(input);

    // Scheduled window: manual override beats the shift-derived window.
    let scheduled_window = input
        .schedule_override
        .or_else(|| input.shift.as_ref().map(|s| s.window()));

    // Break minutes: override (including explicit 0) > template default.
    // Working through the break keeps those minutes paid.
    let expected_break = input
        .break_override
        .unwrap_or_else(|| input.shift.as_ref().map_or(0, |s| s.break_minutes));
    let break_applied = if input.worked_through_break {
        0
    } else {
        expected_break
    };

    let scheduled_work = scheduled_window.map(|(s, e)| (e - s - break_applied).max(0));

    // Clock pair on the continuous timeline. A clock-out at or before the
    // clock-in wraps to the next day (overnight shift).
    let clock_in_min = input.clock_in.map(minute_of_day);
    let clock_out_min = match (clock_in_min, input.clock_out.map(minute_of_day)) {
        (Some(cin), Some(cout)) if cout <= cin => Some(cout + MINUTES_PER_DAY),
        (_, cout) => cout,
    };
    let incomplete = clock_in_min.is_some() && clock_out_min.is_none();

    let mut minutes = MinuteBuckets::default();

    if let (Some(cin), Some(cout)) = (clock_in_min, clock_out_min) {
        minutes.break_applied = break_applied;
        minutes.worked = (cout - cin - break_applied).max(0);
        minutes.night_diff = night_overlap_minutes(cin, cout);

        match scheduled_window {
            Some((sched_start, sched_end)) => {
                let grace_late = input.shift.as_ref().map_or(0, |s| s.grace_late_min);
                let grace_early = input.shift.as_ref().map_or(0, |s| s.grace_early_out_min);

                let raw_early_in = (sched_start - cin).max(0);
                let raw_late_out = (cout - sched_end).max(0);
                minutes.basic =
                    (overlap(cin, cout, sched_start, sched_end) - break_applied).max(0);

                match day_type {
                    DayType::Workday => {
                        minutes.late = (cin - sched_start - grace_late).max(0);
                        minutes.undertime = (sched_end - cout - grace_early).max(0);
                        // Workday OT needs explicit approval per bucket.
                        if input.early_in_approved {
                            minutes.ot_early_in = raw_early_in;
                        }
                        if input.late_out_approved {
                            minutes.ot_late_out = raw_late_out;
                        }
                    }
                    // Rest-day and holiday OT is payable regardless of the
                    // approval flags.
                    DayType::RestDay => {
                        minutes.ot_rest_day = raw_early_in + raw_late_out;
                    }
                    DayType::RegularHoliday | DayType::SpecialHoliday => {
                        minutes.ot_holiday = raw_early_in + raw_late_out;
                    }
                }
            }
            None => {
                // No schedule: day-type OT kicks in past eight hours.
                let beyond = (minutes.worked - UNSCHEDULED_OT_THRESHOLD_MIN).max(0);
                match day_type {
                    DayType::RestDay => minutes.ot_rest_day = beyond,
                    DayType::RegularHoliday | DayType::SpecialHoliday => {
                        minutes.ot_holiday = beyond
                    }
                    DayType::Workday => {}
                }
                minutes.basic = minutes.worked - beyond;
            }
        }
    } else if let Some(cin) = clock_in_min {
        // Clock-in without clock-out: worked minutes stay at zero, but a
        // late arrival is still derivable.
        if let Some((sched_start, _)) = scheduled_window {
            if day_type == DayType::Workday {
                let grace_late = input.shift.as_ref().map_or(0, |s| s.grace_late_min);
                minutes.late = (cin - sched_start - grace_late).max(0);
            }
        }
    }

    let (status, status_rule) =
        resolve_status(input, day_type, minutes.worked, scheduled_work, incomplete);

    ResolvedDay {
        date: input.date,
        day_type,
        day_type_source,
        status,
        status_rule,
        scheduled_window,
        scheduled_work_minutes: scheduled_work,
        minutes,
        incomplete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn day_shift() -> ShiftSchedule {
        ShiftSchedule {
            start: t(8, 0),
            end: t(17, 0),
            is_overnight: false,
            break_minutes: 60,
            grace_late_min: 15,
            grace_early_out_min: 0,
        }
    }

    fn base_input() -> DayInput {
        DayInput {
            date: d(2025, 3, 3), // a Monday
            today: d(2025, 3, 31),
            shift: Some(day_shift()),
            schedule_override: None,
            day_type_override: None,
            calendar_event: None,
            weekly_rest_days: vec![Weekday::Sun],
            has_approved_leave: false,
            clock_in: Some(t(8, 0)),
            clock_out: Some(t(17, 0)),
            break_override: None,
            worked_through_break: false,
            early_in_approved: false,
            late_out_approved: false,
        }
    }

    // -----------------------------------------------------------------------
    // Day type precedence
    // -----------------------------------------------------------------------

    #[test]
    fn calendar_event_beats_rest_day_pattern() {
        let mut input = base_input();
        input.date = d(2025, 3, 9); // Sunday
        input.calendar_event = Some(CalendarDayType::RegularHoliday);
        let (dt, source) = resolve_day_type(&input);
        assert_eq!(dt, DayType::RegularHoliday);
        assert_eq!(source, DayTypeSource::CalendarEvent);
    }

    #[test]
    fn manual_override_beats_calendar_event() {
        let mut input = base_input();
        input.calendar_event = Some(CalendarDayType::RegularHoliday);
        input.day_type_override = Some(DayType::Workday);
        let (dt, source) = resolve_day_type(&input);
        assert_eq!(dt, DayType::Workday);
        assert_eq!(source, DayTypeSource::ManualOverride);
    }

    #[test]
    fn rest_day_pattern_applies_on_matching_weekday() {
        let mut input = base_input();
        input.date = d(2025, 3, 9); // Sunday
        let (dt, source) = resolve_day_type(&input);
        assert_eq!(dt, DayType::RestDay);
        assert_eq!(source, DayTypeSource::RestDayPattern);
    }

    #[test]
    fn special_working_event_resolves_to_workday() {
        let mut input = base_input();
        input.date = d(2025, 3, 9); // Sunday, would otherwise be a rest day
        input.calendar_event = Some(CalendarDayType::SpecialWorking);
        let (dt, _) = resolve_day_type(&input);
        assert_eq!(dt, DayType::Workday);
    }

    #[test]
    fn defaults_to_workday() {
        let (dt, source) = resolve_day_type(&base_input());
        assert_eq!(dt, DayType::Workday);
        assert_eq!(source, DayTypeSource::Default);
    }

    #[test]
    fn precedence_order_is_fixed() {
        assert_eq!(
            DAY_TYPE_PRECEDENCE,
            &[
                DayTypeSource::ManualOverride,
                DayTypeSource::CalendarEvent,
                DayTypeSource::RestDayPattern,
                DayTypeSource::Default,
            ],
        );
        assert_eq!(STATUS_PRECEDENCE.first(), Some(&StatusRule::TimeLogs));
        assert_eq!(STATUS_PRECEDENCE.last(), Some(&StatusRule::Absent));
    }

    // -----------------------------------------------------------------------
    // Grace and late/undertime
    // -----------------------------------------------------------------------

    #[test]
    fn late_within_grace_is_zero() {
        let mut input = base_input();
        input.clock_in = Some(t(8, 5));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.late, 0);
    }

    #[test]
    fn late_beyond_grace_counts_past_threshold() {
        let mut input = base_input();
        input.clock_in = Some(t(8, 20));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.late, 5); // 20 minutes late, 15 grace
    }

    #[test]
    fn undertime_counts_past_grace() {
        let mut input = base_input();
        input.clock_out = Some(t(16, 30));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.undertime, 30);
    }

    // -----------------------------------------------------------------------
    // Worked minutes and breaks
    // -----------------------------------------------------------------------

    #[test]
    fn worked_minutes_subtract_break() {
        let day = resolve_day(&base_input());
        assert_eq!(day.minutes.worked, 480); // 9h span minus 60m break
        assert_eq!(day.minutes.break_applied, 60);
    }

    #[test]
    fn explicit_zero_break_override_applies() {
        let mut input = base_input();
        input.break_override = Some(0);
        let day = resolve_day(&input);
        assert_eq!(day.minutes.worked, 540);
        assert_eq!(day.minutes.break_applied, 0);
    }

    #[test]
    fn worked_through_break_keeps_minutes_paid() {
        let mut input = base_input();
        input.worked_through_break = true;
        let day = resolve_day(&input);
        assert_eq!(day.minutes.break_applied, 0);
        assert_eq!(day.minutes.worked, 540);
    }

    #[test]
    fn worked_minutes_never_negative() {
        let mut input = base_input();
        input.clock_in = Some(t(8, 0));
        input.clock_out = Some(t(8, 30)); // 30m pair, 60m break
        let day = resolve_day(&input);
        assert_eq!(day.minutes.worked, 0);
    }

    // -----------------------------------------------------------------------
    // Overtime approval
    // -----------------------------------------------------------------------

    #[test]
    fn workday_late_out_ot_requires_approval() {
        let mut input = base_input();
        input.clock_out = Some(t(19, 0));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.ot_late_out, 0);

        input.late_out_approved = true;
        let day = resolve_day(&input);
        assert_eq!(day.minutes.ot_late_out, 120);
    }

    #[test]
    fn workday_early_in_ot_requires_approval() {
        let mut input = base_input();
        input.clock_in = Some(t(7, 0));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.ot_early_in, 0);

        input.early_in_approved = true;
        let day = resolve_day(&input);
        assert_eq!(day.minutes.ot_early_in, 60);
    }

    #[test]
    fn rest_day_ot_payable_without_approval() {
        let mut input = base_input();
        input.date = d(2025, 3, 9); // Sunday rest day
        input.clock_out = Some(t(19, 0));
        let day = resolve_day(&input);
        assert_eq!(day.day_type, DayType::RestDay);
        assert_eq!(day.minutes.ot_rest_day, 120);
    }

    #[test]
    fn holiday_ot_payable_without_approval() {
        let mut input = base_input();
        input.calendar_event = Some(CalendarDayType::SpecialHoliday);
        input.clock_out = Some(t(19, 0));
        let day = resolve_day(&input);
        assert_eq!(day.minutes.ot_holiday, 120);
        assert_eq!(day.minutes.ot_late_out, 0);
    }

    #[test]
    fn unscheduled_rest_day_ot_splits_past_eight_hours() {
        let mut input = base_input();
        input.date = d(2025, 3, 9);
        input.shift = None;
        input.clock_in = Some(t(8, 0));
        input.clock_out = Some(t(18, 0)); // 10h, no break
        let day = resolve_day(&input);
        assert_eq!(day.minutes.worked, 600);
        assert_eq!(day.minutes.ot_rest_day, 120);
        assert_eq!(day.minutes.basic, 480);
    }

    #[test]
    fn unapproved_out_of_window_minutes_are_not_basic() {
        let mut input = base_input();
        input.clock_out = Some(t(19, 0)); // 2h past schedule, unapproved
        let day = resolve_day(&input);
        assert_eq!(day.minutes.basic, 480);
        assert_eq!(day.minutes.ot_late_out, 0);
    }

    // -----------------------------------------------------------------------
    // Night differential
    // -----------------------------------------------------------------------

    #[test]
    fn night_overlap_inside_evening_window() {
        assert_eq!(night_overlap_minutes(21 * 60, 23 * 60), 60);
    }

    #[test]
    fn night_overlap_crossing_midnight() {
        // 22:00 to 06:00 next day is fully inside the window.
        assert_eq!(night_overlap_minutes(22 * 60, 30 * 60), 480);
    }

    #[test]
    fn night_overlap_early_morning() {
        // 04:00-08:00 overlaps the tail of the previous night's window.
        assert_eq!(night_overlap_minutes(4 * 60, 8 * 60), 120);
    }

    #[test]
    fn day_shift_has_no_night_minutes() {
        let day = resolve_day(&base_input());
        assert_eq!(day.minutes.night_diff, 0);
    }

    #[test]
    fn overnight_shift_anchors_to_shift_date() {
        let mut input = base_input();
        input.shift = Some(ShiftSchedule {
            start: t(22, 0),
            end: t(6, 0),
            is_overnight: true,
            break_minutes: 0,
            grace_late_min: 0,
            grace_early_out_min: 0,
        });
        input.clock_in = Some(t(22, 0));
        input.clock_out = Some(t(6, 0)); // next day, wraps on the timeline
        let day = resolve_day(&input);
        assert_eq!(day.minutes.worked, 480);
        assert_eq!(day.minutes.night_diff, 480);
        assert_eq!(day.minutes.undertime, 0);
        assert_eq!(day.minutes.late, 0);
    }

    // -----------------------------------------------------------------------
    // Status resolution
    // -----------------------------------------------------------------------

    #[test]
    fn logs_resolve_to_present() {
        let day = resolve_day(&base_input());
        assert_eq!(day.status, AttendanceStatus::Present);
        assert_eq!(day.status_rule, StatusRule::TimeLogs);
    }

    #[test]
    fn short_day_resolves_to_half_day() {
        let mut input = base_input();
        input.clock_in = Some(t(8, 0));
        input.clock_out = Some(t(11, 0)); // 3h against an 8h schedule
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn approved_leave_without_logs_is_on_leave() {
        let mut input = base_input();
        input.clock_in = None;
        input.clock_out = None;
        input.has_approved_leave = true;
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::OnLeave);
        assert_eq!(day.status_rule, StatusRule::ApprovedLeave);
    }

    #[test]
    fn logs_beat_approved_leave() {
        let mut input = base_input();
        input.has_approved_leave = true;
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::Present);
    }

    #[test]
    fn unworked_holiday_resolves_to_holiday_status() {
        let mut input = base_input();
        input.clock_in = None;
        input.clock_out = None;
        input.calendar_event = Some(CalendarDayType::RegularHoliday);
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::Holiday);
    }

    #[test]
    fn no_logs_on_past_workday_is_absent() {
        let mut input = base_input();
        input.clock_in = None;
        input.clock_out = None;
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::Absent);
    }

    #[test]
    fn future_date_without_logs_is_no_data() {
        let mut input = base_input();
        input.clock_in = None;
        input.clock_out = None;
        input.date = d(2025, 4, 15);
        let day = resolve_day(&input);
        assert_eq!(day.status, AttendanceStatus::NoData);
    }

    #[test]
    fn missing_clock_out_is_incomplete_but_present() {
        let mut input = base_input();
        input.clock_out = None;
        let day = resolve_day(&input);
        assert!(day.incomplete);
        assert_eq!(day.status, AttendanceStatus::Present);
        assert_eq!(day.minutes.worked, 0);
    }
}
