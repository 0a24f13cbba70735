//! Pay rate derivation.
//!
//! Converts a pay profile snapshot into daily/hourly/minute rates using the
//! fixed statutory divisors (26 working days per month, 8 hours per day).
//! All downstream money math uses the derived minute rate as the atomic
//! unit to avoid repeated rounding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Divisors
// ---------------------------------------------------------------------------

/// Working days per month used for monthly <-> daily conversion.
pub const WORKING_DAYS_PER_MONTH: Decimal = dec!(26);

/// Paid work hours per day.
pub const WORK_HOURS_PER_DAY: Decimal = dec!(8);

/// Minutes per paid hour.
pub const MINUTES_PER_HOUR: Decimal = dec!(60);

// ---------------------------------------------------------------------------
// Wage type
// ---------------------------------------------------------------------------

/// Basis of the employee's base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    Monthly,
    Daily,
    Hourly,
}

impl WageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
            Self::Hourly => "hourly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            other => Err(CoreError::InvalidRateConfig(format!(
                "unknown wage type '{other}'"
            ))),
        }
    }
}

/// How often the employee is paid. Carried on the payslip snapshot for
/// display and period math; it does not change rate derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    Monthly,
    SemiMonthly,
    Weekly,
}

impl PayFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::SemiMonthly => "semi_monthly",
            Self::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "semi_monthly" => Ok(Self::SemiMonthly),
            "weekly" => Ok(Self::Weekly),
            other => Err(CoreError::InvalidRateConfig(format!(
                "unknown pay frequency '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile snapshot and derived rates
// ---------------------------------------------------------------------------

/// The pay profile facts frozen onto a payslip at computation time, so
/// later profile edits never retroactively change historical payslips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayProfileSnapshot {
    pub wage_type: WageType,
    pub base_rate: Decimal,
    pub pay_frequency: PayFrequency,
}

/// Rates derived from a pay profile. The minute rate is the atomic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedRates {
    /// Monthly-equivalent rate. Display and statutory input only.
    pub monthly: Decimal,
    pub daily: Decimal,
    pub hourly: Decimal,
    pub minute: Decimal,
}

/// Derive daily/hourly/minute rates from a pay profile snapshot.
pub fn derive_rates(profile: &PayProfileSnapshot) -> Result<DerivedRates, CoreError> {
    if profile.base_rate <= Decimal::ZERO {
        return Err(CoreError::InvalidRateConfig(format!(
            "base rate must be positive, got {}",
            profile.base_rate
        )));
    }

    let (monthly, daily, hourly) = match profile.wage_type {
        WageType::Monthly => {
            let daily = profile.base_rate / WORKING_DAYS_PER_MONTH;
            (profile.base_rate, daily, daily / WORK_HOURS_PER_DAY)
        }
        WageType::Daily => {
            let daily = profile.base_rate;
            (
                daily * WORKING_DAYS_PER_MONTH,
                daily,
                daily / WORK_HOURS_PER_DAY,
            )
        }
        WageType::Hourly => {
            let hourly = profile.base_rate;
            let daily = hourly * WORK_HOURS_PER_DAY;
            (daily * WORKING_DAYS_PER_MONTH, daily, hourly)
        }
    };

    Ok(DerivedRates {
        monthly,
        daily,
        hourly,
        minute: hourly / MINUTES_PER_HOUR,
    })
}

/// Monthly-equivalent gross used as statutory bracket input.
pub fn monthly_equivalent_gross(profile: &PayProfileSnapshot) -> Result<Decimal, CoreError> {
    derive_rates(profile).map(|r| r.monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn profile(wage_type: WageType, base_rate: Decimal) -> PayProfileSnapshot {
        PayProfileSnapshot {
            wage_type,
            base_rate,
            pay_frequency: PayFrequency::SemiMonthly,
        }
    }

    #[test]
    fn monthly_rate_divides_by_26_and_8() {
        let rates = derive_rates(&profile(WageType::Monthly, dec!(26000))).unwrap();
        assert_eq!(rates.daily, dec!(1000));
        assert_eq!(rates.hourly, dec!(125));
        assert_eq!(rates.minute, dec!(125) / dec!(60));
    }

    #[test]
    fn daily_rate_scales_both_directions() {
        let rates = derive_rates(&profile(WageType::Daily, dec!(800))).unwrap();
        assert_eq!(rates.hourly, dec!(100));
        assert_eq!(rates.monthly, dec!(20800));
    }

    #[test]
    fn hourly_rate_multiplies_up() {
        let rates = derive_rates(&profile(WageType::Hourly, dec!(150))).unwrap();
        assert_eq!(rates.daily, dec!(1200));
        assert_eq!(rates.monthly, dec!(31200));
        assert_eq!(rates.minute, dec!(2.5));
    }

    #[test]
    fn zero_base_rate_is_invalid() {
        let err = derive_rates(&profile(WageType::Monthly, Decimal::ZERO)).unwrap_err();
        assert_matches!(err, CoreError::InvalidRateConfig(_));
    }

    #[test]
    fn negative_base_rate_is_invalid() {
        let err = derive_rates(&profile(WageType::Daily, dec!(-1))).unwrap_err();
        assert_matches!(err, CoreError::InvalidRateConfig(_));
    }

    #[test]
    fn monthly_equivalent_for_daily_wage_is_26_days() {
        let gross = monthly_equivalent_gross(&profile(WageType::Daily, dec!(645))).unwrap();
        assert_eq!(gross, dec!(16770));
    }
}
