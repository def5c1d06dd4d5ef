//! Pay period types and sub-period subdivision.
//!
//! This module contains the [`PeriodType`] enum used to key withholding tax
//! tables and the [`SubPeriod`] enum used to gate which statutory
//! contributions apply within a semi-monthly month.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Money;

/// The pay frequency of a payroll run.
///
/// Withholding tax tables are keyed by period type; statutory contribution
/// bases stay monthly and are gated by sub-period instead.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{Money, PeriodType};
/// use std::str::FromStr;
///
/// let monthly = Money::from_str("25000.00").unwrap();
/// let half = PeriodType::SemiMonthly.from_monthly(monthly);
/// assert_eq!(half, Money::from_str("12500.00").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// One payroll run per calendar month.
    Monthly,
    /// Two payroll runs per calendar month (first half / second half).
    SemiMonthly,
    /// One payroll run per week.
    Weekly,
    /// One payroll run per working day.
    Daily,
}

impl PeriodType {
    /// Converts a monthly-equivalent amount into this period's amount.
    ///
    /// Divisors: monthly 1, semi-monthly 2, weekly 52/12, daily 261/12
    /// working days. The quotient is kept at full precision and rounded
    /// half-up to currency scale once.
    ///
    /// This is a convenience for callers deriving a period salary from a
    /// monthly contract figure; the engine itself never synthesizes gross
    /// pay from it.
    pub fn from_monthly(&self, monthly: Money) -> Money {
        let twelve = Decimal::from(12);
        let amount = match self {
            PeriodType::Monthly => return monthly,
            PeriodType::SemiMonthly => monthly.as_decimal() / Decimal::from(2),
            PeriodType::Weekly => monthly.as_decimal() * twelve / Decimal::from(52),
            PeriodType::Daily => monthly.as_decimal() * twelve / Decimal::from(261),
        };
        Money::new(amount)
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodType::Monthly => "monthly",
            PeriodType::SemiMonthly => "semi_monthly",
            PeriodType::Weekly => "weekly",
            PeriodType::Daily => "daily",
        };
        f.write_str(name)
    }
}

/// The half of the month a semi-monthly payroll run covers.
///
/// Certain statutory deductions apply only on one half; a contribution gated
/// to the other half is skipped entirely, not computed to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPeriod {
    /// The first half of the month.
    First,
    /// The second half of the month.
    Second,
}
