//! Statutory contribution rules.
//!
//! A [`ContributionRule`] wraps a bracket table (with floor/ceiling clamps
//! expressed as flat boundary brackets), a sub-period eligibility gate, a
//! split rule dividing the computed total between employee and employer, and
//! an optional employer-only flat surcharge.
//!
//! Eligibility gating is explicit: a rule that does not apply to the current
//! sub-period yields [`ContributionOutcome::Skipped`], not a zero amount, so
//! callers can keep skipped contributions off the payslip entirely while a
//! genuinely zero-computed one stays on it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Money, SubPeriod};

use super::BracketTable;

/// Which pay-period subdivision a contribution is collected on.
///
/// Payroll runs that are not semi-monthly cover the whole month, so every
/// gate matches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliesOn {
    /// Collected every pay period.
    Every,
    /// Collected only on the first half of the month.
    FirstHalf,
    /// Collected only on the second half of the month.
    SecondHalf,
}

/// The employee/employer split of a computed contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionShares {
    /// The share deducted from the employee's pay.
    pub employee: Money,
    /// The employer's share, including any flat surcharge.
    pub employer: Money,
}

/// The outcome of evaluating a contribution rule for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionOutcome {
    /// The rule applied; shares were computed (possibly zero).
    Computed(ContributionShares),
    /// The rule does not apply to this sub-period. Distinct from a zero
    /// amount: a skipped contribution must not appear on the payslip.
    Skipped,
}

/// One statutory contribution schedule.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::{
///     AppliesOn, Bracket, BracketFormula, BracketTable, ContributionOutcome, ContributionRule,
/// };
/// use payslip_engine::models::{Money, SubPeriod};
/// use std::str::FromStr;
///
/// let m = |s: &str| Money::from_str(s).unwrap();
/// let table = BracketTable::new(
///     "housing",
///     vec![
///         Bracket { lower: m("0"), upper: Some(m("5000")), formula: BracketFormula::PercentOfBase { rate: "0.04".parse().unwrap() } },
///         Bracket { lower: m("5000"), upper: None, formula: BracketFormula::Flat(m("200.00")) },
///     ],
/// ).unwrap();
/// let rule = ContributionRule::new(
///     "housing", "Housing Fund", "RA 9679", table,
///     AppliesOn::SecondHalf, "0.5".parse().unwrap(), Money::ZERO,
/// ).unwrap();
///
/// // Employee share capped at 100.00 by the ceiling bracket.
/// match rule.compute(m("25000.00"), Some(SubPeriod::Second)).unwrap() {
///     ContributionOutcome::Computed(shares) => assert_eq!(shares.employee, m("100.00")),
///     ContributionOutcome::Skipped => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRule {
    id: String,
    name: String,
    reference: String,
    table: BracketTable,
    applies_on: AppliesOn,
    employee_share: Decimal,
    employer_flat_adder: Money,
}

impl ContributionRule {
    /// Builds a rule, validating the split fraction and surcharge.
    ///
    /// `employee_share` is the employee's fraction of the computed total;
    /// the employer takes the exact remainder, so the two shares always
    /// reconstruct the bracket total to the minor unit. `employer_flat_adder`
    /// models a fixed employer-only surcharge added after the split.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        reference: impl Into<String>,
        table: BracketTable,
        applies_on: AppliesOn,
        employee_share: Decimal,
        employer_flat_adder: Money,
    ) -> EngineResult<Self> {
        let id = id.into();
        if employee_share < Decimal::ZERO || employee_share > Decimal::ONE {
            return Err(EngineError::MalformedBracketTable {
                table: id,
                message: format!("employee share {} is outside 0..=1", employee_share),
            });
        }
        if employer_flat_adder.is_negative() {
            return Err(EngineError::MalformedBracketTable {
                table: id,
                message: format!(
                    "employer flat adder {} must not be negative",
                    employer_flat_adder
                ),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            reference: reference.into(),
            table,
            applies_on,
            employee_share,
            employer_flat_adder,
        })
    }

    /// Returns the contribution identifier (e.g. "social_security").
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable schedule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the statute or circular reference for this schedule.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the sub-period gate.
    pub fn applies_on(&self) -> AppliesOn {
        self.applies_on
    }

    /// Returns true if the rule applies to the given sub-period.
    ///
    /// `None` means the period covers the whole month (monthly, weekly or
    /// daily runs), which satisfies every gate.
    pub fn applies_to(&self, sub_period: Option<SubPeriod>) -> bool {
        match self.applies_on {
            AppliesOn::Every => true,
            AppliesOn::FirstHalf => sub_period != Some(SubPeriod::Second),
            AppliesOn::SecondHalf => sub_period != Some(SubPeriod::First),
        }
    }

    /// Evaluates the rule against a monthly-equivalent base amount.
    ///
    /// Returns `Skipped` when gated out by the sub-period; otherwise finds
    /// the bracket for the base, applies its formula, and splits the total:
    /// employee share rounded from the configured fraction, employer taking
    /// the exact remainder plus the flat surcharge.
    pub fn compute(
        &self,
        base_amount: Money,
        sub_period: Option<SubPeriod>,
    ) -> EngineResult<ContributionOutcome> {
        if !self.applies_to(sub_period) {
            return Ok(ContributionOutcome::Skipped);
        }

        let total = self.table.amount_at(base_amount)?;
        let employee = Money::new(total.as_decimal() * self.employee_share);
        let employer = total - employee + self.employer_flat_adder;

        Ok(ContributionOutcome::Computed(ContributionShares {
            employee,
            employer,
        }))
    }
}
