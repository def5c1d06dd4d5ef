//! Configuration types for statutory schedules.
//!
//! This module contains the raw structures deserialized from YAML schedule
//! files and the validated [`ScheduleSet`] the engine computes against. Raw
//! specs carry plain decimals; conversion into domain types goes through the
//! validating constructors so a malformed file is rejected at load time, not
//! mid-run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    AppliesOn, Bracket, BracketFormula, BracketTable, ContributionRule, TaxSchedule,
};
use crate::error::{EngineError, EngineResult};
use crate::models::Money;

/// Metadata about a schedule directory.
///
/// Identifies the jurisdiction and revision the engine is computing under.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// The schedule set code (e.g., "PH-TRAIN").
    pub code: String,
    /// The human-readable name of the schedule set.
    pub name: String,
    /// The version or effective date of the schedule set.
    pub version: String,
    /// URL to the official source documentation.
    pub source_url: String,
}

/// One bracket row as written in a YAML file.
///
/// Exactly one formula must be given: `flat`, `base` + `rate`, or `percent`.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketSpec {
    /// Lower bound of the bracket, inclusive.
    pub lower: Decimal,
    /// Upper bound of the bracket, exclusive. Omitted for the top bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Fixed amount regardless of where the value falls in the bracket.
    #[serde(default)]
    pub flat: Option<Decimal>,
    /// Cumulative base amount, paired with `rate`.
    #[serde(default)]
    pub base: Option<Decimal>,
    /// Marginal rate applied to the excess over `lower`, paired with `base`.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Rate applied to the full value, not just the excess.
    #[serde(default)]
    pub percent: Option<Decimal>,
}

impl BracketSpec {
    /// Converts the raw row into a domain [`Bracket`].
    pub fn to_bracket(&self, table: &str) -> EngineResult<Bracket> {
        let formula = match (self.flat, self.base, self.rate, self.percent) {
            (Some(amount), None, None, None) => BracketFormula::Flat(Money::new(amount)),
            (None, Some(base), Some(rate), None) => BracketFormula::BasePlusRate {
                base: Money::new(base),
                rate,
            },
            (None, None, None, Some(rate)) => BracketFormula::PercentOfBase { rate },
            _ => {
                return Err(EngineError::MalformedBracketTable {
                    table: table.to_string(),
                    message: format!(
                        "bracket at lower {} must specify exactly one of flat, base+rate, or percent",
                        self.lower
                    ),
                });
            }
        };

        Ok(Bracket {
            lower: Money::new(self.lower),
            upper: self.upper.map(Money::new),
            formula,
        })
    }
}

/// One contribution schedule from contributions.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionSpec {
    /// Stable identifier, used as the payslip line key.
    pub id: String,
    /// The human-readable schedule name.
    pub name: String,
    /// Statute or circular reference for the schedule.
    pub reference: String,
    /// Which sub-period of a semi-monthly month the rule applies to.
    pub applies_on: AppliesOn,
    /// Fraction of the total contribution borne by the employee.
    pub employee_share: Decimal,
    /// Flat amount added to the employer's share after the split.
    #[serde(default)]
    pub employer_flat_adder: Option<Decimal>,
    /// The tiered amount table.
    pub brackets: Vec<BracketSpec>,
}

/// Contributions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Contribution schedules, in payslip line order.
    pub contributions: Vec<ContributionSpec>,
}

/// The four withholding tables of one dated tax revision.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTablesSpec {
    /// Brackets for monthly pay periods.
    pub monthly: Vec<BracketSpec>,
    /// Brackets for semi-monthly pay periods.
    pub semi_monthly: Vec<BracketSpec>,
    /// Brackets for weekly pay periods.
    pub weekly: Vec<BracketSpec>,
    /// Brackets for daily pay periods.
    pub daily: Vec<BracketSpec>,
}

/// One dated tax file from the tax directory.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxFileConfig {
    /// First date (inclusive) these tables are effective.
    pub effective_from: NaiveDate,
    /// First date (exclusive) these tables stop being effective.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The per-period-type withholding tables.
    pub tables: TaxTablesSpec,
}

impl ContributionSpec {
    /// Converts the raw spec into a validated [`ContributionRule`].
    pub fn to_rule(&self) -> EngineResult<ContributionRule> {
        let brackets = self
            .brackets
            .iter()
            .map(|b| b.to_bracket(&self.id))
            .collect::<EngineResult<Vec<_>>>()?;
        let table = BracketTable::new(&self.id, brackets)?;

        ContributionRule::new(
            &self.id,
            &self.name,
            &self.reference,
            table,
            self.applies_on,
            self.employee_share,
            self.employer_flat_adder.map(Money::new).unwrap_or_default(),
        )
    }
}

/// The complete, validated schedule set loaded from YAML files.
///
/// This is the snapshot a payroll run is computed against: the withholding
/// tax schedule plus the contribution rules in payslip line order.
#[derive(Debug, Clone)]
pub struct ScheduleSet {
    /// Schedule metadata.
    metadata: ScheduleMetadata,
    /// Dated withholding tax tables per period type.
    tax: TaxSchedule,
    /// Contribution rules, in payslip line order.
    contributions: Vec<ContributionRule>,
}

impl ScheduleSet {
    /// Creates a new ScheduleSet from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        tax: TaxSchedule,
        contributions: Vec<ContributionRule>,
    ) -> Self {
        Self {
            metadata,
            tax,
            contributions,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the withholding tax schedule.
    pub fn tax(&self) -> &TaxSchedule {
        &self.tax
    }

    /// Returns the contribution rules in payslip line order.
    pub fn contributions(&self) -> &[ContributionRule] {
        &self.contributions
    }
}
