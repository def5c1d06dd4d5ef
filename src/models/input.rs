//! Per-employee period input for one payroll run.
//!
//! This module defines [`EmployeePeriodInput`] and its earnings/deduction
//! line types. An input is created per payroll run per employee by the
//! orchestration layer; the engine treats it as immutable and a recomputed
//! run supersedes rather than mutates the previous payslip.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Money, PayslipKey, PeriodType, SubPeriod};

/// The kind of a gross-pay component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsKind {
    /// Base salary for the period.
    BasePay,
    /// Overtime pay.
    Overtime,
    /// Night/shift differential.
    NightDifferential,
    /// Holiday premium pay.
    Holiday,
    /// Allowances (meal, transport, and similar).
    Allowance,
}

impl fmt::Display for EarningsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EarningsKind::BasePay => "base_pay",
            EarningsKind::Overtime => "overtime",
            EarningsKind::NightDifferential => "night_differential",
            EarningsKind::Holiday => "holiday",
            EarningsKind::Allowance => "allowance",
        };
        f.write_str(name)
    }
}

/// The kind of a non-statutory deduction line.
///
/// Statutory contributions and withholding tax are computed by the engine,
/// never supplied as lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Unpaid absence.
    Absence,
    /// Tardiness/undertime.
    Tardiness,
    /// Any other employer-specific deduction.
    Other,
}

impl fmt::Display for DeductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeductionKind::Absence => "absence",
            DeductionKind::Tardiness => "tardiness",
            DeductionKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A single earnings component of gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsLine {
    /// The kind of earnings.
    pub kind: EarningsKind,
    /// The amount, which must be non-negative.
    pub amount: Money,
}

/// A single non-statutory deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The kind of deduction.
    pub kind: DeductionKind,
    /// The amount to deduct.
    pub amount: Money,
}

/// Everything the engine needs to compute one employee's payslip for one
/// payroll run.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{
///     EarningsKind, EarningsLine, EmployeePeriodInput, Money, PeriodType, SubPeriod,
/// };
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let input = EmployeePeriodInput {
///     company_id: "acme".to_string(),
///     payroll_run_id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     period_type: PeriodType::SemiMonthly,
///     sub_period: Some(SubPeriod::Second),
///     monthly_equivalent_salary: Money::from_str("25000.00").unwrap(),
///     earnings_lines: vec![EarningsLine {
///         kind: EarningsKind::BasePay,
///         amount: Money::from_str("12500.00").unwrap(),
///     }],
///     other_deduction_lines: vec![],
///     loan_amount: Money::ZERO,
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePeriodInput {
    /// The company the payroll run belongs to.
    pub company_id: String,
    /// The payroll run identifier.
    pub payroll_run_id: Uuid,
    /// The employee identifier.
    pub employee_id: String,
    /// The pay frequency of the run.
    pub period_type: PeriodType,
    /// The half of the month covered; required iff the period is
    /// semi-monthly.
    #[serde(default)]
    pub sub_period: Option<SubPeriod>,
    /// The employee's monthly-equivalent salary, the base for statutory
    /// contribution schedules.
    pub monthly_equivalent_salary: Money,
    /// Gross-pay components for the period.
    pub earnings_lines: Vec<EarningsLine>,
    /// Non-statutory deductions (absences, tardiness, other).
    #[serde(default)]
    pub other_deduction_lines: Vec<DeductionLine>,
    /// Outstanding loan amortization to deduct this period.
    #[serde(default)]
    pub loan_amount: Money,
}

impl EmployeePeriodInput {
    /// Returns the idempotent persistence key for this input's payslip.
    pub fn key(&self) -> PayslipKey {
        PayslipKey {
            company_id: self.company_id.clone(),
            payroll_run_id: self.payroll_run_id,
            employee_id: self.employee_id.clone(),
        }
    }

    /// Validates structural consistency of the input.
    ///
    /// Rejected inputs fail only this employee's computation; a batch run
    /// continues with the remaining employees.
    pub fn validate(&self) -> EngineResult<()> {
        match (self.period_type, self.sub_period) {
            (PeriodType::SemiMonthly, None) => {
                return Err(EngineError::InvalidInput {
                    employee_id: self.employee_id.clone(),
                    field: "sub_period".to_string(),
                    message: "required for semi-monthly periods".to_string(),
                });
            }
            (PeriodType::SemiMonthly, Some(_)) => {}
            (_, Some(_)) => {
                return Err(EngineError::InvalidInput {
                    employee_id: self.employee_id.clone(),
                    field: "sub_period".to_string(),
                    message: format!("not applicable to {} periods", self.period_type),
                });
            }
            (_, None) => {}
        }

        if self.monthly_equivalent_salary.is_negative() {
            return Err(EngineError::InvalidInput {
                employee_id: self.employee_id.clone(),
                field: "monthly_equivalent_salary".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if self.loan_amount.is_negative() {
            return Err(EngineError::InvalidInput {
                employee_id: self.employee_id.clone(),
                field: "loan_amount".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        // A negative deduction would silently raise net pay above gross;
        // pay increases belong in earnings lines.
        if let Some(line) = self
            .other_deduction_lines
            .iter()
            .find(|line| line.amount.is_negative())
        {
            return Err(EngineError::InvalidInput {
                employee_id: self.employee_id.clone(),
                field: "other_deduction_lines".to_string(),
                message: format!("{} line must not be negative: {}", line.kind, line.amount),
            });
        }

        Ok(())
    }
}
