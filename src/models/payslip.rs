//! Payslip result models.
//!
//! This module contains the [`Payslip`] type and its associated structures
//! that capture all outputs from one employee's payroll computation:
//! earnings, statutory contribution shares, withholding tax, other
//! deductions, net pay and policy warnings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DeductionLine, EarningsLine, Money, PeriodType, SubPeriod};

/// The idempotent persistence key of a payslip.
///
/// Computing the same key twice with the same inputs and the same schedule
/// snapshot yields an identical payslip, so an upsert keyed by this value
/// never creates duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayslipKey {
    /// The company the payroll run belongs to.
    pub company_id: String,
    /// The payroll run identifier.
    pub payroll_run_id: Uuid,
    /// The employee identifier.
    pub employee_id: String,
}

/// Gross-pay side of a payslip: the input lines and their exact sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    /// The earnings lines the total was computed from.
    pub lines: Vec<EarningsLine>,
    /// The total of all lines (gross pay).
    pub total: Money,
}

/// One statutory contribution's computed shares.
///
/// A contribution skipped by sub-period gating does not appear here at all;
/// a contribution that computed to zero does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryLine {
    /// The contribution identifier (e.g. "social_security").
    pub contribution: String,
    /// Statute or circular reference for the schedule applied.
    pub reference: String,
    /// The employee's share, deducted from pay.
    pub employee_share: Money,
    /// The employer's share, including any employer-only flat surcharge.
    pub employer_share: Money,
}

/// Deduction side of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsSummary {
    /// Statutory contributions applied this period, in schedule order.
    pub statutory: Vec<StatutoryLine>,
    /// Withholding tax on taxable income.
    pub withholding_tax: Money,
    /// Loan amortization deducted this period.
    pub loan: Money,
    /// Other deduction lines (absences, tardiness, other).
    pub other: Vec<DeductionLine>,
    /// The total of employee statutory shares, tax, loan and other lines.
    pub total: Money,
}

/// Lifecycle status of a payslip.
///
/// The engine only ever creates `Draft` payslips; the transitions to
/// `Approved` and `Paid` belong to the external approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Freshly computed, not yet approved.
    Draft,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
}

/// A valid-but-noteworthy outcome surfaced on the payslip.
///
/// Warnings are never raised as errors: they represent situations the
/// caller or reviewer must act on, not computation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipWarning {
    /// Deductions exceeded gross pay. The negative net pay is reported
    /// as computed, never clamped to zero.
    NegativeNetPay,
}

/// The computed payslip for one employee and one payroll run.
///
/// Invariants, enforced by the computer and pinned by tests:
/// `earnings.total` is the exact sum of the earnings lines,
/// `taxable_income = max(0, earnings.total − Σ employee statutory shares)`,
/// and `net_pay = earnings.total − deductions.total` to the minor unit.
///
/// The payslip carries no timestamps or generated identifiers, so
/// recomputing with identical inputs and the same schedule snapshot is
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The idempotent persistence key.
    pub key: PayslipKey,
    /// The pay frequency this slip was computed for.
    pub period_type: PeriodType,
    /// The sub-period covered, for semi-monthly runs.
    pub sub_period: Option<SubPeriod>,
    /// The engine version that produced this payslip.
    pub engine_version: String,
    /// Gross-pay side.
    pub earnings: EarningsSummary,
    /// Gross earnings minus employee statutory shares, clamped at zero.
    pub taxable_income: Money,
    /// Deduction side.
    pub deductions: DeductionsSummary,
    /// Gross earnings minus total deductions; may be negative.
    pub net_pay: Money,
    /// Lifecycle status; always `Draft` when produced by the engine.
    pub status: PayslipStatus,
    /// Policy warnings attached to this computation.
    pub warnings: Vec<PayslipWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeductionKind, EarningsKind};
    use std::collections::HashMap;
    use std::str::FromStr;

    fn m(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn create_sample_payslip() -> Payslip {
        Payslip {
            key: PayslipKey {
                company_id: "acme".to_string(),
                payroll_run_id: Uuid::nil(),
                employee_id: "emp_001".to_string(),
            },
            period_type: PeriodType::SemiMonthly,
            sub_period: Some(SubPeriod::Second),
            engine_version: "0.1.0".to_string(),
            earnings: EarningsSummary {
                lines: vec![EarningsLine {
                    kind: EarningsKind::BasePay,
                    amount: m("12500.00"),
                }],
                total: m("12500.00"),
            },
            taxable_income: m("10650.00"),
            deductions: DeductionsSummary {
                statutory: vec![StatutoryLine {
                    contribution: "social_security".to_string(),
                    reference: "RA 11199".to_string(),
                    employee_share: m("1125.00"),
                    employer_share: m("2260.00"),
                }],
                withholding_tax: m("34.95"),
                loan: Money::ZERO,
                other: vec![DeductionLine {
                    kind: DeductionKind::Tardiness,
                    amount: m("0.00"),
                }],
                total: m("1884.95"),
            },
            net_pay: m("10615.05"),
            status: PayslipStatus::Draft,
            warnings: vec![],
        }
    }

    /// PS-001: gross/net identity holds on the sample
    #[test]
    fn test_net_pay_identity() {
        let slip = create_sample_payslip();
        assert_eq!(slip.net_pay, slip.earnings.total - slip.deductions.total);
        assert_eq!(slip.net_pay.to_string(), "10615.05");
    }

    /// PS-002: key equality and hashing identify the same run/employee
    #[test]
    fn test_key_equality_and_hash() {
        let a = create_sample_payslip().key;
        let b = create_sample_payslip().key;
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));

        let other = PayslipKey {
            company_id: "acme".to_string(),
            payroll_run_id: Uuid::nil(),
            employee_id: "emp_002".to_string(),
        };
        assert!(!map.contains_key(&other));
    }

    #[test]
    fn test_payslip_serialization() {
        let slip = create_sample_payslip();
        let json = serde_json::to_string(&slip).unwrap();
        assert!(json.contains("\"company_id\":\"acme\""));
        assert!(json.contains("\"period_type\":\"semi_monthly\""));
        assert!(json.contains("\"sub_period\":\"second\""));
        assert!(json.contains("\"status\":\"draft\""));
        assert!(json.contains("\"withholding_tax\":\"34.95\""));
        assert!(json.contains("\"net_pay\":\"10615.05\""));
    }

    #[test]
    fn test_payslip_round_trip() {
        let slip = create_sample_payslip();
        let json = serde_json::to_string(&slip).unwrap();
        let back: Payslip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slip);
    }

    #[test]
    fn test_warning_serialization() {
        let json = serde_json::to_string(&PayslipWarning::NegativeNetPay).unwrap();
        assert_eq!(json, "\"negative_net_pay\"");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Draft).unwrap(),
            "\"draft\""
        );
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&PayslipStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_zero_valued_statutory_line_is_representable() {
        // A contribution that computes to zero stays on the slip; only a
        // skipped contribution is absent.
        let line = StatutoryLine {
            contribution: "housing".to_string(),
            reference: "RA 9679".to_string(),
            employee_share: Money::ZERO,
            employer_share: Money::ZERO,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"employee_share\":\"0\""));
    }
}
