//! Deduction aggregation.
//!
//! Combines employee statutory shares, withholding tax, loan amortization
//! and other deduction lines (absences, tardiness, other) into the payslip's
//! total deductions. Every line item arrives already rounded to currency
//! scale, so the total is an exact sum with no residual drift.

use crate::models::{DeductionLine, Money, StatutoryLine};

/// Sums the employee-side statutory shares of the applied contributions.
///
/// Skipped contributions are not in the slice at all, per the eligibility
/// gating contract.
pub fn statutory_employee_total(statutory: &[StatutoryLine]) -> Money {
    statutory.iter().map(|line| line.employee_share).sum()
}

/// Sums every deduction the employee bears this period.
pub fn total_deductions(
    statutory: &[StatutoryLine],
    withholding_tax: Money,
    loan_amount: Money,
    other_lines: &[DeductionLine],
) -> Money {
    let other: Money = other_lines.iter().map(|line| line.amount).sum();
    statutory_employee_total(statutory) + withholding_tax + loan_amount + other
}
