//! Earnings aggregation.
//!
//! Sums an employee's period earnings lines into gross pay. Negative
//! earnings are rejected rather than netted: reductions of pay belong in
//! deduction lines so the gross-pay invariant stays auditable.

use crate::error::{EngineError, EngineResult};
use crate::models::{EarningsLine, Money};

/// Sums all earnings lines into gross pay.
///
/// Fails with `NegativeEarningsLine` on the first negative line, carrying
/// the employee id for batch-level reporting. An empty line list is a valid
/// zero-gross period.
pub fn total_earnings(employee_id: &str, lines: &[EarningsLine]) -> EngineResult<Money> {
    for line in lines {
        if line.amount.is_negative() {
            return Err(EngineError::NegativeEarningsLine {
                employee_id: employee_id.to_string(),
                kind: line.kind,
                amount: line.amount,
            });
        }
    }
    Ok(lines.iter().map(|line| line.amount).sum())
}
