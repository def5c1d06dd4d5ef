//! Core data models for the payroll computation engine.
//!
//! This module contains the monetary value type, period/sub-period enums,
//! the per-employee period input and the computed payslip.

mod input;
mod money;
mod payslip;
mod period;

pub use input::{DeductionKind, DeductionLine, EarningsKind, EarningsLine, EmployeePeriodInput};
pub use money::{CURRENCY_SCALE, Money};
pub use payslip::{
    DeductionsSummary, EarningsSummary, Payslip, PayslipKey, PayslipStatus, PayslipWarning,
    StatutoryLine,
};
pub use period::{PeriodType, SubPeriod};
