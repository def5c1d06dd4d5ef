//! Calculation logic for the payslip engine.
//!
//! This module contains all the computation building blocks: bracket tables
//! and their boundary-matching rules, dated withholding tax schedules,
//! contribution rules with employee/employer splits and sub-period gating,
//! earnings and deduction aggregation, and the payslip computer that runs
//! the full per-employee pipeline and orchestrates batch runs.

mod bracket;
mod computer;
mod contribution;
mod deductions;
mod earnings;
mod tax;

pub use bracket::{Bracket, BracketFormula, BracketTable};
pub use computer::{
    CancelToken, ConfigFailure, ENGINE_VERSION, InputFailure, PayslipComputer, RunOutcome,
};
pub use contribution::{
    AppliesOn, ContributionOutcome, ContributionRule, ContributionShares,
};
pub use deductions::{statutory_employee_total, total_deductions};
pub use earnings::total_earnings;
pub use tax::{TaxSchedule, TaxTable};
