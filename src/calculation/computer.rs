//! Payslip computation and batch orchestration.
//!
//! [`PayslipComputer`] runs the linear per-employee pipeline: earnings →
//! contributions → taxable income → withholding tax → totals → payslip.
//! Each step depends on the previous step's output; there is no branching
//! back. The computer is pure apart from read-only access to the pinned
//! [`ScheduleSet`], so computations for distinct employees are independent
//! and safe to fan out.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::ScheduleSet;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DeductionsSummary, EarningsSummary, EmployeePeriodInput, Money, Payslip, PayslipStatus,
    PayslipWarning, PeriodType, StatutoryLine,
};

use super::contribution::ContributionOutcome;
use super::deductions::{statutory_employee_total, total_deductions};
use super::earnings::total_earnings;

/// The engine version stamped on every payslip.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cooperative cancellation for a payroll run.
///
/// Cancelling stops the dispatch of new per-employee computations; the
/// computation in flight finishes normally so no partial payslip exists.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A per-employee rejection collected during a batch run.
#[derive(Debug)]
pub struct InputFailure {
    /// The employee whose input was rejected.
    pub employee_id: String,
    /// Why the input was rejected.
    pub error: EngineError,
}

/// A configuration error that aborted one period type of a batch run.
///
/// Carries the employee whose computation first surfaced the error, so the
/// operator can reproduce it from the run report alone.
#[derive(Debug)]
pub struct ConfigFailure {
    /// The employee whose computation surfaced the error.
    pub employee_id: String,
    /// The period type the error poisoned.
    pub period_type: PeriodType,
    /// The underlying configuration error.
    pub error: EngineError,
}

/// The result of a batch payroll run.
///
/// Input errors are collected per employee while the batch continues;
/// configuration errors abort every remaining computation of the affected
/// period type, since retrying them against the same tables can only fail
/// the same way.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Successfully computed payslips, in input order.
    pub payslips: Vec<Payslip>,
    /// Per-employee input rejections.
    pub input_failures: Vec<InputFailure>,
    /// Configuration errors, one per poisoned period type, each with the
    /// employee whose computation surfaced it.
    pub config_failures: Vec<ConfigFailure>,
    /// True if the run was cancelled before dispatching every input.
    pub cancelled: bool,
}

/// Computes payslips against a pinned schedule snapshot.
///
/// The snapshot is captured once per run (selected by `as_of`), so
/// recomputing a run later reproduces the same payslips even if schedules
/// have since been replaced.
#[derive(Debug, Clone)]
pub struct PayslipComputer<'a> {
    schedules: &'a ScheduleSet,
}

impl<'a> PayslipComputer<'a> {
    /// Creates a computer over a schedule snapshot.
    pub fn new(schedules: &'a ScheduleSet) -> Self {
        Self { schedules }
    }

    /// Computes one employee's payslip.
    ///
    /// The pipeline is strictly sequential:
    /// 1. Sum earnings lines into gross pay.
    /// 2. Evaluate each contribution rule against the monthly-equivalent
    ///    salary, skipping rules gated to another sub-period.
    /// 3. Taxable income = gross minus employee statutory shares, clamped
    ///    at zero (deductions above gross mean zero tax, not negative tax).
    /// 4. Withholding tax from the period-type table active on `as_of`.
    /// 5. Total deductions and net pay. A negative net pay is reported as
    ///    computed with a `NegativeNetPay` warning, never clamped.
    ///
    /// Identical inputs against the same snapshot produce byte-identical
    /// payslips.
    pub fn compute(&self, input: &EmployeePeriodInput, as_of: NaiveDate) -> EngineResult<Payslip> {
        input.validate()?;

        let gross = total_earnings(&input.employee_id, &input.earnings_lines)?;
        debug!(
            employee_id = %input.employee_id,
            gross = %gross,
            "earnings computed"
        );

        let mut statutory = Vec::new();
        for rule in self.schedules.contributions() {
            match rule.compute(input.monthly_equivalent_salary, input.sub_period)? {
                ContributionOutcome::Computed(shares) => {
                    statutory.push(StatutoryLine {
                        contribution: rule.id().to_string(),
                        reference: rule.reference().to_string(),
                        employee_share: shares.employee,
                        employer_share: shares.employer,
                    });
                }
                ContributionOutcome::Skipped => {
                    debug!(
                        employee_id = %input.employee_id,
                        contribution = rule.id(),
                        "contribution skipped for this sub-period"
                    );
                }
            }
        }

        let employee_statutory = statutory_employee_total(&statutory);
        let taxable_income = (gross - employee_statutory).max(Money::ZERO);
        let withholding_tax =
            self.schedules
                .tax()
                .compute(taxable_income, input.period_type, as_of)?;
        debug!(
            employee_id = %input.employee_id,
            taxable_income = %taxable_income,
            withholding_tax = %withholding_tax,
            "tax computed"
        );

        let total = total_deductions(
            &statutory,
            withholding_tax,
            input.loan_amount,
            &input.other_deduction_lines,
        );
        let net_pay = gross - total;

        let mut warnings = Vec::new();
        if net_pay.is_negative() {
            warn!(
                employee_id = %input.employee_id,
                net_pay = %net_pay,
                "deductions exceed gross pay"
            );
            warnings.push(PayslipWarning::NegativeNetPay);
        }

        Ok(Payslip {
            key: input.key(),
            period_type: input.period_type,
            sub_period: input.sub_period,
            engine_version: ENGINE_VERSION.to_string(),
            earnings: EarningsSummary {
                lines: input.earnings_lines.clone(),
                total: gross,
            },
            taxable_income,
            deductions: DeductionsSummary {
                statutory,
                withholding_tax,
                loan: input.loan_amount,
                other: input.other_deduction_lines.clone(),
                total,
            },
            net_pay,
            status: PayslipStatus::Draft,
            warnings,
        })
    }

    /// Computes a batch of inputs with partial-failure semantics.
    ///
    /// Bad employee records are skipped and reported without blocking the
    /// batch. A configuration error (malformed table, no active tax table)
    /// poisons its period type: remaining inputs of that type are not
    /// dispatched and the error is reported once for the operator who
    /// maintains the tables. Cancellation stops dispatching new inputs.
    pub fn compute_run(
        &self,
        inputs: &[EmployeePeriodInput],
        as_of: NaiveDate,
        cancel: &CancelToken,
    ) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        let mut poisoned: HashSet<PeriodType> = HashSet::new();

        for input in inputs {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            if poisoned.contains(&input.period_type) {
                continue;
            }

            match self.compute(input, as_of) {
                Ok(payslip) => outcome.payslips.push(payslip),
                Err(error) if error.is_configuration() => {
                    warn!(
                        employee_id = %input.employee_id,
                        period_type = %input.period_type,
                        %error,
                        "configuration error, aborting this period type"
                    );
                    poisoned.insert(input.period_type);
                    outcome.config_failures.push(ConfigFailure {
                        employee_id: input.employee_id.clone(),
                        period_type: input.period_type,
                        error,
                    });
                }
                Err(error) => {
                    warn!(
                        employee_id = %input.employee_id,
                        %error,
                        "input rejected, batch continues"
                    );
                    outcome.input_failures.push(InputFailure {
                        employee_id: input.employee_id.clone(),
                        error,
                    });
                }
            }
        }

        outcome
    }
}
