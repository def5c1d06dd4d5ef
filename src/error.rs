//! Error types for the payroll computation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The taxonomy distinguishes configuration errors (malformed or missing
//! bracket tables — fatal for the affected period type, never silently
//! defaulted) from per-employee input errors (rejected individually without
//! aborting a batch). Valid-but-noteworthy outcomes such as a negative net
//! pay are not errors; they surface as warnings on the payslip itself.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EarningsKind, Money, PeriodType};

/// The main error type for the payroll computation engine.
///
/// Every variant carries enough context for audit traceability: which table,
/// which employee, which offending value.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table failed validation at construction time.
    ///
    /// Gaps, overlaps, a bounded top bracket or an out-of-range rate are all
    /// configuration-integrity defects; they are rejected here so that bracket
    /// lookup can never fail for a well-formed table.
    #[error("Malformed bracket table '{table}': {message}")]
    MalformedBracketTable {
        /// The identifier of the offending table.
        table: String,
        /// A description of the structural defect.
        message: String,
    },

    /// No bracket in the table matched the looked-up value.
    ///
    /// For a validated table this can only happen for a negative input value.
    #[error("No bracket in table '{table}' matches value {value}")]
    NoMatchingBracket {
        /// The identifier of the table that was searched.
        table: String,
        /// The value that failed to match.
        value: Money,
    },

    /// No withholding tax table is effective for the period type and date.
    ///
    /// This is reported rather than defaulted to zero: silent zero tax is the
    /// most dangerous failure mode in this domain.
    #[error("No withholding tax table active for {period_type} periods on {date}")]
    NoActiveTaxTable {
        /// The period type that had no active table.
        period_type: PeriodType,
        /// The calculation date used for table selection.
        date: NaiveDate,
    },

    /// An earnings line carried a negative amount.
    ///
    /// Negative amounts must be modeled as deduction lines so that the
    /// gross-pay invariant stays auditable.
    #[error("Negative earnings line for employee '{employee_id}': {kind} {amount}")]
    NegativeEarningsLine {
        /// The employee whose input carried the bad line.
        employee_id: String,
        /// The kind of earnings line.
        kind: EarningsKind,
        /// The offending negative amount.
        amount: Money,
    },

    /// A period input was structurally invalid.
    #[error("Invalid input for employee '{employee_id}': field '{field}': {message}")]
    InvalidInput {
        /// The employee whose input was rejected.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns true for configuration-integrity errors.
    ///
    /// Configuration errors abort every computation that depends on the
    /// affected tables; input errors are rejected per employee and the rest
    /// of the batch continues.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::MalformedBracketTable { .. }
                | EngineError::NoMatchingBracket { .. }
                | EngineError::NoActiveTaxTable { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
