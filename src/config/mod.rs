//! Configuration loading and types for statutory schedules.
//!
//! This module handles loading schedule sets from YAML files: set
//! metadata, the dated withholding tax tables, and the contribution
//! schedules with their split and eligibility parameters.

mod loader;
mod types;

pub use loader::ScheduleLoader;
pub use types::{
    BracketSpec, ContributionSpec, ContributionsConfig, ScheduleMetadata, ScheduleSet,
    TaxFileConfig, TaxTablesSpec,
};
