//! Statutory payroll computation engine.
//!
//! This crate turns an employee's period earnings into a compliant net-pay
//! figure by applying progressive withholding-tax brackets and tiered
//! government contribution schedules (social-insurance, health-insurance and
//! housing-fund analogues), with exact decimal money arithmetic,
//! effective-date table selection and sub-period eligibility gating.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
