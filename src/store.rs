//! Idempotent payslip persistence.
//!
//! Payslips are stored under their [`PayslipKey`], so re-running a payroll
//! batch overwrites each employee's draft instead of accumulating
//! duplicates. The [`PayslipStore`] trait is the seam for a real backing
//! store; [`InMemoryPayslipStore`] is the engine's default.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{Payslip, PayslipKey};

/// Keyed payslip storage with upsert semantics.
pub trait PayslipStore {
    /// Inserts or replaces the payslip stored under its key.
    fn upsert(&self, payslip: Payslip);

    /// Returns the payslip stored under the key, if any.
    fn get(&self, key: &PayslipKey) -> Option<Payslip>;

    /// Returns the number of stored payslips.
    fn len(&self) -> usize;

    /// Returns true if the store holds no payslips.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory payslip store.
#[derive(Debug, Default)]
pub struct InMemoryPayslipStore {
    payslips: Mutex<HashMap<PayslipKey, Payslip>>,
}

impl InMemoryPayslipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayslipStore for InMemoryPayslipStore {
    fn upsert(&self, payslip: Payslip) {
        let mut payslips = self.payslips.lock().unwrap();
        payslips.insert(payslip.key.clone(), payslip);
    }

    fn get(&self, key: &PayslipKey) -> Option<Payslip> {
        let payslips = self.payslips.lock().unwrap();
        payslips.get(key).cloned()
    }

    fn len(&self) -> usize {
        let payslips = self.payslips.lock().unwrap();
        payslips.len()
    }
}
