//! Withholding tax schedules.
//!
//! A [`TaxSchedule`] holds one bracket table per period type and effective
//! window, and computes withholding as the bracket's fixed base plus the
//! marginal rate on the excess over the bracket's lower bound. Selection by
//! `as_of` date makes computations reproducible regardless of wall-clock
//! time; a missing table is a reported configuration error, never a silent
//! zero tax.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Money, PeriodType};

use super::BracketTable;

/// One withholding bracket table with its period type and effective window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTable {
    /// The period type this table applies to.
    pub period_type: PeriodType,
    /// First date (inclusive) the table is effective.
    pub effective_from: NaiveDate,
    /// First date (exclusive) the table is no longer effective; `None` for
    /// an open-ended table.
    pub effective_to: Option<NaiveDate>,
    /// The bracket table holding base-plus-marginal-rate brackets.
    pub table: BracketTable,
}

impl TaxTable {
    /// Returns true if the table's `[effective_from, effective_to)` window
    /// contains `as_of`.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        as_of >= self.effective_from && self.effective_to.is_none_or(|to| as_of < to)
    }
}

/// The full set of withholding tables across period types and effective
/// windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    tables: Vec<TaxTable>,
}

impl TaxSchedule {
    /// Builds a schedule, rejecting overlapping effective windows within a
    /// period type.
    pub fn new(mut tables: Vec<TaxTable>) -> EngineResult<Self> {
        tables.sort_by_key(|t| (t.period_type, t.effective_from));

        for pair in tables.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.period_type != next.period_type {
                continue;
            }
            let overlaps = match prev.effective_to {
                None => true,
                Some(to) => to > next.effective_from,
            };
            if overlaps {
                return Err(EngineError::MalformedBracketTable {
                    table: next.table.id().to_string(),
                    message: format!(
                        "effective window starting {} overlaps the previous {} table",
                        next.effective_from, prev.period_type
                    ),
                });
            }
        }

        Ok(Self { tables })
    }

    /// Returns all tables, sorted by period type and effective date.
    pub fn tables(&self) -> &[TaxTable] {
        &self.tables
    }

    /// Selects the table for `period_type` whose window contains `as_of`.
    pub fn table_for(&self, period_type: PeriodType, as_of: NaiveDate) -> EngineResult<&TaxTable> {
        self.tables
            .iter()
            .find(|t| t.period_type == period_type && t.is_active(as_of))
            .ok_or(EngineError::NoActiveTaxTable {
                period_type,
                date: as_of,
            })
    }

    /// Computes withholding tax on `taxable_income` for the period type.
    ///
    /// `tax = bracket.base + (taxable − bracket.lower) × bracket.rate`,
    /// rounded half-up at the final step only. Pure function of its inputs
    /// and the schedule contents.
    pub fn compute(
        &self,
        taxable_income: Money,
        period_type: PeriodType,
        as_of: NaiveDate,
    ) -> EngineResult<Money> {
        let table = self.table_for(period_type, as_of)?;
        table.table.amount_at(taxable_income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{Bracket, BracketFormula};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn m(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, base: &str, rate: &str) -> Bracket {
        Bracket {
            lower: m(lower),
            upper: upper.map(m),
            formula: BracketFormula::BasePlusRate {
                base: m(base),
                rate: dec(rate),
            },
        }
    }

    fn table(
        id: &str,
        period_type: PeriodType,
        rows: Vec<Bracket>,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> TaxTable {
        TaxTable {
            period_type,
            effective_from: from,
            effective_to: to,
            table: BracketTable::new(id, rows).unwrap(),
        }
    }

    /// Graduated withholding tables for all four period types, effective
    /// 2023-01-01, matching the worked schedule data in `config/ph`.
    fn create_test_schedule() -> TaxSchedule {
        let from = date(2023, 1, 1);
        TaxSchedule::new(vec![
            table(
                "withholding_monthly",
                PeriodType::Monthly,
                vec![
                    bracket("0", Some("20833"), "0", "0"),
                    bracket("20833", Some("33333"), "0", "0.15"),
                    bracket("33333", Some("66667"), "1875.00", "0.20"),
                    bracket("66667", Some("166667"), "8541.80", "0.25"),
                    bracket("166667", Some("666667"), "33541.80", "0.30"),
                    bracket("666667", None, "183541.80", "0.35"),
                ],
                from,
                None,
            ),
            table(
                "withholding_semi_monthly",
                PeriodType::SemiMonthly,
                vec![
                    bracket("0", Some("10417"), "0", "0"),
                    bracket("10417", Some("16667"), "0", "0.15"),
                    bracket("16667", Some("33333"), "937.50", "0.20"),
                    bracket("33333", Some("83333"), "4270.70", "0.25"),
                    bracket("83333", Some("333333"), "16770.70", "0.30"),
                    bracket("333333", None, "91770.70", "0.35"),
                ],
                from,
                None,
            ),
            table(
                "withholding_weekly",
                PeriodType::Weekly,
                vec![
                    bracket("0", Some("4808"), "0", "0"),
                    bracket("4808", Some("7692"), "0", "0.15"),
                    bracket("7692", Some("15385"), "432.60", "0.20"),
                    bracket("15385", Some("38462"), "1971.20", "0.25"),
                    bracket("38462", Some("153846"), "7740.45", "0.30"),
                    bracket("153846", None, "42355.65", "0.35"),
                ],
                from,
                None,
            ),
            table(
                "withholding_daily",
                PeriodType::Daily,
                vec![
                    bracket("0", Some("685"), "0", "0"),
                    bracket("685", Some("1096"), "0", "0.15"),
                    bracket("1096", Some("2192"), "61.65", "0.20"),
                    bracket("2192", Some("5479"), "280.85", "0.25"),
                    bracket("5479", Some("21918"), "1102.60", "0.30"),
                    bracket("21918", None, "6034.30", "0.35"),
                ],
                from,
                None,
            ),
        ])
        .unwrap()
    }

    /// TX-001: the exempt bracket computes zero tax
    #[test]
    fn test_exempt_bracket() {
        let schedule = create_test_schedule();
        let as_of = date(2023, 6, 15);
        assert_eq!(
            schedule
                .compute(m("15000.00"), PeriodType::Monthly, as_of)
                .unwrap(),
            m("0.00")
        );
    }

    /// TX-002: income on the exempt boundary resolves to the 15% bracket
    #[test]
    fn test_boundary_income_uses_upper_bracket() {
        let schedule = create_test_schedule();
        let as_of = date(2023, 6, 15);
        let table = schedule.table_for(PeriodType::Monthly, as_of).unwrap();
        let bracket = table.table.find(m("20833.00")).unwrap();
        assert_eq!(
            bracket.formula,
            BracketFormula::BasePlusRate {
                base: m("0"),
                rate: dec("0.15")
            }
        );
        // Zero excess over the bound, so the tax itself is still zero.
        assert_eq!(
            schedule
                .compute(m("20833.00"), PeriodType::Monthly, as_of)
                .unwrap(),
            m("0.00")
        );
    }

    /// TX-003: worked semi-monthly value from the end-to-end scenario
    #[test]
    fn test_semi_monthly_worked_value() {
        let schedule = create_test_schedule();
        // (10,650 - 10,417) * 15% = 34.95
        assert_eq!(
            schedule
                .compute(m("10650.00"), PeriodType::SemiMonthly, date(2023, 6, 15))
                .unwrap(),
            m("34.95")
        );
    }

    /// TX-004: each period type selects its own table
    #[test]
    fn test_per_period_type_tables() {
        let schedule = create_test_schedule();
        let as_of = date(2023, 6, 15);
        // Weekly: 432.60 + (10,000 - 7,692) * 20% = 894.20
        assert_eq!(
            schedule
                .compute(m("10000.00"), PeriodType::Weekly, as_of)
                .unwrap(),
            m("894.20")
        );
        // Daily: 61.65 + (1,500 - 1,096) * 20% = 142.45
        assert_eq!(
            schedule
                .compute(m("1500.00"), PeriodType::Daily, as_of)
                .unwrap(),
            m("142.45")
        );
        // Monthly top bracket: 183,541.80 + (1,000,000 - 666,667) * 35%
        assert_eq!(
            schedule
                .compute(m("1000000.00"), PeriodType::Monthly, as_of)
                .unwrap(),
            m("300208.35")
        );
    }

    /// TX-005: no active table is a reported error, not zero tax
    #[test]
    fn test_no_active_table_is_an_error() {
        let schedule = create_test_schedule();
        let result = schedule.compute(m("10000.00"), PeriodType::Monthly, date(2022, 12, 31));
        match result.unwrap_err() {
            EngineError::NoActiveTaxTable { period_type, date } => {
                assert_eq!(period_type, PeriodType::Monthly);
                assert_eq!(date, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
            }
            other => panic!("Expected NoActiveTaxTable, got {:?}", other),
        }
    }

    /// TX-006: effective windows select the dated revision
    #[test]
    fn test_effective_window_selection() {
        let old_rows = vec![bracket("0", None, "0", "0.10")];
        let new_rows = vec![bracket("0", None, "0", "0.12")];
        let schedule = TaxSchedule::new(vec![
            table(
                "monthly_2023",
                PeriodType::Monthly,
                old_rows,
                date(2023, 1, 1),
                Some(date(2024, 1, 1)),
            ),
            table(
                "monthly_2024",
                PeriodType::Monthly,
                new_rows,
                date(2024, 1, 1),
                None,
            ),
        ])
        .unwrap();

        let income = m("1000.00");
        assert_eq!(
            schedule
                .compute(income, PeriodType::Monthly, date(2023, 12, 31))
                .unwrap(),
            m("100.00")
        );
        // The window's end date is exclusive: the new table owns it.
        assert_eq!(
            schedule
                .compute(income, PeriodType::Monthly, date(2024, 1, 1))
                .unwrap(),
            m("120.00")
        );
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        let result = TaxSchedule::new(vec![
            table(
                "monthly_a",
                PeriodType::Monthly,
                vec![bracket("0", None, "0", "0.10")],
                date(2023, 1, 1),
                None,
            ),
            table(
                "monthly_b",
                PeriodType::Monthly,
                vec![bracket("0", None, "0", "0.12")],
                date(2024, 1, 1),
                None,
            ),
        ]);
        match result.unwrap_err() {
            EngineError::MalformedBracketTable { table, message } => {
                assert_eq!(table, "monthly_b");
                assert!(message.contains("overlaps"));
            }
            other => panic!("Expected MalformedBracketTable, got {:?}", other),
        }
    }

    #[test]
    fn test_same_window_different_period_types_allowed() {
        let schedule = TaxSchedule::new(vec![
            table(
                "monthly",
                PeriodType::Monthly,
                vec![bracket("0", None, "0", "0.10")],
                date(2023, 1, 1),
                None,
            ),
            table(
                "weekly",
                PeriodType::Weekly,
                vec![bracket("0", None, "0", "0.10")],
                date(2023, 1, 1),
                None,
            ),
        ]);
        assert!(schedule.is_ok());
    }

    #[test]
    fn test_final_step_rounding_only() {
        let schedule = create_test_schedule();
        // 0.10 excess at 15% is 0.015: kept full precision, rounded once.
        assert_eq!(
            schedule
                .compute(m("10417.10"), PeriodType::SemiMonthly, date(2023, 6, 15))
                .unwrap(),
            m("0.02")
        );
    }
}
