//! Bracket tables: ordered, contiguous `[lower, upper)` ranges.
//!
//! One bracket abstraction serves both withholding tax schedules (fixed base
//! plus marginal rate) and contribution schedules (percentage of base with
//! floor/ceiling clamps expressed as flat boundary brackets). Tables are
//! validated at construction, so a lookup against a well-formed table cannot
//! fail for any non-negative value.
//!
//! Boundary convention: brackets own their lower bound. A value exactly equal
//! to a boundary belongs to the upper bracket. The source schedules this
//! engine consolidates used both `min <= v <= max` and `min <= v < max`
//! conventions; this one is mandated everywhere and pinned by tests.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Money;

/// How a bracket turns a matched value into an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketFormula {
    /// A fixed amount regardless of where in the bracket the value falls.
    /// Used for contribution floors and ceilings.
    Flat(Money),
    /// A fixed base plus a marginal rate on the excess over the bracket's
    /// lower bound. Used for progressive withholding tax.
    BasePlusRate {
        /// Tax due at the bracket's lower bound.
        base: Money,
        /// Marginal rate applied to the excess, in `0..=1`.
        rate: Decimal,
    },
    /// A percentage of the full looked-up value. Used for
    /// percentage-of-salary contributions between floor and ceiling.
    PercentOfBase {
        /// Rate applied to the value, in `0..=1`.
        rate: Decimal,
    },
}

impl BracketFormula {
    fn rate(&self) -> Option<Decimal> {
        match self {
            BracketFormula::Flat(_) => None,
            BracketFormula::BasePlusRate { rate, .. } | BracketFormula::PercentOfBase { rate } => {
                Some(*rate)
            }
        }
    }
}

/// One `[lower, upper)` range of a bracket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    /// Inclusive lower bound.
    pub lower: Money,
    /// Exclusive upper bound; `None` for the unbounded top bracket.
    pub upper: Option<Money>,
    /// The formula this bracket applies.
    pub formula: BracketFormula,
}

impl Bracket {
    /// Applies this bracket's formula to a value that matched it.
    ///
    /// Intermediates stay at full decimal precision; the result is rounded
    /// half-up to currency scale exactly once.
    pub fn amount_for(&self, value: Money) -> Money {
        match &self.formula {
            BracketFormula::Flat(amount) => *amount,
            BracketFormula::BasePlusRate { base, rate } => {
                let excess = value.as_decimal() - self.lower.as_decimal();
                Money::new(base.as_decimal() + excess * rate)
            }
            BracketFormula::PercentOfBase { rate } => Money::new(value.as_decimal() * rate),
        }
    }
}

/// A validated, ordered set of contiguous brackets covering `[0, +inf)`.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::{Bracket, BracketFormula, BracketTable};
/// use payslip_engine::models::Money;
/// use std::str::FromStr;
///
/// let m = |s: &str| Money::from_str(s).unwrap();
/// let table = BracketTable::new(
///     "health",
///     vec![
///         Bracket { lower: m("0"), upper: Some(m("10000")), formula: BracketFormula::Flat(m("500.00")) },
///         Bracket { lower: m("10000"), upper: Some(m("100000")), formula: BracketFormula::PercentOfBase { rate: "0.05".parse().unwrap() } },
///         Bracket { lower: m("100000"), upper: None, formula: BracketFormula::Flat(m("5000.00")) },
///     ],
/// ).unwrap();
///
/// assert_eq!(table.amount_at(m("25000.00")).unwrap(), m("1250.00"));
/// assert_eq!(table.amount_at(m("0")).unwrap(), m("500.00"));
/// assert_eq!(table.amount_at(m("10000000")).unwrap(), m("5000.00"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    id: String,
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Builds a table, rejecting structural defects.
    ///
    /// Validation requires: at least one bracket, the first starting at
    /// zero, every non-top bracket bounded with `upper > lower`, bounds
    /// contiguous (`brackets[i].upper == brackets[i+1].lower`), an unbounded
    /// top bracket, and every rate within `0..=1`. Rejecting these here is
    /// what makes `NoMatchingBracket` a configuration-integrity error rather
    /// than a runtime one.
    pub fn new(id: impl Into<String>, brackets: Vec<Bracket>) -> EngineResult<Self> {
        let id = id.into();
        let malformed = |message: String| EngineError::MalformedBracketTable {
            table: id.clone(),
            message,
        };

        if brackets.is_empty() {
            return Err(malformed("table has no brackets".to_string()));
        }
        if brackets[0].lower != Money::ZERO {
            return Err(malformed(format!(
                "first bracket must start at 0, starts at {}",
                brackets[0].lower
            )));
        }

        let last = brackets.len() - 1;
        for (i, bracket) in brackets.iter().enumerate() {
            if let Some(rate) = bracket.formula.rate() {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(malformed(format!(
                        "bracket {} rate {} is outside 0..=1",
                        i, rate
                    )));
                }
            }

            match (i == last, bracket.upper) {
                (true, Some(upper)) => {
                    return Err(malformed(format!(
                        "top bracket must be unbounded, has upper bound {}",
                        upper
                    )));
                }
                (true, None) => {}
                (false, None) => {
                    return Err(malformed(format!(
                        "bracket {} is unbounded but is not the top bracket",
                        i
                    )));
                }
                (false, Some(upper)) => {
                    if upper <= bracket.lower {
                        return Err(malformed(format!(
                            "bracket {} upper bound {} is not above its lower bound {}",
                            i, upper, bracket.lower
                        )));
                    }
                    let next_lower = brackets[i + 1].lower;
                    if upper != next_lower {
                        return Err(malformed(format!(
                            "gap or overlap between brackets {} and {}: {} vs {}",
                            i,
                            i + 1,
                            upper,
                            next_lower
                        )));
                    }
                }
            }
        }

        Ok(Self { id, brackets })
    }

    /// Returns the table identifier, used in error context.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Finds the bracket owning `value`.
    ///
    /// Binary search over the sorted lower bounds; a value exactly on a
    /// boundary resolves to the bracket whose lower bound it equals. Fails
    /// with `NoMatchingBracket` only for negative values, since construction
    /// guarantees coverage of `[0, +inf)`.
    pub fn find(&self, value: Money) -> EngineResult<&Bracket> {
        let idx = self.brackets.partition_point(|b| b.lower <= value);
        if idx == 0 {
            return Err(EngineError::NoMatchingBracket {
                table: self.id.clone(),
                value,
            });
        }
        Ok(&self.brackets[idx - 1])
    }

    /// Finds the bracket owning `value` and applies its formula.
    pub fn amount_at(&self, value: Money) -> EngineResult<Money> {
        Ok(self.find(value)?.amount_for(value))
    }
}
