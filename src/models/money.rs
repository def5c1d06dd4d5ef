//! Fixed-scale monetary value type.
//!
//! All monetary amounts in the engine are [`Money`] values: decimals carried
//! at currency scale (2 decimal places). Bracket boundaries are compared with
//! exact equality, so binary floating point is never used; intermediate
//! products (rate applications) stay full-precision [`Decimal`] and are
//! rounded half-up exactly once, when converted back into `Money`.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The currency scale: two decimal places.
pub const CURRENCY_SCALE: u32 = 2;

/// A monetary amount at fixed currency scale.
///
/// Construction rounds half-up to [`CURRENCY_SCALE`]; addition and
/// subtraction of `Money` values preserve the scale exactly, so totals of
/// already-rounded line items carry no rounding drift.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Money;
/// use std::str::FromStr;
///
/// let a = Money::from_str("20833.00").unwrap();
/// let b = Money::from_str("20833").unwrap();
/// assert_eq!(a, b); // exact boundary comparison
/// assert_eq!((a - b), Money::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a `Money` value from a decimal, rounding half-up to currency
    /// scale.
    ///
    /// This is the single rounding point in the engine: callers compute
    /// full-precision intermediates and convert once at the end.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let tax = Money::new(Decimal::from_str("34.9515").unwrap());
    /// assert_eq!(tax, Money::from_str("34.95").unwrap());
    ///
    /// let half = Money::new(Decimal::from_str("0.015").unwrap());
    /// assert_eq!(half, Money::from_str("0.02").unwrap()); // half rounds up
    /// ```
    pub fn new(value: Decimal) -> Money {
        let mut rounded =
            value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(CURRENCY_SCALE);
        Money(rounded)
    }

    /// Returns the underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Money {
    fn default() -> Money {
        Money::ZERO
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Money, Self::Err> {
        Decimal::from_str(s).map(Money::new)
    }
}

// Fully qualified: Decimal's inherent serialize/deserialize are its binary
// [u8; 16] codec, which shadows the serde trait methods.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::new)
    }
}
