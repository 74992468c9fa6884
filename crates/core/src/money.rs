use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(Decimal);

impl Money {
    pub fn new(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Nearest whole rupee, as quoted in user-facing figures.
    pub fn round_rupees(self) -> i64 {
        self.0.round().to_i64().unwrap_or(0)
    }

    /// This amount scaled by `factor`, rounded back to paise.
    pub fn scale(self, factor: Decimal) -> Money {
        Money((self.0 * factor).round_dp(2))
    }

    /// This amount as a fraction of `total`; 0.0 when `total` is zero.
    pub fn ratio_of(self, total: Money) -> f64 {
        if total.0.is_zero() {
            return 0.0;
        }
        (self.0 / total.0).to_f64().unwrap_or(0.0)
    }

    /// Subtraction clamped at zero, for "amount still needed" figures.
    pub fn saturating_sub(self, rhs: Money) -> Money {
        if rhs.0 >= self.0 {
            Money::zero()
        } else {
            Money(self.0 - rhs.0)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
