use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::{EngineError, ResultEngine};

/// Number of minor units in one major unit (cents per unit).
const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as integer **minor units** (cents).
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// balances, transfers) so that splitting and netting never drift.
///
/// The value is signed:
/// - positive = the person is owed money
/// - negative = the person owes money
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Converting from a wire amount (rejects more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::from_major(10.5).unwrap().minor(), 1050);
/// assert!(Money::from_major(12.345).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a single expense may carry: 100 billion major units.
    ///
    /// Keeps the sum of every stored expense (and so every balance) far
    /// inside `i64` for any realistic number of records.
    pub const MAX_EXPENSE: Money = Money(10_000_000_000_000);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Converts a major-unit amount (as received on the wire) into minor units.
    ///
    /// Validation rules:
    /// - rejects `NaN` and infinities
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects values that do not fit in `i64` minor units
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::Validation("Invalid amount".to_string()));
        }

        let scaled = value * MINOR_PER_MAJOR as f64;
        let rounded = scaled.round();
        // `0.1 * 100.0` is not exactly `10.0`: allow a few ulps of noise.
        let tolerance = (scaled.abs() * f64::EPSILON * 8.0).max(1e-6);
        if (scaled - rounded).abs() > tolerance {
            return Err(EngineError::Validation(
                "amount has too many decimals".to_string(),
            ));
        }
        if rounded.abs() >= i64::MAX as f64 {
            return Err(EngineError::Validation("amount too large".to_string()));
        }

        Ok(Self(rounded as i64))
    }

    /// Returns the amount in major units, for the wire.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Splits the amount into `parts` shares that sum exactly to `self`.
    ///
    /// Shares differ by at most one minor unit: the first `self % parts`
    /// shares carry the remainder. Returns an empty vector for `parts == 0`.
    ///
    /// ```rust
    /// use engine::Money;
    ///
    /// let shares = Money::new(100).allocate(3);
    /// assert_eq!(shares, vec![Money::new(34), Money::new(33), Money::new(33)]);
    /// ```
    #[must_use]
    pub fn allocate(self, parts: usize) -> Vec<Money> {
        let Ok(divisor) = i64::try_from(parts) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }

        let base = self.0.div_euclid(divisor);
        let remainder = self.0.rem_euclid(divisor);
        (0..divisor)
            .map(|i| Money(if i < remainder { base + 1 } else { base }))
            .collect()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
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

    fn sub(self, rhs: Money) -> Self::Output {
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

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
