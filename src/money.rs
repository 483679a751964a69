use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, Mul},
    str::FromStr,
};

/// Represents an amount of money in Brazilian reais.
///
/// The amount is stored as an exact decimal, so accumulating many rows never
/// drifts the way binary floats do. The [`Display`] implementation formats
/// the amount to 2 decimal places.
///
/// # Examples
///
/// Either a dot or a comma is accepted as the decimal separator:
///
/// ```
/// use std::str::FromStr;
/// use vendas::Brl;
///
/// assert_eq!(Brl::from_str("49,9").unwrap(), Brl::from_str("49.9").unwrap());
/// ```
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Brl(Decimal);

impl Brl {
    pub const ZERO: Brl = Brl(Decimal::ZERO);

    /// Rounds the amount to 2 decimal places.
    ///
    /// Uses banker's rounding (half to even), the [`Decimal::round_dp`]
    /// default: `0.125` rounds down to `0.12`, `0.135` rounds up to `0.14`.
    #[must_use]
    pub fn round_dp2(self) -> Self {
        Self(self.0.round_dp(2))
    }
}

impl Debug for Brl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Brl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Brl {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(&s.replace(',', "."))?))
    }
}

impl AddAssign for Brl {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Brl {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

/// Serializes as a plain JSON number, the way the report document expects.
impl Serialize for Brl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom("amount not representable in JSON")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_fn_accepts_dot_separator() {
        let price = Brl::from_str("49.9").unwrap();
        assert_eq!(format!("{price}"), "49.90");
    }

    #[test]
    fn from_str_fn_accepts_comma_separator() {
        assert_eq!(
            Brl::from_str("7,50").unwrap(),
            Brl::from_str("7.5").unwrap()
        );
    }

    #[test]
    fn from_str_fn_rejects_non_numeric_input() {
        assert!(Brl::from_str("grátis").is_err());
        assert!(Brl::from_str("").is_err());
    }

    #[test]
    fn round_dp2_fn_rounds_half_to_even() {
        assert_eq!(
            Brl::from_str("0.125").unwrap().round_dp2(),
            Brl::from_str("0.12").unwrap()
        );
        assert_eq!(
            Brl::from_str("0.135").unwrap().round_dp2(),
            Brl::from_str("0.14").unwrap()
        );
    }

    #[test]
    fn mul_by_quantity_is_exact() {
        let revenue = Brl::from_str("49.9").unwrap() * 2;
        assert_eq!(revenue, Brl::from_str("99.8").unwrap());
    }

    #[test]
    fn add_assign_accumulates() {
        let mut total = Brl::ZERO;
        total += Brl::from_str("99.8").unwrap();
        total += Brl::from_str("99.9").unwrap();
        assert_eq!(total, Brl::from_str("199.7").unwrap());
    }
}
