//! Whole-dollar money value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// An amount in whole US dollars (scale 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// ISO currency code of every amount.
    pub const CURRENCY: &'static str = "USD";

    /// Creates an amount, rejecting negative values.
    pub fn try_new(dollars: i64) -> Result<Self, ValidationError> {
        if dollars < 0 {
            return Err(ValidationError::out_of_range("amount", 0, i64::MAX, dollars));
        }
        Ok(Self(dollars))
    }

    /// Returns the amount in dollars.
    pub fn dollars(&self) -> i64 {
        self.0
    }

    /// Formats with thousands separators, e.g. `1,250,000`.
    pub fn grouped(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.grouped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_try_new_accepts_non_negative() {
        assert_eq!(Money::try_new(0).unwrap(), Money::ZERO);
        assert_eq!(Money::try_new(1500).unwrap().dollars(), 1500);
    }

    #[test]
    fn money_try_new_rejects_negative() {
        match Money::try_new(-1) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "amount");
                assert_eq!(actual, -1);
            }
            _ => panic!("Expected OutOfRange error"),
        }
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(Money::try_new(0).unwrap().grouped(), "0");
        assert_eq!(Money::try_new(999).unwrap().grouped(), "999");
        assert_eq!(Money::try_new(1000).unwrap().grouped(), "1,000");
        assert_eq!(Money::try_new(1250000).unwrap().grouped(), "1,250,000");
    }

    #[test]
    fn money_displays_with_dollar_sign() {
        assert_eq!(format!("{}", Money::try_new(45000).unwrap()), "$45,000");
    }

    #[test]
    fn money_serializes_to_json() {
        let json = serde_json::to_string(&Money::try_new(42).unwrap()).unwrap();
        assert_eq!(json, "42");
    }
}
