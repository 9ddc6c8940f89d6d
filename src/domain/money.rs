use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Amount read from a command script, held at a fixed four decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub const TARGET_DECIMALS: u32 = 4;

    pub fn zero() -> Self {
        Self(Decimal::new(0, Self::TARGET_DECIMALS))
    }

    /// Rescales to four places, ties round half to even. `None` when the
    /// integer part is too large to carry four decimal places.
    pub fn new(value: Decimal) -> Option<Self> {
        let mut rounded =
            value.round_dp_with_strategy(Self::TARGET_DECIMALS, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(Self::TARGET_DECIMALS);
        if rounded.scale() != Self::TARGET_DECIMALS {
            return None;
        }
        Some(Self(rounded))
    }

    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Decimal::from_str(s).ok().and_then(Self::new)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // scale is fixed at four places by construction
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_decimal_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid Money format: {}", s)))
    }
}
