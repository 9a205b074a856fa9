use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical condition of a resale item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// New with tags
    New,
    Excellent,
    #[default]
    Good,
    Fair,
}

impl Condition {
    /// Share of the retail price a used item typically resells for, as a
    /// `(low, high)` pair.
    pub fn retail_multipliers(&self) -> (Decimal, Decimal) {
        match self {
            Condition::New => (dec!(0.60), dec!(0.85)),
            Condition::Excellent => (dec!(0.45), dec!(0.65)),
            Condition::Good => (dec!(0.30), dec!(0.50)),
            Condition::Fair => (dec!(0.15), dec!(0.30)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::New => "new",
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
        };
        f.pad(name)
    }
}

impl FromStr for Condition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "nwt" => Ok(Condition::New),
            "excellent" => Ok(Condition::Excellent),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            _ => anyhow::bail!(
                "Invalid condition: {}. Must be 'new', 'excellent', 'good', or 'fair'",
                s
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_condition() {
        assert_eq!(Condition::from_str("NWT").unwrap(), Condition::New);
        assert_eq!(Condition::from_str("Excellent").unwrap(), Condition::Excellent);
        assert!(Condition::from_str("mint").is_err());
    }

    #[test]
    fn test_multipliers_shrink_with_wear() {
        let lows: Vec<_> = [
            Condition::New,
            Condition::Excellent,
            Condition::Good,
            Condition::Fair,
        ]
        .iter()
        .map(|c| c.retail_multipliers().0)
        .collect();
        assert!(lows.windows(2).all(|w| w[0] > w[1]));
    }
}
