use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplaces an item can be sold on.
///
/// Declaration order is the enumeration order used for quote listings and
/// for breaking ties between equal net proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Flat fee under a price threshold, percentage at or above it
    Poshmark,
    Depop,
    Mercari,
    Ebay,
    /// Regional low-fee marketplace
    Xiaohongshu,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Poshmark,
        Platform::Depop,
        Platform::Mercari,
        Platform::Ebay,
        Platform::Xiaohongshu,
    ];

    /// Stable lowercase key used in config files and CLI selectors
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Poshmark => "poshmark",
            Platform::Depop => "depop",
            Platform::Mercari => "mercari",
            Platform::Ebay => "ebay",
            Platform::Xiaohongshu => "xiaohongshu",
        }
    }

    /// Human-facing marketplace name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Poshmark => "Poshmark",
            Platform::Depop => "Depop",
            Platform::Mercari => "Mercari",
            Platform::Ebay => "eBay",
            Platform::Xiaohongshu => "Xiaohongshu",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poshmark" => Ok(Platform::Poshmark),
            "depop" => Ok(Platform::Depop),
            "mercari" => Ok(Platform::Mercari),
            "ebay" => Ok(Platform::Ebay),
            "xiaohongshu" | "xhs" | "rednote" => Ok(Platform::Xiaohongshu),
            _ => anyhow::bail!(
                "Invalid platform: {}. Must be one of poshmark, depop, mercari, ebay, xiaohongshu",
                s
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Platform::from_str("eBay").unwrap(), Platform::Ebay);
        assert_eq!(Platform::from_str(" POSHMARK ").unwrap(), Platform::Poshmark);
        assert_eq!(Platform::from_str("xhs").unwrap(), Platform::Xiaohongshu);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = Platform::from_str("etsy").unwrap_err();
        assert!(err.to_string().contains("etsy"));
    }

    #[test]
    fn test_enumeration_order_matches_ordering() {
        let mut sorted = Platform::ALL;
        sorted.sort();
        assert_eq!(sorted, Platform::ALL);
    }

    #[test]
    fn test_key_round_trips_through_from_str() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_str(platform.key()).unwrap(), platform);
        }
    }
}
