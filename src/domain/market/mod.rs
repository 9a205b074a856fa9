// Resale market estimates
pub mod condition;
pub mod estimate;

pub use condition::Condition;
pub use estimate::{
    ComparableListing, MarketSnapshot, PricePoints, PriceRange, estimate_from_retail,
};
