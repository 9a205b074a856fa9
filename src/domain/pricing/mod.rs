// Platform fees and sale recommendations
pub mod engine;
pub mod fee_schedule;
pub mod platform;
pub mod quote;

pub use engine::FeeEngine;
pub use fee_schedule::{FeeRule, FeeSchedule, FeeScheduleOverrides, round_currency};
pub use platform::Platform;
pub use quote::{PlatformQuote, Recommendation};
