pub mod pricing_advisor;
pub mod reporting;

pub use pricing_advisor::{PricingAdvice, PricingAdvisor, PricingRequest};
pub use reporting::QuoteReporter;
