// Platform fees and sale recommendations
pub mod pricing;

// Resale market estimates
pub mod market;

// Inventory records
pub mod inventory;

// Listing titles and descriptions
pub mod listing;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;
