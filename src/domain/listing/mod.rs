// Listing copy for marketplaces
pub mod description;

pub use description::{ListingDescriptions, listing_title};
