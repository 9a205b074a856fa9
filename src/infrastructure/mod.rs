pub mod mock;
pub mod persistence;
pub mod repositories;

pub use mock::{MockComparableSource, NoComparables, UnavailableComparableSource};
pub use persistence::JsonFileItemRepository;
pub use repositories::InMemoryItemRepository;
