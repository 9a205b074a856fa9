// Inventory records
pub mod item;

pub use item::{Item, ItemStatus};
