pub mod json_inventory;

pub use json_inventory::{InventoryDocument, JsonFileItemRepository};
