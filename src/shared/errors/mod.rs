// Shared errors
pub mod balance_error;
pub mod item_error;

pub use balance_error::*;
pub use item_error::*;
