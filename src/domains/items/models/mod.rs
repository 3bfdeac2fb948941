// Items domain models
pub mod item;

pub use item::*;
