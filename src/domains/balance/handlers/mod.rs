// Balance handlers module
pub mod balance_handler;

pub use balance_handler::*;
