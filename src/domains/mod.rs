// Domain modules
pub mod items;
pub mod balance;
