// User balance repositories
pub mod user_repository;
pub mod transaction_repository;

pub use user_repository::*;
pub use transaction_repository::*;
