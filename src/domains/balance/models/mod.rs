// Balance domain models
pub mod user;
pub mod transaction;
pub mod withdraw;

pub use user::*;
pub use transaction::*;
pub use withdraw::*;
