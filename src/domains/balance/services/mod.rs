// Balance services module
// 잔고 서비스 모듈

pub mod store;
pub mod memory_store;
pub mod balance_service;
pub mod state;

pub use store::*;
pub use memory_store::*;
pub use balance_service::*;
pub use state::*;
