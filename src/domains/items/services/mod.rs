// Items services module
// 아이템 서비스 모듈

pub mod merge;
pub mod item_service;
pub mod state;

pub use merge::*;
pub use item_service::*;
pub use state::*;
