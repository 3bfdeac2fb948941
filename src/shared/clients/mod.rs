// External API clients
// 외부 API 클라이언트

pub mod skinport;

pub use skinport::*;
