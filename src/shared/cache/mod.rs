// In-memory cache module
// 인메모리 캐시 모듈

pub mod ttl_cache;

pub use ttl_cache::*;
