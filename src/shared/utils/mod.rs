/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - Single-flight (동시 캐시 miss 합치기)
pub mod single_flight;

pub use single_flight::*;
