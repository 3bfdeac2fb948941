// Market API library
// 아이템 카탈로그 (Skinport) + 사용자 잔고 출금 서비스

pub mod domains;
pub mod routes;
pub mod shared;
