// All repositories module
pub mod users;

// Re-export all repositories for convenience
pub use users::*;
