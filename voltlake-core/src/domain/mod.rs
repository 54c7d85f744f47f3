pub mod catalog;
pub mod error;
pub mod placeholder;

// Convenient re-exports to simplify imports elsewhere
pub use error::DomainError;
pub use placeholder::PlaceholderMap;
