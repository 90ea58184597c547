pub mod audit;
pub mod error;
pub mod operator;
pub mod sanitize;
pub mod session;
pub mod template;

// Re-export common error type
pub use error::InterviaError;
