// Utility functions
pub mod error;
pub mod json;
pub mod password;

pub use error::*;
