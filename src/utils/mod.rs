// Utility functions
pub mod error;

pub use error::*;
