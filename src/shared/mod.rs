/// Shared kernel: error taxonomy, result alias and filesystem safety checks
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
