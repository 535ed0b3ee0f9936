pub mod config;
pub mod error;
pub mod extract;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
