//! Configuration module for DuoSpend
//!
//! - Platform path resolution (with an environment override)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DuoSpendPaths;
pub use settings::Settings;
