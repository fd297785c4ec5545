pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod render;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::AppConfig;
pub use services::Services;
pub use utils::error::{KgError, Result};
