pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{Neo4jSink, PostgresSource};
pub use core::etl::{MigrationEngine, MigrationReport, MigrationSettings};
pub use utils::error::{EtlError, Result};
