use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, FeeConfig, MAX_EXECUTION_LATENCY_MS, SlippageConfig, ValidationConfig};

/// Loads the engine configuration from a TOML file.
///
/// This is the primary entry point for this crate. It reads the file,
/// deserializes it into the strongly-typed `Config`, and validates it
/// eagerly: an unknown key or a negative value fails here, not at first
/// use.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?path, "configuration loaded");
    Ok(config)
}
