//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Environment variable prefix for overrides, e.g. `TOPUP__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TOPUP";

/// Load configuration from `config/config.*` with environment overrides
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

/// Load configuration from the given file stem with environment overrides
///
/// The file is optional; missing sections fall back to [`Settings::default`].
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	s.try_deserialize()
}
