//! Values that load either from an environment variable or from the config file itself

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a plain value as a placeholder not fit for production
pub const INSECURE_DEFAULT_PREFIX: &str = "WARNING-INSECURE-DEFAULT";

/// A value given inline or by naming an environment variable
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name or the value itself
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	pub fn is_insecure_default(&self) -> bool {
		self.value_type == ValueType::Plain && self.value.starts_with(INSECURE_DEFAULT_PREFIX)
	}

	/// Where the value comes from, safe to log
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain if self.is_insecure_default() => "insecure default value".to_string(),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

// Plain values are API keys; never print them
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain if self.is_insecure_default() => write!(f, "plain:[INSECURE-DEFAULT]"),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `env:NAME` reads the variable, anything else is a plain value
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	#[test]
	fn test_plain_value() {
		let value = ConfigurableValue::from_plain("admin-key");
		assert_eq!(value.value_type, ValueType::Plain);
		assert_eq!(value.resolve().unwrap(), "admin-key");
	}

	#[test]
	fn test_env_value() {
		env::set_var("TOPUP_TEST_API_KEY", "key-from-env");

		let value = ConfigurableValue::from_env("TOPUP_TEST_API_KEY");
		assert_eq!(value.resolve().unwrap(), "key-from-env");

		env::remove_var("TOPUP_TEST_API_KEY");
	}

	#[test]
	fn test_env_value_not_found() {
		let value = ConfigurableValue::from_env("TOPUP_NON_EXISTENT_VAR");
		assert!(matches!(
			value.resolve(),
			Err(ConfigurableValueError::EnvironmentVariableNotFound(name)) if name == "TOPUP_NON_EXISTENT_VAR"
		));
	}

	#[test]
	fn test_from_string_conversion() {
		assert_eq!(
			ConfigurableValue::from("env:ADMIN_KEY"),
			ConfigurableValue::from_env("ADMIN_KEY")
		);
		assert_eq!(
			ConfigurableValue::from("plain-key".to_string()),
			ConfigurableValue::from_plain("plain-key")
		);
	}

	#[test]
	fn test_display_never_shows_plain_values() {
		let insecure = ConfigurableValue::from_plain("WARNING-INSECURE-DEFAULT-admin");
		assert!(insecure.is_insecure_default());
		assert_eq!(insecure.to_string(), "plain:[INSECURE-DEFAULT]");
		assert_eq!(insecure.description(), "insecure default value");

		let secure = ConfigurableValue::from_plain("s3cret");
		assert!(!secure.is_insecure_default());
		assert_eq!(secure.to_string(), "plain:[REDACTED]");

		let env_value = ConfigurableValue::from_env("ADMIN_KEY");
		assert_eq!(env_value.to_string(), "env:ADMIN_KEY");
		assert_eq!(env_value.description(), "environment variable 'ADMIN_KEY'");
	}

	#[test]
	fn test_serde_shape() {
		let json = r#"{"type":"env","value":"ADMIN_KEY"}"#;
		let value: ConfigurableValue = serde_json::from_str(json).unwrap();
		assert_eq!(value, ConfigurableValue::from_env("ADMIN_KEY"));
		assert_eq!(serde_json::to_string(&value).unwrap(), json);
	}
}
