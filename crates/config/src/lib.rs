//! TopUp Configuration
//!
//! Settings, loading and startup logging for the TopUp bridge node.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ENV_PREFIX};
pub use settings::{
	AdapterSettings, ApiKeySettings, ConfigValidationError, GatewayMapping, GenesisAllocation,
	LogFormat, LoggingSettings, NetworkSettings, ProtocolSettings, RoleSettings, RouteSettings,
	ServerSettings, Settings,
};
pub use startup_logger::{
	log_network_summary, log_service_info, log_service_shutdown, log_startup_complete,
};

pub use config::ConfigError;
