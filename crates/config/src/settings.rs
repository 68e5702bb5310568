//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use topup_types::{
	address, AdapterKind, Address, BridgeParams, RouteValidationError, TokenRoute,
	MAX_TOKEN_DECIMALS, U256,
};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub logging: LoggingSettings,
	pub network: NetworkSettings,
	pub roles: RoleSettings,
	pub api_keys: Vec<ApiKeySettings>,
	/// Simulated protocol endpoints the adapters talk to
	pub protocols: Vec<ProtocolSettings>,
	/// Adapters keyed by the name routes refer to
	pub adapters: HashMap<String, AdapterSettings>,
	pub routes: Vec<RouteSettings>,
	/// Balances credited before the node starts serving
	pub genesis: Vec<GenesisAllocation>,
	pub recovery_wallet: Option<Address>,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Chain-level addresses of the node
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NetworkSettings {
	/// Address of the collector factory
	pub factory: Address,
	pub wrapped_native: Address,
	/// Native asset gateway, disabled when unset
	#[serde(default)]
	pub gateway: Option<Address>,
	/// Where the gateway forwards wrapped value; defaults to the factory
	#[serde(default)]
	pub gateway_destination: Option<Address>,
}

/// Initial role grants
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RoleSettings {
	pub admins: Vec<Address>,
	pub pausers: Vec<Address>,
	pub unpausers: Vec<Address>,
}

/// An API key and the account it acts as
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiKeySettings {
	/// Key value, e.g. `{"type": "env", "value": "TOPUP_ADMIN_KEY"}`
	pub key: ConfigurableValue,
	pub account: Address,
}

/// Protocol endpoint definitions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProtocolSettings {
	TokenMessenger {
		address: Address,
		#[serde(default)]
		burn_tokens: Vec<Address>,
	},
	StargatePool {
		address: Address,
		token: Address,
		#[serde(default)]
		fee_bps: u16,
		#[serde(default)]
		native_fee: U256,
	},
	Oft {
		address: Address,
		/// Underlying token for adapter OFTs, unset for native OFTs
		#[serde(default)]
		token: Option<Address>,
		#[serde(default = "default_conversion_rate")]
		decimal_conversion_rate: U256,
		#[serde(default)]
		fee_bps: u16,
		#[serde(default)]
		native_fee: U256,
	},
	GatewayRouter {
		address: Address,
		#[serde(default)]
		gateways: Vec<GatewayMapping>,
		#[serde(default)]
		base_fee: U256,
		#[serde(default)]
		fee_per_gas: U256,
	},
	NttManager {
		address: Address,
		token: Address,
		decimals: u8,
		#[serde(default)]
		delivery_prices: Vec<U256>,
	},
	Teller {
		address: Address,
		vault: Address,
		#[serde(default)]
		fee: U256,
	},
}

fn default_conversion_rate() -> U256 {
	U256::from(1)
}

impl ProtocolSettings {
	pub fn address(&self) -> Address {
		match self {
			Self::TokenMessenger { address, .. }
			| Self::StargatePool { address, .. }
			| Self::Oft { address, .. }
			| Self::GatewayRouter { address, .. }
			| Self::NttManager { address, .. }
			| Self::Teller { address, .. } => *address,
		}
	}

	/// Adapter kind able to drive this endpoint
	pub fn adapter_kind(&self) -> AdapterKind {
		match self {
			Self::TokenMessenger { .. } => AdapterKind::Cctp,
			Self::StargatePool { .. } => AdapterKind::Stargate,
			Self::Oft { .. } => AdapterKind::Oft,
			Self::GatewayRouter { .. } => AdapterKind::RollupWithdrawal,
			Self::NttManager { .. } => AdapterKind::Ntt,
			Self::Teller { .. } => AdapterKind::Teller,
		}
	}
}

/// Token to token-gateway mapping of a gateway router
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GatewayMapping {
	pub token: Address,
	pub gateway: Address,
}

/// Individual adapter configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdapterSettings {
	pub kind: AdapterKind,
	/// Address routes bind to
	pub address: Address,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default)]
	pub name: Option<String>,
	/// NTT only: wire decimals amounts are trimmed to
	#[serde(default)]
	pub trimmed_decimals: Option<u8>,
}

fn default_enabled() -> bool {
	true
}

/// A token route, with the adapter referenced by its configuration key
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RouteSettings {
	pub token: Address,
	pub adapter: String,
	pub recipient: Address,
	#[serde(default)]
	pub max_slippage_bps: u16,
	pub params: BridgeParams,
}

/// Starting balance; `token` unset means native value
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenesisAllocation {
	pub account: Address,
	#[serde(default)]
	pub token: Option<Address>,
	pub amount: U256,
}

/// Problems found by [`Settings::validate`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid bind address '{address}'")]
	InvalidBindAddress { address: String },

	#[error("Factory address must not be zero")]
	ZeroFactory,

	#[error("Wrapped native token address must not be zero")]
	ZeroWrappedNative,

	#[error("Duplicate protocol endpoint {address}")]
	DuplicateProtocol { address: Address },

	#[error("Duplicate adapter address {address} (adapter '{adapter}')")]
	DuplicateAdapterAddress { adapter: String, address: Address },

	#[error("Route for token {token} references unknown adapter '{adapter}'")]
	UnknownAdapter { token: Address, adapter: String },

	#[error("Route for token {token} uses disabled adapter '{adapter}'")]
	DisabledAdapter { token: Address, adapter: String },

	#[error("Route for token {token} targets a {adapter_kind} adapter with {params_kind} params")]
	ParamsMismatch {
		token: Address,
		adapter_kind: AdapterKind,
		params_kind: AdapterKind,
	},

	#[error("Route for token {token} is invalid: {source}")]
	InvalidRoute {
		token: Address,
		#[source]
		source: RouteValidationError,
	},

	#[error("Duplicate route for token {token}")]
	DuplicateRoute { token: Address },

	#[error("Routes or a recovery wallet are configured without an admin account")]
	MissingAdmin,

	#[error("{source_name} uses {decimals} decimals, more than the supported {max}")]
	UnsupportedDecimals {
		source_name: String,
		decimals: u8,
		max: u8,
	},
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
			network: NetworkSettings::default(),
			roles: RoleSettings::default(),
			api_keys: Vec::new(),
			protocols: Vec::new(),
			adapters: HashMap::new(),
			routes: Vec::new(),
			genesis: Vec::new(),
			recovery_wallet: None,
		}
	}
}

impl Default for NetworkSettings {
	fn default() -> Self {
		Self {
			factory: address!("0x1000000000000000000000000000000000000001"),
			wrapped_native: address!("0x4200000000000000000000000000000000000006"),
			gateway: None,
			gateway_destination: None,
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled adapters only
	pub fn enabled_adapters(&self) -> HashMap<String, AdapterSettings> {
		self.adapters
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Resolve every API key to the account it authenticates
	pub fn resolve_api_keys(&self) -> Result<HashMap<String, Address>, ConfigurableValueError> {
		self.api_keys
			.iter()
			.map(|entry| Ok((entry.key.resolve()?, entry.account)))
			.collect()
	}

	/// Resolve a configured route into the on-chain route shape
	pub fn token_route(&self, route: &RouteSettings) -> Option<TokenRoute> {
		self.adapters.get(&route.adapter).map(|adapter| {
			TokenRoute::new(
				adapter.address,
				route.recipient,
				route.max_slippage_bps,
				route.params.clone(),
			)
		})
	}

	/// Check the settings for problems that would make startup fail
	///
	/// Returns every problem found, not only the first one.
	pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
		let mut errors = Vec::new();

		let bind = self.bind_address();
		if bind.parse::<std::net::SocketAddr>().is_err() {
			errors.push(ConfigValidationError::InvalidBindAddress { address: bind });
		}
		if self.network.factory.is_zero() {
			errors.push(ConfigValidationError::ZeroFactory);
		}
		if self.network.wrapped_native.is_zero() {
			errors.push(ConfigValidationError::ZeroWrappedNative);
		}

		let mut endpoints = HashSet::new();
		for protocol in &self.protocols {
			if !endpoints.insert(protocol.address()) {
				errors.push(ConfigValidationError::DuplicateProtocol {
					address: protocol.address(),
				});
			}
			if let ProtocolSettings::NttManager {
				address, decimals, ..
			} = protocol
			{
				if *decimals > MAX_TOKEN_DECIMALS {
					errors.push(ConfigValidationError::UnsupportedDecimals {
						source_name: format!("NTT manager {address}"),
						decimals: *decimals,
						max: MAX_TOKEN_DECIMALS,
					});
				}
			}
		}

		let mut adapter_addresses = HashSet::new();
		let mut names: Vec<_> = self.adapters.keys().collect();
		names.sort();
		for name in names {
			let adapter = &self.adapters[name];
			if adapter.enabled && !adapter_addresses.insert(adapter.address) {
				errors.push(ConfigValidationError::DuplicateAdapterAddress {
					adapter: name.clone(),
					address: adapter.address,
				});
			}
			if let Some(decimals) = adapter.trimmed_decimals.filter(|d| *d > MAX_TOKEN_DECIMALS) {
				errors.push(ConfigValidationError::UnsupportedDecimals {
					source_name: format!("adapter '{name}'"),
					decimals,
					max: MAX_TOKEN_DECIMALS,
				});
			}
		}

		let mut routed = HashSet::new();
		for route in &self.routes {
			if !routed.insert(route.token) {
				errors.push(ConfigValidationError::DuplicateRoute { token: route.token });
			}
			let Some(adapter) = self.adapters.get(&route.adapter) else {
				errors.push(ConfigValidationError::UnknownAdapter {
					token: route.token,
					adapter: route.adapter.clone(),
				});
				continue;
			};
			if !adapter.enabled {
				errors.push(ConfigValidationError::DisabledAdapter {
					token: route.token,
					adapter: route.adapter.clone(),
				});
			}
			if adapter.kind != route.params.kind() {
				errors.push(ConfigValidationError::ParamsMismatch {
					token: route.token,
					adapter_kind: adapter.kind,
					params_kind: route.params.kind(),
				});
			}
			if let Some(Err(source)) = self.token_route(route).map(|r| r.validate()) {
				errors.push(ConfigValidationError::InvalidRoute {
					token: route.token,
					source,
				});
			}
		}

		let needs_admin = !self.routes.is_empty() || self.recovery_wallet.is_some();
		if needs_admin && self.roles.admins.is_empty() {
			errors.push(ConfigValidationError::MissingAdmin);
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(errors)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use topup_types::CctpParams;

	const USDC: Address = Address::repeat_byte(0x11);

	fn cctp_settings() -> Settings {
		let mut settings = Settings::default();
		settings.roles.admins.push(Address::repeat_byte(0xAD));
		settings.adapters.insert(
			"cctp".to_string(),
			AdapterSettings {
				kind: AdapterKind::Cctp,
				address: Address::repeat_byte(0xC0),
				enabled: true,
				name: None,
				trimmed_decimals: None,
			},
		);
		settings.routes.push(RouteSettings {
			token: USDC,
			adapter: "cctp".to_string(),
			recipient: Address::repeat_byte(0xBB),
			max_slippage_bps: 0,
			params: BridgeParams::Cctp(CctpParams {
				token_messenger: Address::repeat_byte(0xE0),
				destination_domain: 2000,
				max_fee: U256::ZERO,
				min_finality_threshold: 2000,
			}),
		});
		settings
	}

	#[test]
	fn test_default_settings_are_valid() {
		assert!(Settings::default().validate().is_ok());
		assert_eq!(Settings::default().bind_address(), "0.0.0.0:3000");
	}

	#[test]
	fn test_route_settings_resolve_adapter_address() {
		let settings = cctp_settings();
		assert!(settings.validate().is_ok());

		let route = settings.token_route(&settings.routes[0]).unwrap();
		assert_eq!(route.bridge_adapter, Address::repeat_byte(0xC0));
		assert_eq!(route.recipient, Address::repeat_byte(0xBB));
	}

	#[test]
	fn test_validation_collects_all_problems() {
		let mut settings = cctp_settings();
		settings.roles.admins.clear();
		settings.routes[0].max_slippage_bps = 500;
		let orphan = RouteSettings {
			token: Address::repeat_byte(0x22),
			adapter: "missing".to_string(),
			..settings.routes[0].clone()
		};
		settings.routes.push(orphan);

		let errors = settings.validate().unwrap_err();
		assert!(errors.contains(&ConfigValidationError::MissingAdmin));
		assert!(errors.iter().any(|e| matches!(
			e,
			ConfigValidationError::InvalidRoute {
				source: RouteValidationError::SlippageTooHigh { .. },
				..
			}
		)));
		assert!(errors
			.iter()
			.any(|e| matches!(e, ConfigValidationError::UnknownAdapter { adapter, .. } if adapter == "missing")));
	}

	#[test]
	fn test_params_must_match_adapter_kind() {
		let mut settings = cctp_settings();
		if let Some(adapter) = settings.adapters.get_mut("cctp") {
			adapter.kind = AdapterKind::Stargate;
		}

		let errors = settings.validate().unwrap_err();
		assert_eq!(
			errors,
			vec![ConfigValidationError::ParamsMismatch {
				token: USDC,
				adapter_kind: AdapterKind::Stargate,
				params_kind: AdapterKind::Cctp,
			}]
		);
	}

	#[test]
	fn test_unrealistic_decimals_are_rejected() {
		let mut settings = Settings::default();
		settings.protocols.push(ProtocolSettings::NttManager {
			address: Address::repeat_byte(0xE5),
			token: Address::repeat_byte(0x15),
			decimals: 80,
			delivery_prices: Vec::new(),
		});
		settings.adapters.insert(
			"ntt".to_string(),
			AdapterSettings {
				kind: AdapterKind::Ntt,
				address: Address::repeat_byte(0xC5),
				enabled: true,
				name: None,
				trimmed_decimals: Some(MAX_TOKEN_DECIMALS + 1),
			},
		);

		let errors = settings.validate().unwrap_err();
		assert_eq!(errors.len(), 2);
		assert!(errors.iter().all(|e| matches!(
			e,
			ConfigValidationError::UnsupportedDecimals { decimals, .. } if *decimals > MAX_TOKEN_DECIMALS
		)));

		settings.protocols.clear();
		if let Some(adapter) = settings.adapters.get_mut("ntt") {
			adapter.trimmed_decimals = Some(MAX_TOKEN_DECIMALS);
		}
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_protocols_deserialize_by_kind() {
		let json = r#"[
			{"kind": "token_messenger", "address": "0x00000000000000000000000000000000000000e0",
			 "burn_tokens": ["0x1111111111111111111111111111111111111111"]},
			{"kind": "teller", "address": "0x00000000000000000000000000000000000000e1",
			 "vault": "0x00000000000000000000000000000000000000e2"}
		]"#;
		let protocols: Vec<ProtocolSettings> = serde_json::from_str(json).unwrap();

		assert_eq!(protocols[0].adapter_kind(), AdapterKind::Cctp);
		assert_eq!(
			protocols[1],
			ProtocolSettings::Teller {
				address: Address::with_last_byte(0xe1),
				vault: Address::with_last_byte(0xe2),
				fee: U256::ZERO,
			}
		);
	}

	#[test]
	fn test_api_keys_resolve_to_accounts() {
		let mut settings = Settings::default();
		settings.api_keys.push(ApiKeySettings {
			key: ConfigurableValue::from_plain("admin-key"),
			account: Address::repeat_byte(0xAD),
		});

		let keys = settings.resolve_api_keys().unwrap();
		assert_eq!(keys.get("admin-key"), Some(&Address::repeat_byte(0xAD)));
	}
}
