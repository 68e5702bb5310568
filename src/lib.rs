//! TopUp Bridge Library
//!
//! Deposit collection and cross-chain bridging orchestration: a factory of
//! deterministic deposit collectors whose swept balances are bridged through
//! pluggable protocol adapters.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

// Core domain types
pub use topup_types::{
	serde_json, AdapterError, AdapterInfo, AdapterKind, Address, BridgeAdapter, BridgeFee,
	BridgeParams, BridgeReceipt, CallEnv, Event, FactoryError, FactoryResult, Log, Role,
	RoleService, TokenRoute, B256, NATIVE_ASSET, U256,
};

// Service layer
pub use topup_service::{
	BridgeNode, CollectorFactory, DepositCollector, NativeAssetGateway, SweptBalance,
};

// Storage layer
pub use topup_storage::{LedgerTx, MemoryLedger, MemoryRoleRegistry};

// Adapters
pub use topup_adapters::{
	AdapterRegistry, AdapterRegistryError, CctpAdapter, Contracts, NttAdapter, OftAdapter,
	RollupWithdrawalAdapter, StargateAdapter, TellerAdapter,
};

// API layer
pub use topup_api::{create_router, AppState};

// Config
pub use topup_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod types {
	pub use topup_types::*;
}

pub mod storage {
	pub use topup_storage::*;
}

pub mod adapters {
	pub use topup_adapters::*;
}

pub mod service {
	pub use topup_service::*;
}

pub mod config {
	pub use topup_config::*;
}

pub mod api {
	pub use topup_api::*;
}

use topup_adapters::protocols::{
	GatewayRouter, NttManager, OftEndpoint, StargatePool, Teller, TokenMessenger,
};
use topup_adapters::simulated::{
	SimulatedGatewayRouter, SimulatedNttManager, SimulatedOft, SimulatedStargatePool,
	SimulatedTeller, SimulatedTokenMessenger,
};
use topup_config::{
	AdapterSettings, ConfigValidationError, ConfigurableValueError, ProtocolSettings,
};

/// Errors raised while assembling a node from settings
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("Invalid configuration: {}", format_validation(.0))]
	InvalidConfig(Vec<ConfigValidationError>),

	#[error("Failed to resolve API key: {0}")]
	ApiKey(#[from] ConfigurableValueError),

	#[error("Adapter registration failed: {0}")]
	Registry(#[from] AdapterRegistryError),

	#[error("Initial state rejected by the factory: {0}")]
	Factory(#[from] FactoryError),
}

fn format_validation(errors: &[ConfigValidationError]) -> String {
	errors
		.iter()
		.map(|e| e.to_string())
		.collect::<Vec<_>>()
		.join("; ")
}

fn shared<A: BridgeAdapter + 'static>(adapter: A) -> Arc<dyn BridgeAdapter> {
	Arc::new(adapter)
}

/// Protocol endpoints grouped by the interface adapters consume
#[derive(Default)]
struct Endpoints {
	messengers: Contracts<dyn TokenMessenger>,
	pools: Contracts<dyn StargatePool>,
	ofts: Contracts<dyn OftEndpoint>,
	routers: Contracts<dyn GatewayRouter>,
	managers: Contracts<dyn NttManager>,
	tellers: Contracts<dyn Teller>,
}

impl Endpoints {
	fn from_settings(protocols: &[ProtocolSettings]) -> Self {
		let mut endpoints = Self::default();
		for protocol in protocols {
			match protocol {
				ProtocolSettings::TokenMessenger {
					address,
					burn_tokens,
				} => {
					let messenger = SimulatedTokenMessenger::new(*address);
					for token in burn_tokens {
						messenger.add_burn_token(*token);
					}
					endpoints.messengers.insert(*address, Arc::new(messenger));
				},
				ProtocolSettings::StargatePool {
					address,
					token,
					fee_bps,
					native_fee,
				} => {
					let pool = SimulatedStargatePool::new(*address, *token)
						.with_fee_bps(*fee_bps)
						.with_native_fee(*native_fee);
					endpoints.pools.insert(*address, Arc::new(pool));
				},
				ProtocolSettings::Oft {
					address,
					token,
					decimal_conversion_rate,
					fee_bps,
					native_fee,
				} => {
					let oft = match token {
						Some(token) => {
							SimulatedOft::adapter(*address, *token, *decimal_conversion_rate)
						},
						None => SimulatedOft::native(*address, *decimal_conversion_rate),
					};
					let oft = oft.with_fee_bps(*fee_bps).with_native_fee(*native_fee);
					endpoints.ofts.insert(*address, Arc::new(oft));
				},
				ProtocolSettings::GatewayRouter {
					address,
					gateways,
					base_fee,
					fee_per_gas,
				} => {
					let router = gateways
						.iter()
						.fold(SimulatedGatewayRouter::new(*address), |router, m| {
							router.with_gateway(m.token, m.gateway)
						})
						.with_fees(*base_fee, *fee_per_gas);
					endpoints.routers.insert(*address, Arc::new(router));
				},
				ProtocolSettings::NttManager {
					address,
					token,
					decimals,
					delivery_prices,
				} => {
					let manager = SimulatedNttManager::new(*address, *token, *decimals)
						.with_delivery_prices(delivery_prices.clone());
					endpoints.managers.insert(*address, Arc::new(manager));
				},
				ProtocolSettings::Teller {
					address,
					vault,
					fee,
				} => {
					let teller = SimulatedTeller::new(*address, *vault).with_fee(*fee);
					endpoints.tellers.insert(*address, Arc::new(teller));
				},
			}
		}
		endpoints
	}

	fn adapter(&self, key: &str, settings: &AdapterSettings) -> Arc<dyn BridgeAdapter> {
		let address = settings.address;
		let info = settings
			.name
			.as_ref()
			.map(|name| AdapterInfo::new(key, address, settings.kind, name.clone()));

		match settings.kind {
			AdapterKind::Cctp => shared(match info {
				Some(info) => CctpAdapter::with_info(info, self.messengers.clone()),
				None => CctpAdapter::new(address, self.messengers.clone()),
			}),
			AdapterKind::Stargate => shared(match info {
				Some(info) => StargateAdapter::with_info(info, self.pools.clone()),
				None => StargateAdapter::new(address, self.pools.clone()),
			}),
			AdapterKind::Oft => shared(match info {
				Some(info) => OftAdapter::with_info(info, self.ofts.clone()),
				None => OftAdapter::new(address, self.ofts.clone()),
			}),
			AdapterKind::RollupWithdrawal => shared(match info {
				Some(info) => RollupWithdrawalAdapter::with_info(info, self.routers.clone()),
				None => RollupWithdrawalAdapter::new(address, self.routers.clone()),
			}),
			AdapterKind::Ntt => {
				let adapter = match info {
					Some(info) => NttAdapter::with_info(info, self.managers.clone()),
					None => NttAdapter::new(address, self.managers.clone()),
				};
				shared(match settings.trimmed_decimals {
					Some(decimals) => adapter.with_trimmed_decimals(decimals),
					None => adapter,
				})
			},
			AdapterKind::Teller => shared(match info {
				Some(info) => TellerAdapter::with_info(info, self.tellers.clone()),
				None => TellerAdapter::new(address, self.tellers.clone()),
			}),
		}
	}

	fn count(&self, kind: AdapterKind) -> usize {
		match kind {
			AdapterKind::Cctp => self.messengers.len(),
			AdapterKind::Stargate => self.pools.len(),
			AdapterKind::Oft => self.ofts.len(),
			AdapterKind::RollupWithdrawal => self.routers.len(),
			AdapterKind::Ntt => self.managers.len(),
			AdapterKind::Teller => self.tellers.len(),
		}
	}
}

/// Builder pattern for configuring the bridge node
#[derive(Default)]
pub struct NodeBuilder {
	settings: Option<Settings>,
	adapters: Vec<Arc<dyn BridgeAdapter>>,
}

impl NodeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Register an adapter in addition to the configured ones
	pub fn with_adapter(mut self, adapter: Arc<dyn BridgeAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Assemble the node: roles, endpoints, adapters, factory, genesis, routes
	pub fn build(&self) -> Result<BridgeNode, BuildError> {
		let settings = self.settings.clone().unwrap_or_default();
		settings.validate().map_err(BuildError::InvalidConfig)?;

		let roles = MemoryRoleRegistry::new();
		for admin in &settings.roles.admins {
			roles.grant_role(Role::TopUpFactoryAdmin, *admin);
		}
		for pauser in &settings.roles.pausers {
			roles.grant_role(Role::Pauser, *pauser);
		}
		for unpauser in &settings.roles.unpausers {
			roles.grant_role(Role::Unpauser, *unpauser);
		}

		let endpoints = Endpoints::from_settings(&settings.protocols);
		let mut registry = AdapterRegistry::new();
		let mut enabled: Vec<_> = settings.enabled_adapters().into_iter().collect();
		enabled.sort_by(|a, b| a.0.cmp(&b.0));
		for (key, adapter_settings) in &enabled {
			if endpoints.count(adapter_settings.kind) == 0 {
				warn!(
					"Adapter '{}' ({}) has no protocol endpoints to call",
					key, adapter_settings.kind
				);
			}
			registry.register(endpoints.adapter(key, adapter_settings))?;
		}
		for adapter in &self.adapters {
			registry.register(Arc::clone(adapter))?;
		}
		info!("Registered {} bridge adapter(s)", registry.len());

		let factory = CollectorFactory::new(
			settings.network.factory,
			settings.network.wrapped_native,
			Arc::new(roles),
			Arc::new(registry),
		);
		let mut node = BridgeNode::new(factory);
		if let Some(gateway) = settings.network.gateway {
			let destination = settings
				.network
				.gateway_destination
				.unwrap_or(settings.network.factory);
			node = node.with_gateway(NativeAssetGateway::new(
				gateway,
				settings.network.wrapped_native,
				destination,
			));
		}

		for allocation in &settings.genesis {
			match allocation.token {
				Some(token) => node.mint(token, allocation.account, allocation.amount)?,
				None => node.fund_native(allocation.account, allocation.amount)?,
			}
		}

		// validate() guarantees an admin whenever routes or a wallet are set
		let admin = settings.roles.admins.first().copied().unwrap_or_default();
		if !settings.routes.is_empty() {
			let (tokens, routes): (Vec<_>, Vec<_>) = settings
				.routes
				.iter()
				.filter_map(|r| settings.token_route(r).map(|route| (r.token, route)))
				.unzip();
			node.set_token_route(admin, &tokens, &routes)?;
			info!("Applied {} configured token route(s)", routes.len());
		}
		if let Some(wallet) = settings.recovery_wallet {
			node.set_recovery_wallet(admin, wallet)?;
		}

		Ok(node)
	}

	/// Build the node and return the configured router with state
	pub fn start(self) -> Result<(axum::Router, AppState), BuildError> {
		let settings = self.settings.clone().unwrap_or_default();
		let api_keys: HashMap<String, Address> = settings.resolve_api_keys()?;
		let node = self.build()?;

		let state = AppState::new(node, api_keys);
		let router = create_router().with_state(state.clone());
		Ok((router, state))
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		use topup_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Start the complete server: `.env`, configuration, tracing, bind and serve
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)
			.map_err(|e| -> Box<dyn std::error::Error> { e })?;
		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file and environment"
			}
		);
		topup_config::log_network_summary(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start()?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /api/v1/status");
		info!("  POST /api/v1/tokens/{{token}}/bridge");
		info!("  GET  /api/v1/tokens/{{token}}/fee");
		info!("  GET  /api/v1/tokens/{{token}}/route");
		info!("  PUT  /api/v1/routes");
		info!("  POST /api/v1/instances");
		info!("  POST /api/v1/pull");
		info!("  POST /api/v1/recover");

		axum::serve(listener, app)
			.with_graceful_shutdown(async {
				tokio::signal::ctrl_c().await.ok();
				topup_config::log_service_shutdown();
			})
			.await?;

		Ok(())
	}
}
