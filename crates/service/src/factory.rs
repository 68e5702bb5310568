//! Collector factory ("TopUpFactory")
//!
//! Deploys deposit collectors at predictable addresses, sweeps them, owns the
//! per-token routing table and is the only caller of bridge adapters. Every
//! mutating operation runs inside a [`LedgerTx`] and commits only on success,
//! so a failure leaves neither balance changes nor logs behind.

use crate::collector::{DepositCollector, SweptBalance};
use std::fmt;
use std::sync::Arc;
use topup_adapters::AdapterRegistry;
use topup_storage::{InstanceRegistry, LedgerTx, RouteTable};
use topup_types::{
	Address, BridgeAdapter, BridgeFee, BridgeReceipt, BridgeRequest, CallEnv, Event,
	FactoryContext, FactoryError, FactoryResult, Ledger, Log, Role, RoleService, TokenRoute, B256,
	NATIVE_ASSET, U256,
};
use tracing::{debug, info, warn};

pub struct CollectorFactory {
	address: Address,
	wrapped_native: Address,
	collector_code_hash: B256,
	roles: Arc<dyn RoleService>,
	adapters: Arc<AdapterRegistry>,
	routes: RouteTable,
	instances: InstanceRegistry<DepositCollector>,
	recovery_wallet: Option<Address>,
	paused: bool,
}

impl fmt::Debug for CollectorFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CollectorFactory")
			.field("address", &self.address)
			.field("wrapped_native", &self.wrapped_native)
			.field("adapters", &self.adapters.len())
			.field("routes", &self.routes.len())
			.field("instances", &self.instances.len())
			.field("recovery_wallet", &self.recovery_wallet)
			.field("paused", &self.paused)
			.finish()
	}
}

impl CollectorFactory {
	pub fn new(
		address: Address,
		wrapped_native: Address,
		roles: Arc<dyn RoleService>,
		adapters: Arc<AdapterRegistry>,
	) -> Self {
		Self {
			address,
			wrapped_native,
			collector_code_hash: DepositCollector::init_code_hash(wrapped_native),
			roles,
			adapters,
			routes: RouteTable::new(),
			instances: InstanceRegistry::new(),
			recovery_wallet: None,
			paused: false,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn wrapped_native(&self) -> Address {
		self.wrapped_native
	}

	pub fn adapters(&self) -> &AdapterRegistry {
		&self.adapters
	}

	// ================================
	// INSTANCES
	// ================================

	/// Address a collector deployed with `salt` will have
	pub fn predict_instance_address(&self, salt: B256) -> Address {
		self.address.create2(salt, self.collector_code_hash)
	}

	pub fn deploy_instance(
		&mut self,
		ledger: &mut dyn Ledger,
		caller: Address,
		salt: B256,
	) -> FactoryResult<Address> {
		debug!("Deploy instance requested by {} with salt {}", caller, salt);
		self.ensure_role(Role::TopUpFactoryAdmin, caller)?;

		let address = self.predict_instance_address(salt);
		if ledger.has_code(address) || self.instances.contains(address) {
			return Err(FactoryError::AddressCollision { address, salt });
		}

		let mut collector = DepositCollector::new(address, self.wrapped_native);
		let mut tx = LedgerTx::new(ledger);
		tx.set_code(address);
		collector.initialize(&mut tx, self.address)?;
		self.emit(
			&mut tx,
			Event::InstanceDeployed {
				instance: address,
				salt,
			},
		);
		tx.commit();

		self.instances.insert(address, collector);
		info!(
			"Deployed instance {} (salt {}, {} total)",
			address,
			salt,
			self.instances.len()
		);
		Ok(address)
	}

	/// Instances in `[start, start + n)`, clamped to the number deployed
	pub fn deployed_instances(&self, start: usize, n: usize) -> Vec<Address> {
		self.instances.page(start, n).to_vec()
	}

	pub fn instance_count(&self) -> usize {
		self.instances.len()
	}

	pub fn is_instance(&self, address: Address) -> bool {
		self.instances.contains(address)
	}

	pub fn instance(&self, address: Address) -> Option<&DepositCollector> {
		self.instances.get(address)
	}

	// ================================
	// ROUTES
	// ================================

	/// Replace the routes of `tokens`; the whole batch is rejected if any entry is invalid
	pub fn set_token_route(
		&mut self,
		ledger: &mut dyn Ledger,
		caller: Address,
		tokens: &[Address],
		routes: &[TokenRoute],
	) -> FactoryResult<()> {
		debug!("Set {} token routes requested by {}", tokens.len(), caller);
		self.ensure_role(Role::TopUpFactoryAdmin, caller)?;

		if tokens.len() != routes.len() {
			return Err(FactoryError::ArrayLengthMismatch {
				tokens: tokens.len(),
				routes: routes.len(),
			});
		}
		for (token, route) in tokens.iter().zip(routes) {
			if *token == Address::ZERO {
				return Err(FactoryError::TokenCannotBeZeroAddress);
			}
			route.validate().map_err(|e| FactoryError::InvalidConfig {
				reason: format!("route for {token}: {e}"),
			})?;
			let adapter = self.adapters.get(route.bridge_adapter).ok_or_else(|| {
				FactoryError::InvalidConfig {
					reason: format!(
						"route for {token}: no adapter registered at {}",
						route.bridge_adapter
					),
				}
			})?;
			if adapter.kind() != route.kind() {
				return Err(FactoryError::InvalidConfig {
					reason: format!(
						"route for {token}: {} adapter {} cannot take {} params",
						adapter.kind(),
						route.bridge_adapter,
						route.kind()
					),
				});
			}
		}

		for (token, route) in tokens.iter().zip(routes) {
			self.routes.insert(*token, route.clone());
			self.emit(
				ledger,
				Event::TokenRouteSet {
					token: *token,
					route: route.clone(),
				},
			);
			info!(
				"Route set for {}: {} adapter {} to {} ({} bps)",
				token,
				route.kind(),
				route.bridge_adapter,
				route.recipient,
				route.max_slippage_bps
			);
		}
		Ok(())
	}

	pub fn token_route(&self, token: Address) -> Option<&TokenRoute> {
		self.routes.get(token)
	}

	pub fn is_token_supported(&self, token: Address) -> bool {
		self.routes.is_configured(token)
	}

	// ================================
	// BRIDGING
	// ================================

	/// Bridge the factory's full balance of `token` through its route
	pub fn bridge(
		&self,
		ledger: &mut dyn Ledger,
		env: &CallEnv,
		token: Address,
	) -> FactoryResult<BridgeReceipt> {
		debug!(
			"Bridge of {} requested by {} with value {}",
			token, env.caller, env.value
		);
		if self.paused {
			return Err(FactoryError::Paused);
		}

		let (route, adapter) = self.route_and_adapter(token)?;
		let amount = ledger.balance_of(token, self.address);
		if amount.is_zero() {
			return Err(FactoryError::ZeroBalance { token });
		}

		let mut tx = LedgerTx::new(ledger);
		tx.transfer_native(env.caller, self.address, env.value)?;
		let request = BridgeRequest::for_route(token, amount, route);
		let receipt = adapter.bridge(
			&mut FactoryContext::new(self.address, env.value, &mut tx),
			&request,
		)?;
		tx.commit();

		info!(
			"Bridged {} of {} via {} adapter {} (min received {}, fee {})",
			receipt.amount_sent,
			token,
			adapter.kind(),
			adapter.id(),
			receipt.min_amount_received,
			receipt.native_fee
		);
		Ok(receipt)
	}

	/// Price bridging the factory's current balance of `token`
	pub fn get_bridge_fee(&self, ledger: &dyn Ledger, token: Address) -> FactoryResult<BridgeFee> {
		let (route, adapter) = self.route_and_adapter(token)?;
		let amount = ledger.balance_of(token, self.address);
		if amount.is_zero() {
			return Err(FactoryError::ZeroBalance { token });
		}

		let fee = adapter.get_bridge_fee(&BridgeRequest::for_route(token, amount, route))?;
		Ok(fee)
	}

	fn route_and_adapter(
		&self,
		token: Address,
	) -> FactoryResult<(&TokenRoute, Arc<dyn BridgeAdapter>)> {
		let route = self
			.routes
			.configured(token)
			.ok_or(FactoryError::TokenConfigNotSet { token })?;
		let adapter = self
			.adapters
			.get(route.bridge_adapter)
			.ok_or(FactoryError::AdapterNotFound {
				adapter: route.bridge_adapter,
			})?;
		Ok((route, adapter))
	}

	// ================================
	// SWEEPING
	// ================================

	/// Sweep `tokens` from the instances in `[start, start + n)`
	pub fn pull_funds(
		&self,
		ledger: &mut dyn Ledger,
		tokens: &[Address],
		start: usize,
		n: usize,
	) -> FactoryResult<Vec<SweptBalance>> {
		let mut tx = LedgerTx::new(ledger);
		let mut swept = Vec::new();
		for collector in self.instances.window(start, n) {
			swept.extend(collector.process_top_up(&mut tx, self.address, tokens)?);
		}
		tx.commit();

		info!(
			"Pulled {} balances from instances [{}, {})",
			swept.len(),
			start,
			start.saturating_add(n).min(self.instances.len())
		);
		Ok(swept)
	}

	pub fn pull_funds_from_instance(
		&self,
		ledger: &mut dyn Ledger,
		tokens: &[Address],
		instance: Address,
	) -> FactoryResult<Vec<SweptBalance>> {
		let collector = self
			.instances
			.get(instance)
			.ok_or(FactoryError::InvalidTopUpAddress { instance })?;

		let mut tx = LedgerTx::new(ledger);
		let swept = collector.process_top_up(&mut tx, self.address, tokens)?;
		tx.commit();

		info!("Pulled {} balances from instance {}", swept.len(), instance);
		Ok(swept)
	}

	// ================================
	// RECOVERY
	// ================================

	/// Send `amount` of a token without a route (or native value) to the recovery wallet
	pub fn recover_funds(
		&self,
		ledger: &mut dyn Ledger,
		caller: Address,
		token: Address,
		amount: U256,
	) -> FactoryResult<()> {
		self.ensure_role(Role::TopUpFactoryAdmin, caller)?;
		if self.routes.is_configured(token) {
			return Err(FactoryError::OnlyUnsupportedTokens { token });
		}
		let wallet = self
			.recovery_wallet
			.ok_or(FactoryError::RecoveryWalletNotSet)?;

		let mut tx = LedgerTx::new(ledger);
		if token == NATIVE_ASSET {
			tx.transfer_native(self.address, wallet, amount)?;
		} else {
			tx.transfer(token, self.address, wallet, amount)?;
		}
		self.emit(
			&mut tx,
			Event::FundsRecovered {
				token,
				amount,
				wallet,
			},
		);
		tx.commit();

		info!("Recovered {} of {} to {}", amount, token, wallet);
		Ok(())
	}

	pub fn set_recovery_wallet(
		&mut self,
		ledger: &mut dyn Ledger,
		caller: Address,
		wallet: Address,
	) -> FactoryResult<()> {
		self.ensure_role(Role::TopUpFactoryAdmin, caller)?;
		if wallet == Address::ZERO {
			return Err(FactoryError::InvalidConfig {
				reason: "recovery wallet cannot be the zero address".to_string(),
			});
		}

		let old_wallet = self.recovery_wallet.replace(wallet);
		self.emit(
			ledger,
			Event::RecoveryWalletSet {
				old_wallet,
				new_wallet: wallet,
			},
		);
		info!("Recovery wallet set to {}", wallet);
		Ok(())
	}

	pub fn recovery_wallet(&self) -> Option<Address> {
		self.recovery_wallet
	}

	// ================================
	// PAUSING
	// ================================

	pub fn pause(&mut self, ledger: &mut dyn Ledger, caller: Address) -> FactoryResult<()> {
		self.ensure_role(Role::Pauser, caller)?;
		if self.paused {
			return Err(FactoryError::Paused);
		}
		self.paused = true;
		self.emit(ledger, Event::Paused { account: caller });
		warn!("Factory paused by {}", caller);
		Ok(())
	}

	pub fn unpause(&mut self, ledger: &mut dyn Ledger, caller: Address) -> FactoryResult<()> {
		self.ensure_role(Role::Unpauser, caller)?;
		if !self.paused {
			return Err(FactoryError::NotPaused);
		}
		self.paused = false;
		self.emit(ledger, Event::Unpaused { account: caller });
		info!("Factory unpaused by {}", caller);
		Ok(())
	}

	pub fn is_paused(&self) -> bool {
		self.paused
	}

	fn ensure_role(&self, role: Role, account: Address) -> FactoryResult<()> {
		if !self.roles.has_role(role, account) {
			warn!("Rejected call from {}: missing role {}", account, role);
			return Err(FactoryError::Unauthorized { role, account });
		}
		Ok(())
	}

	fn emit(&self, ledger: &mut dyn Ledger, event: Event) {
		ledger.emit(Log {
			emitter: self.address,
			event,
		});
	}
}
