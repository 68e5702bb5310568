//! Bridge node
//!
//! Bundles the ledger, the factory and the optional native gateway into the
//! single stateful unit the API serializes calls through. Besides the factory
//! operations it exposes the devnet helpers used to fund accounts and make
//! deposits.

use crate::collector::SweptBalance;
use crate::factory::CollectorFactory;
use crate::gateway::NativeAssetGateway;
use topup_storage::{LedgerTx, MemoryLedger};
use topup_types::{
	Address, BridgeFee, BridgeReceipt, CallEnv, FactoryError, FactoryResult, Ledger, Log,
	TokenRoute, B256, U256,
};
use tracing::debug;

#[derive(Debug)]
pub struct BridgeNode {
	ledger: MemoryLedger,
	factory: CollectorFactory,
	gateway: Option<NativeAssetGateway>,
}

impl BridgeNode {
	pub fn new(factory: CollectorFactory) -> Self {
		Self::with_ledger(MemoryLedger::new(), factory)
	}

	pub fn with_ledger(ledger: MemoryLedger, factory: CollectorFactory) -> Self {
		Self {
			ledger,
			factory,
			gateway: None,
		}
	}

	pub fn with_gateway(mut self, gateway: NativeAssetGateway) -> Self {
		self.gateway = Some(gateway);
		self
	}

	pub fn ledger(&self) -> &MemoryLedger {
		&self.ledger
	}

	pub fn factory(&self) -> &CollectorFactory {
		&self.factory
	}

	pub fn gateway(&self) -> Option<&NativeAssetGateway> {
		self.gateway.as_ref()
	}

	pub fn logs(&self) -> &[Log] {
		self.ledger.logs()
	}

	// ================================
	// FACTORY OPERATIONS
	// ================================

	pub fn deploy_instance(&mut self, caller: Address, salt: B256) -> FactoryResult<Address> {
		self.factory.deploy_instance(&mut self.ledger, caller, salt)
	}

	pub fn set_token_route(
		&mut self,
		caller: Address,
		tokens: &[Address],
		routes: &[TokenRoute],
	) -> FactoryResult<()> {
		self.factory
			.set_token_route(&mut self.ledger, caller, tokens, routes)
	}

	pub fn bridge(&mut self, env: &CallEnv, token: Address) -> FactoryResult<BridgeReceipt> {
		self.factory.bridge(&mut self.ledger, env, token)
	}

	pub fn get_bridge_fee(&self, token: Address) -> FactoryResult<BridgeFee> {
		self.factory.get_bridge_fee(&self.ledger, token)
	}

	pub fn pull_funds(
		&mut self,
		tokens: &[Address],
		start: usize,
		n: usize,
	) -> FactoryResult<Vec<SweptBalance>> {
		self.factory.pull_funds(&mut self.ledger, tokens, start, n)
	}

	pub fn pull_funds_from_instance(
		&mut self,
		tokens: &[Address],
		instance: Address,
	) -> FactoryResult<Vec<SweptBalance>> {
		self.factory
			.pull_funds_from_instance(&mut self.ledger, tokens, instance)
	}

	pub fn recover_funds(
		&mut self,
		caller: Address,
		token: Address,
		amount: U256,
	) -> FactoryResult<()> {
		self.factory
			.recover_funds(&mut self.ledger, caller, token, amount)
	}

	pub fn set_recovery_wallet(&mut self, caller: Address, wallet: Address) -> FactoryResult<()> {
		self.factory
			.set_recovery_wallet(&mut self.ledger, caller, wallet)
	}

	pub fn pause(&mut self, caller: Address) -> FactoryResult<()> {
		self.factory.pause(&mut self.ledger, caller)
	}

	pub fn unpause(&mut self, caller: Address) -> FactoryResult<()> {
		self.factory.unpause(&mut self.ledger, caller)
	}

	// ================================
	// DEPOSITS AND FUNDING
	// ================================

	/// Native value sent to `to`; registered instances wrap it on arrival
	pub fn send_native(&mut self, from: Address, to: Address, amount: U256) -> FactoryResult<()> {
		let mut tx = LedgerTx::new(&mut self.ledger);
		match self.factory.instance(to) {
			Some(collector) => collector.receive_native(&mut tx, from, amount)?,
			None => tx.transfer_native(from, to, amount)?,
		}
		tx.commit();
		debug!("{} sent {} native to {}", from, amount, to);
		Ok(())
	}

	/// Native value sent to the gateway, forwarded wrapped to its destination
	pub fn send_to_gateway(&mut self, from: Address, amount: U256) -> FactoryResult<()> {
		let gateway = self
			.gateway
			.as_ref()
			.ok_or_else(|| FactoryError::InvalidConfig {
				reason: "native gateway not configured".to_string(),
			})?;

		let mut tx = LedgerTx::new(&mut self.ledger);
		gateway.receive(&mut tx, from, amount)?;
		tx.commit();
		Ok(())
	}

	/// Mint `amount` of `token` to `account`
	pub fn mint(&mut self, token: Address, account: Address, amount: U256) -> FactoryResult<()> {
		self.ledger.credit(token, account, amount)?;
		Ok(())
	}

	/// Credit native value to `account`
	pub fn fund_native(&mut self, account: Address, amount: U256) -> FactoryResult<()> {
		self.ledger.credit_native(account, amount)?;
		Ok(())
	}

	pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
		self.ledger.balance_of(token, holder)
	}

	pub fn native_balance_of(&self, holder: Address) -> U256 {
		self.ledger.native_balance_of(holder)
	}
}
