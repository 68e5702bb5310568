//! TopUp Adapters
//!
//! Bridge adapters for the TopUp bridge, the external protocol interfaces
//! they drive, and simulated protocol endpoints for local nodes and tests.

pub mod cctp_adapter;
pub mod contracts;
pub mod ntt_adapter;
pub mod oft_adapter;
pub mod protocols;
pub mod rollup_adapter;
pub mod simulated;
pub mod stargate_adapter;
pub mod teller_adapter;

pub use cctp_adapter::CctpAdapter;
pub use contracts::Contracts;
pub use ntt_adapter::NttAdapter;
pub use oft_adapter::OftAdapter;
pub use rollup_adapter::RollupWithdrawalAdapter;
pub use stargate_adapter::StargateAdapter;
pub use teller_adapter::TellerAdapter;
pub use topup_types::{AdapterError, AdapterRegistryError, AdapterResult, BridgeAdapter};

use std::collections::HashMap;
use std::sync::Arc;
use topup_types::{AdapterKind, Address, BridgeParams, FactoryContext, U256};
use tracing::info;

/// Registry of bridge adapters keyed by the address routes bind to
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<Address, Arc<dyn BridgeAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an adapter
	pub fn register(&mut self, adapter: Arc<dyn BridgeAdapter>) -> Result<(), AdapterRegistryError> {
		let address = adapter.address();
		if address == Address::ZERO {
			return Err(AdapterRegistryError::ZeroAddress);
		}
		if self.adapters.contains_key(&address) {
			return Err(AdapterRegistryError::AlreadyRegistered { address });
		}

		info!(
			"Registered {} adapter '{}' at {}",
			adapter.kind(),
			adapter.id(),
			address
		);
		self.adapters.insert(address, adapter);
		Ok(())
	}

	pub fn get(&self, address: Address) -> Option<Arc<dyn BridgeAdapter>> {
		self.adapters.get(&address).cloned()
	}

	pub fn contains(&self, address: Address) -> bool {
		self.adapters.contains_key(&address)
	}

	pub fn get_all(&self) -> Vec<Arc<dyn BridgeAdapter>> {
		self.adapters.values().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

pub(crate) fn invalid_params(adapter: AdapterKind, params: &BridgeParams) -> AdapterError {
	AdapterError::InvalidParams {
		adapter,
		found: params.kind(),
	}
}

/// The attached value must cover the protocol's quoted fee
pub(crate) fn ensure_native_fee(ctx: &FactoryContext<'_>, required: U256) -> AdapterResult<()> {
	let provided = ctx.attached_value();
	if provided < required {
		return Err(AdapterError::InsufficientNativeFee { required, provided });
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::protocols::TokenMessenger;
	use crate::simulated::SimulatedTokenMessenger;

	#[test]
	fn test_register_and_lookup() {
		let messenger: Arc<dyn TokenMessenger> =
			Arc::new(SimulatedTokenMessenger::new(Address::repeat_byte(0xC1)));
		let adapter = CctpAdapter::new(
			Address::repeat_byte(0xA1),
			Contracts::new().with(Address::repeat_byte(0xC1), messenger),
		);

		let mut registry = AdapterRegistry::new();
		registry.register(Arc::new(adapter)).unwrap();

		assert!(registry.contains(Address::repeat_byte(0xA1)));
		assert_eq!(
			registry.get(Address::repeat_byte(0xA1)).unwrap().kind(),
			AdapterKind::Cctp
		);
		assert!(registry.get(Address::repeat_byte(0xA2)).is_none());
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_duplicate_registration_fails() {
		let mut registry = AdapterRegistry::new();
		registry
			.register(Arc::new(CctpAdapter::new(
				Address::repeat_byte(0xA1),
				Contracts::new(),
			)))
			.unwrap();

		let err = registry
			.register(Arc::new(TellerAdapter::new(
				Address::repeat_byte(0xA1),
				Contracts::new(),
			)))
			.unwrap_err();

		assert_eq!(
			err,
			AdapterRegistryError::AlreadyRegistered {
				address: Address::repeat_byte(0xA1)
			}
		);
	}

	#[test]
	fn test_zero_address_rejected() {
		let mut registry = AdapterRegistry::new();
		let err = registry
			.register(Arc::new(CctpAdapter::new(Address::ZERO, Contracts::new())))
			.unwrap_err();
		assert_eq!(err, AdapterRegistryError::ZeroAddress);
	}
}
