//! Native asset gateway
//!
//! Stateless pass-through: native value sent to the gateway is wrapped and
//! the wrapped amount forwarded to one fixed destination.

use topup_types::{Address, Ledger, LedgerResult, U256};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAssetGateway {
	address: Address,
	wrapped_native: Address,
	destination: Address,
}

impl NativeAssetGateway {
	pub fn new(address: Address, wrapped_native: Address, destination: Address) -> Self {
		Self {
			address,
			wrapped_native,
			destination,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn destination(&self) -> Address {
		self.destination
	}

	/// Wrap `amount` of native value sent by `from` and forward it
	pub fn receive(&self, ledger: &mut dyn Ledger, from: Address, amount: U256) -> LedgerResult<()> {
		if amount.is_zero() {
			return Ok(());
		}

		ledger.transfer_native(from, self.address, amount)?;
		ledger.wrap_native(self.wrapped_native, self.address, amount)?;
		ledger.transfer(self.wrapped_native, self.address, self.destination, amount)?;

		debug!(
			"Gateway {} forwarded {} wrapped native to {}",
			self.address, amount, self.destination
		);
		Ok(())
	}
}
