//! Deposit collector ("TopUp instance")
//!
//! A minimal owner-controlled holding account. Depositors send native value
//! or tokens to its address; the owner (the factory) sweeps the balances on
//! demand. Native value is wrapped as soon as it arrives.

use serde::Serialize;
use topup_types::{
	keccak256, Address, CollectorError, CollectorResult, Event, Ledger, Log, B256, NATIVE_ASSET,
	U256,
};
use tracing::debug;

/// Code identifier hashed with the wrapped-native address into the init code hash
pub const COLLECTOR_CODE_ID: &[u8] = b"topup.DepositCollector.v1";

/// One non-zero balance moved by a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweptBalance {
	pub instance: Address,
	pub token: Address,
	pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositCollector {
	address: Address,
	wrapped_native: Address,
	owner: Option<Address>,
}

impl DepositCollector {
	/// An uninitialized collector at `address`
	pub fn new(address: Address, wrapped_native: Address) -> Self {
		Self {
			address,
			wrapped_native,
			owner: None,
		}
	}

	/// Hash of the collector's init code for a given wrapped-native contract
	pub fn init_code_hash(wrapped_native: Address) -> B256 {
		let mut init_code = COLLECTOR_CODE_ID.to_vec();
		init_code.extend_from_slice(wrapped_native.as_slice());
		keccak256(init_code)
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn owner(&self) -> Option<Address> {
		self.owner
	}

	pub fn initialize(&mut self, ledger: &mut dyn Ledger, owner: Address) -> CollectorResult<()> {
		if self.owner.is_some() {
			return Err(CollectorError::AlreadyInitialized {
				collector: self.address,
			});
		}
		self.owner = Some(owner);
		ledger.emit(Log {
			emitter: self.address,
			event: Event::CollectorInitialized { owner },
		});
		Ok(())
	}

	/// Accept native value from `from` and wrap it in place
	pub fn receive_native(
		&self,
		ledger: &mut dyn Ledger,
		from: Address,
		amount: U256,
	) -> CollectorResult<()> {
		ledger.transfer_native(from, self.address, amount)?;
		ledger.wrap_native(self.wrapped_native, self.address, amount)?;
		Ok(())
	}

	/// Sweep the full balance of each listed token to the owner
	///
	/// The native sentinel wraps any unwrapped native balance first and then
	/// sweeps the wrapped token. Zero balances are skipped.
	pub fn process_top_up(
		&self,
		ledger: &mut dyn Ledger,
		caller: Address,
		tokens: &[Address],
	) -> CollectorResult<Vec<SweptBalance>> {
		let owner = self
			.owner
			.filter(|owner| *owner == caller)
			.ok_or(CollectorError::Unauthorized {
				collector: self.address,
				caller,
			})?;

		let mut swept = Vec::new();
		for &token in tokens {
			let token = if token == NATIVE_ASSET {
				let native = ledger.native_balance_of(self.address);
				if !native.is_zero() {
					ledger.wrap_native(self.wrapped_native, self.address, native)?;
				}
				self.wrapped_native
			} else {
				token
			};

			let amount = ledger.balance_of(token, self.address);
			if amount.is_zero() {
				continue;
			}

			ledger.transfer(token, self.address, owner, amount)?;
			ledger.emit(Log {
				emitter: self.address,
				event: Event::TopUpProcessed { token, amount },
			});
			debug!("Collector {} swept {} of {}", self.address, amount, token);

			swept.push(SweptBalance {
				instance: self.address,
				token,
				amount,
			});
		}

		Ok(swept)
	}
}
