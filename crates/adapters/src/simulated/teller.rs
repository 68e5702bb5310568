use super::message_id;
use crate::protocols::Teller;
use parking_lot::Mutex;
use topup_types::{AdapterError, AdapterResult, Address, Bytes, Event, ExternalCall, B256, U256, NATIVE_ASSET};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgedShares {
	pub message_id: B256,
	pub shares: U256,
	pub to: Address,
	pub bridge_data: Bytes,
}

/// Teller burning vault shares on the source chain, paid in native value
#[derive(Debug)]
pub struct SimulatedTeller {
	address: Address,
	vault: Address,
	fee: Mutex<U256>,
	bridged: Mutex<Vec<BridgedShares>>,
}

impl SimulatedTeller {
	pub fn new(address: Address, vault: Address) -> Self {
		Self {
			address,
			vault,
			fee: Mutex::new(U256::ZERO),
			bridged: Mutex::new(Vec::new()),
		}
	}

	pub fn with_fee(self, fee: U256) -> Self {
		self.set_fee(fee);
		self
	}

	pub fn set_fee(&self, fee: U256) {
		*self.fee.lock() = fee;
	}

	pub fn bridged(&self) -> Vec<BridgedShares> {
		self.bridged.lock().clone()
	}
}

impl Teller for SimulatedTeller {
	fn address(&self) -> Address {
		self.address
	}

	fn vault(&self) -> Address {
		self.vault
	}

	fn preview_fee(
		&self,
		_shares: U256,
		_to: Address,
		_bridge_data: &Bytes,
		fee_token: Address,
	) -> AdapterResult<U256> {
		if fee_token != NATIVE_ASSET {
			return Err(AdapterError::protocol(self.address, "unsupported fee token"));
		}
		Ok(*self.fee.lock())
	}

	fn bridge(
		&self,
		mut call: ExternalCall<'_>,
		shares: U256,
		to: Address,
		bridge_data: &Bytes,
		fee_token: Address,
		max_fee: U256,
	) -> AdapterResult<B256> {
		let fee = self.preview_fee(shares, to, bridge_data, fee_token)?;
		if fee > max_fee {
			return Err(AdapterError::protocol(self.address, "fee exceeds max fee"));
		}
		if call.value() < fee {
			return Err(AdapterError::protocol(self.address, "insufficient native fee"));
		}
		if shares.is_zero() {
			return Err(AdapterError::protocol(self.address, "zero shares"));
		}

		call.pull(self.vault, shares)?;
		call.burn(self.vault, shares)?;

		let mut bridged = self.bridged.lock();
		let id = message_id(self.address, bridged.len() as u64);
		call.emit(Event::SharesBridged {
			message_id: id,
			shares,
			to,
			fee,
		});
		bridged.push(BridgedShares {
			message_id: id,
			shares,
			to,
			bridge_data: bridge_data.clone(),
		});
		Ok(id)
	}
}
