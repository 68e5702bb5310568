use crate::protocols::{NttManager, NttTransfer};
use parking_lot::Mutex;
use topup_types::{AdapterError, AdapterResult, Address, Bytes, Event, ExternalCall, B256, U256};

/// Decimals the manager normalizes amounts to on the wire
const WIRE_DECIMALS: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTransfer {
	pub sequence: u64,
	pub sender: Address,
	pub transfer: NttTransfer,
}

/// Burning NTT manager with one delivery price per transceiver
#[derive(Debug)]
pub struct SimulatedNttManager {
	address: Address,
	token: Address,
	decimals: u8,
	delivery_prices: Mutex<Vec<U256>>,
	transfers: Mutex<Vec<OutboundTransfer>>,
}

impl SimulatedNttManager {
	pub fn new(address: Address, token: Address, decimals: u8) -> Self {
		Self {
			address,
			token,
			decimals,
			delivery_prices: Mutex::new(Vec::new()),
			transfers: Mutex::new(Vec::new()),
		}
	}

	pub fn with_delivery_prices(self, prices: Vec<U256>) -> Self {
		self.set_delivery_prices(prices);
		self
	}

	pub fn set_delivery_prices(&self, prices: Vec<U256>) {
		*self.delivery_prices.lock() = prices;
	}

	pub fn transfers(&self) -> Vec<OutboundTransfer> {
		self.transfers.lock().clone()
	}

	fn has_dust(&self, amount: U256) -> bool {
		if self.decimals <= WIRE_DECIMALS {
			return false;
		}
		let factor = U256::from(10u64).pow(U256::from(self.decimals - WIRE_DECIMALS));
		!(amount % factor).is_zero()
	}
}

impl NttManager for SimulatedNttManager {
	fn address(&self) -> Address {
		self.address
	}

	fn token(&self) -> Address {
		self.token
	}

	fn token_decimals(&self) -> u8 {
		self.decimals
	}

	fn quote_delivery_price(
		&self,
		_recipient_chain: u16,
		_transceiver_instructions: &Bytes,
	) -> AdapterResult<(Vec<U256>, U256)> {
		let prices = self.delivery_prices.lock().clone();
		let total = prices
			.iter()
			.fold(U256::ZERO, |total, price| total.saturating_add(*price));
		Ok((prices, total))
	}

	fn transfer(&self, mut call: ExternalCall<'_>, transfer: &NttTransfer) -> AdapterResult<u64> {
		if transfer.amount.is_zero() {
			return Err(AdapterError::protocol(self.address, "zero amount"));
		}
		if self.has_dust(transfer.amount) {
			return Err(AdapterError::protocol(self.address, "transfer amount has dust"));
		}
		if transfer.recipient == B256::ZERO {
			return Err(AdapterError::protocol(self.address, "invalid recipient"));
		}
		let (_, total) =
			self.quote_delivery_price(transfer.recipient_chain, &transfer.transceiver_instructions)?;
		if call.value() < total {
			return Err(AdapterError::protocol(self.address, "delivery payment too low"));
		}

		call.pull(self.token, transfer.amount)?;
		call.burn(self.token, transfer.amount)?;

		let mut transfers = self.transfers.lock();
		let sequence = transfers.len() as u64;
		call.emit(Event::TransferSent {
			sequence,
			recipient: transfer.recipient,
			amount: transfer.amount,
			fee: total,
			recipient_chain: transfer.recipient_chain,
		});
		transfers.push(OutboundTransfer {
			sequence,
			sender: call.sender(),
			transfer: transfer.clone(),
		});
		Ok(sequence)
	}
}
