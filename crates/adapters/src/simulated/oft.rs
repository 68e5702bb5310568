use super::{after_fee, message_id};
use crate::protocols::{MessagingFee, MessagingReceipt, OftEndpoint, OftLimit, OftReceipt, SendParam};
use parking_lot::Mutex;
use topup_types::{AdapterError, AdapterResult, Address, Event, ExternalCall, U256};

/// OFT with shared-decimal dust removal
///
/// A native OFT is its own token and burns from the sender; an adapter OFT
/// locks an external token it pulls through an allowance.
#[derive(Debug)]
pub struct SimulatedOft {
	address: Address,
	token: Address,
	approval_required: bool,
	decimal_conversion_rate: U256,
	fee_bps: Mutex<u16>,
	native_fee: Mutex<U256>,
	nonce: Mutex<u64>,
}

impl SimulatedOft {
	/// OFT that is itself the token
	pub fn native(address: Address, decimal_conversion_rate: U256) -> Self {
		Self::build(address, address, false, decimal_conversion_rate)
	}

	/// OFT locking an external token
	pub fn adapter(address: Address, token: Address, decimal_conversion_rate: U256) -> Self {
		Self::build(address, token, true, decimal_conversion_rate)
	}

	fn build(address: Address, token: Address, approval_required: bool, rate: U256) -> Self {
		Self {
			address,
			token,
			approval_required,
			decimal_conversion_rate: rate.max(U256::from(1)),
			fee_bps: Mutex::new(0),
			native_fee: Mutex::new(U256::ZERO),
			nonce: Mutex::new(0),
		}
	}

	pub fn with_native_fee(self, native_fee: U256) -> Self {
		self.set_native_fee(native_fee);
		self
	}

	pub fn with_fee_bps(self, fee_bps: u16) -> Self {
		self.set_fee_bps(fee_bps);
		self
	}

	pub fn set_native_fee(&self, native_fee: U256) {
		*self.native_fee.lock() = native_fee;
	}

	pub fn set_fee_bps(&self, fee_bps: u16) {
		*self.fee_bps.lock() = fee_bps;
	}

	fn remove_dust(&self, amount: U256) -> U256 {
		amount - amount % self.decimal_conversion_rate
	}

	fn receipt(&self, amount: U256) -> OftReceipt {
		let sent = self.remove_dust(amount);
		OftReceipt {
			amount_sent_ld: sent,
			amount_received_ld: after_fee(sent, *self.fee_bps.lock()),
		}
	}
}

impl OftEndpoint for SimulatedOft {
	fn address(&self) -> Address {
		self.address
	}

	fn token(&self) -> Address {
		self.token
	}

	fn approval_required(&self) -> bool {
		self.approval_required
	}

	fn quote_oft(&self, send_param: &SendParam) -> AdapterResult<(OftLimit, OftReceipt)> {
		let limit = OftLimit {
			min_amount_ld: U256::ZERO,
			max_amount_ld: U256::MAX,
		};
		Ok((limit, self.receipt(send_param.amount_ld)))
	}

	fn quote_send(&self, _send_param: &SendParam, pay_in_lz_token: bool) -> AdapterResult<MessagingFee> {
		if pay_in_lz_token {
			return Err(AdapterError::protocol(self.address, "lz token fees not supported"));
		}
		Ok(MessagingFee {
			native_fee: *self.native_fee.lock(),
			lz_token_fee: U256::ZERO,
		})
	}

	fn send(
		&self,
		mut call: ExternalCall<'_>,
		send_param: &SendParam,
		fee: &MessagingFee,
		refund_address: Address,
	) -> AdapterResult<(MessagingReceipt, OftReceipt)> {
		let required = *self.native_fee.lock();
		if fee.native_fee < required || call.value() < fee.native_fee {
			return Err(AdapterError::protocol(self.address, "insufficient messaging fee"));
		}
		let receipt = self.receipt(send_param.amount_ld);
		if receipt.amount_sent_ld.is_zero() {
			return Err(AdapterError::protocol(self.address, "amount below shared decimals"));
		}
		if receipt.amount_received_ld < send_param.min_amount_ld {
			return Err(AdapterError::protocol(self.address, "slippage exceeded"));
		}

		if self.approval_required {
			call.pull(self.token, receipt.amount_sent_ld)?;
		} else {
			call.burn_from_sender(receipt.amount_sent_ld)?;
		}
		let excess = call.value() - fee.native_fee;
		if !excess.is_zero() {
			call.refund_native(refund_address, excess)?;
		}

		let mut nonce = self.nonce.lock();
		*nonce += 1;
		let guid = message_id(self.address, *nonce);
		let from = call.sender();
		call.emit(Event::OftSent {
			guid,
			destination_endpoint_id: send_param.dst_eid,
			from,
			amount_sent: receipt.amount_sent_ld,
			amount_received: receipt.amount_received_ld,
		});

		let messaging = MessagingReceipt {
			guid,
			nonce: *nonce,
			fee: *fee,
		};
		Ok((messaging, receipt))
	}
}
