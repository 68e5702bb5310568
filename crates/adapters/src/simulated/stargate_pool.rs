use super::{after_fee, message_id};
use crate::protocols::{
	MessagingFee, MessagingReceipt, OftEndpoint, OftLimit, OftReceipt, SendParam, StargatePool,
	Ticket,
};
use parking_lot::Mutex;
use topup_types::{AdapterError, AdapterResult, Address, Bytes, Event, ExternalCall, U256};

#[derive(Debug, Default)]
struct PoolState {
	nonce: u64,
	next_ticket: u64,
}

/// Liquidity pool that keeps the sent tokens and charges a bps fee on receipt
#[derive(Debug)]
pub struct SimulatedStargatePool {
	address: Address,
	token: Address,
	fee_bps: Mutex<u16>,
	native_fee: Mutex<U256>,
	state: Mutex<PoolState>,
}

impl SimulatedStargatePool {
	pub fn new(address: Address, token: Address) -> Self {
		Self {
			address,
			token,
			fee_bps: Mutex::new(0),
			native_fee: Mutex::new(U256::ZERO),
			state: Mutex::new(PoolState::default()),
		}
	}

	pub fn with_fee_bps(self, fee_bps: u16) -> Self {
		self.set_fee_bps(fee_bps);
		self
	}

	pub fn with_native_fee(self, native_fee: U256) -> Self {
		self.set_native_fee(native_fee);
		self
	}

	pub fn set_fee_bps(&self, fee_bps: u16) {
		*self.fee_bps.lock() = fee_bps;
	}

	pub fn set_native_fee(&self, native_fee: U256) {
		*self.native_fee.lock() = native_fee;
	}

	fn receipt(&self, amount: U256) -> OftReceipt {
		OftReceipt {
			amount_sent_ld: amount,
			amount_received_ld: after_fee(amount, *self.fee_bps.lock()),
		}
	}
}

impl OftEndpoint for SimulatedStargatePool {
	fn address(&self) -> Address {
		self.address
	}

	fn token(&self) -> Address {
		self.token
	}

	fn approval_required(&self) -> bool {
		true
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
		call: ExternalCall<'_>,
		send_param: &SendParam,
		fee: &MessagingFee,
		refund_address: Address,
	) -> AdapterResult<(MessagingReceipt, OftReceipt)> {
		let (receipt, oft_receipt, _) = self.send_token(call, send_param, fee, refund_address)?;
		Ok((receipt, oft_receipt))
	}
}

impl StargatePool for SimulatedStargatePool {
	fn send_token(
		&self,
		mut call: ExternalCall<'_>,
		send_param: &SendParam,
		fee: &MessagingFee,
		refund_address: Address,
	) -> AdapterResult<(MessagingReceipt, OftReceipt, Option<Ticket>)> {
		if send_param.amount_ld.is_zero() {
			return Err(AdapterError::protocol(self.address, "amount must be nonzero"));
		}
		let required = *self.native_fee.lock();
		if fee.native_fee < required || call.value() < fee.native_fee {
			return Err(AdapterError::protocol(self.address, "insufficient messaging fee"));
		}
		let receipt = self.receipt(send_param.amount_ld);
		if receipt.amount_received_ld < send_param.min_amount_ld {
			return Err(AdapterError::protocol(self.address, "slippage too high"));
		}

		call.pull(self.token, send_param.amount_ld)?;
		let excess = call.value() - fee.native_fee;
		if !excess.is_zero() {
			call.refund_native(refund_address, excess)?;
		}

		let mut state = self.state.lock();
		state.nonce += 1;
		let guid = message_id(self.address, state.nonce);

		let ticket = if send_param.oft_cmd.is_empty() {
			None
		} else {
			let ticket_id = state.next_ticket;
			state.next_ticket += 1;
			call.emit(Event::BusRode {
				destination_endpoint_id: send_param.dst_eid,
				ticket_id,
			});
			Some(Ticket {
				ticket_id,
				passenger_bytes: Bytes::copy_from_slice(send_param.to.as_slice()),
			})
		};

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
			nonce: state.nonce,
			fee: *fee,
		};
		Ok((messaging, receipt, ticket))
	}
}
