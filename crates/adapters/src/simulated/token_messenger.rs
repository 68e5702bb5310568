use crate::protocols::{DepositForBurn, TokenMessenger};
use parking_lot::Mutex;
use std::collections::HashSet;
use topup_types::{AdapterError, AdapterResult, Address, Event, ExternalCall, B256};
use tracing::debug;

/// A burn accepted by the messenger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnMessage {
	pub nonce: u64,
	pub depositor: Address,
	pub request: DepositForBurn,
}

#[derive(Debug)]
pub struct SimulatedTokenMessenger {
	address: Address,
	burn_tokens: Mutex<HashSet<Address>>,
	messages: Mutex<Vec<BurnMessage>>,
}

impl SimulatedTokenMessenger {
	pub fn new(address: Address) -> Self {
		Self {
			address,
			burn_tokens: Mutex::new(HashSet::new()),
			messages: Mutex::new(Vec::new()),
		}
	}

	pub fn with_burn_token(self, token: Address) -> Self {
		self.add_burn_token(token);
		self
	}

	pub fn add_burn_token(&self, token: Address) {
		self.burn_tokens.lock().insert(token);
	}

	pub fn messages(&self) -> Vec<BurnMessage> {
		self.messages.lock().clone()
	}
}

impl TokenMessenger for SimulatedTokenMessenger {
	fn address(&self) -> Address {
		self.address
	}

	fn is_supported_burn_token(&self, token: Address) -> bool {
		self.burn_tokens.lock().contains(&token)
	}

	fn deposit_for_burn(
		&self,
		mut call: ExternalCall<'_>,
		request: &DepositForBurn,
	) -> AdapterResult<u64> {
		if !self.is_supported_burn_token(request.burn_token) {
			return Err(AdapterError::protocol(self.address, "burn token not supported"));
		}
		if request.amount.is_zero() {
			return Err(AdapterError::protocol(self.address, "amount must be nonzero"));
		}
		if request.mint_recipient == B256::ZERO {
			return Err(AdapterError::protocol(self.address, "mint recipient must be nonzero"));
		}
		if request.max_fee >= request.amount {
			return Err(AdapterError::protocol(self.address, "max fee must be less than amount"));
		}

		call.pull(request.burn_token, request.amount)?;
		call.burn(request.burn_token, request.amount)?;

		let mut messages = self.messages.lock();
		let nonce = messages.len() as u64;
		let depositor = call.sender();
		call.emit(Event::DepositForBurn {
			nonce,
			burn_token: request.burn_token,
			amount: request.amount,
			depositor,
			mint_recipient: request.mint_recipient,
			destination_domain: request.destination_domain,
			max_fee: request.max_fee,
			min_finality_threshold: request.min_finality_threshold,
		});
		messages.push(BurnMessage {
			nonce,
			depositor,
			request: request.clone(),
		});

		debug!("Messenger {} burned {} (nonce {})", self.address, request.amount, nonce);
		Ok(nonce)
	}
}
