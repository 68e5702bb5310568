use crate::protocols::GatewayRouter;
use parking_lot::Mutex;
use std::collections::HashMap;
use topup_types::{AdapterError, AdapterResult, Address, Event, ExternalCall, U256};

/// A withdrawal queued for the parent chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
	pub gateway: Address,
	pub token: Address,
	pub from: Address,
	pub to: Address,
	pub amount: U256,
	pub gas_limit: u64,
}

/// Gateway router; tokens are burned by their gateway on withdrawal
#[derive(Debug)]
pub struct SimulatedGatewayRouter {
	address: Address,
	gateways: HashMap<Address, Address>,
	base_fee: U256,
	fee_per_gas: U256,
	withdrawals: Mutex<Vec<Withdrawal>>,
}

impl SimulatedGatewayRouter {
	pub fn new(address: Address) -> Self {
		Self {
			address,
			gateways: HashMap::new(),
			base_fee: U256::ZERO,
			fee_per_gas: U256::ZERO,
			withdrawals: Mutex::new(Vec::new()),
		}
	}

	pub fn with_gateway(mut self, token: Address, gateway: Address) -> Self {
		self.gateways.insert(token, gateway);
		self
	}

	pub fn with_fees(mut self, base_fee: U256, fee_per_gas: U256) -> Self {
		self.base_fee = base_fee;
		self.fee_per_gas = fee_per_gas;
		self
	}

	pub fn withdrawals(&self) -> Vec<Withdrawal> {
		self.withdrawals.lock().clone()
	}
}

impl GatewayRouter for SimulatedGatewayRouter {
	fn address(&self) -> Address {
		self.address
	}

	fn erc20_gateway(&self, token: Address) -> Option<Address> {
		self.gateways.get(&token).copied()
	}

	fn estimate_message_fee(&self, gas_limit: u64) -> U256 {
		self.base_fee
			.saturating_add(self.fee_per_gas.saturating_mul(U256::from(gas_limit)))
	}

	fn withdraw_erc20(
		&self,
		mut call: ExternalCall<'_>,
		token: Address,
		to: Address,
		amount: U256,
		gas_limit: u64,
	) -> AdapterResult<()> {
		let gateway = self
			.erc20_gateway(token)
			.ok_or_else(|| AdapterError::protocol(self.address, "no gateway for token"))?;
		if call.target() != gateway {
			return Err(AdapterError::protocol(self.address, "call must target the token gateway"));
		}
		if call.value() < self.estimate_message_fee(gas_limit) {
			return Err(AdapterError::protocol(self.address, "insufficient value for message fee"));
		}
		if amount.is_zero() || to == Address::ZERO {
			return Err(AdapterError::protocol(self.address, "invalid withdrawal"));
		}

		call.pull(token, amount)?;
		call.burn(token, amount)?;

		let from = call.sender();
		call.emit(Event::WithdrawalInitiated {
			token,
			from,
			to,
			amount,
			gas_limit,
		});
		self.withdrawals.lock().push(Withdrawal {
			gateway,
			token,
			from,
			to,
			amount,
			gas_limit,
		});
		Ok(())
	}
}
