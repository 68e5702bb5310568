//! Execution context handed to bridge adapters
//!
//! Adapters run as if they were the factory's own code: every balance they
//! read, every approval they grant and every event they emit belongs to the
//! factory. External protocol endpoints are reached through [`ExternalCall`],
//! which represents the factory calling the endpoint with attached value.

use crate::events::{Event, Log};
use crate::ledger::{Ledger, LedgerResult};
use crate::primitives::{Address, U256};

pub struct FactoryContext<'a> {
	factory: Address,
	attached_value: U256,
	ledger: &'a mut dyn Ledger,
}

impl<'a> FactoryContext<'a> {
	pub fn new(factory: Address, attached_value: U256, ledger: &'a mut dyn Ledger) -> Self {
		Self {
			factory,
			attached_value,
			ledger,
		}
	}

	/// Address the adapter acts as
	pub fn factory(&self) -> Address {
		self.factory
	}

	/// Native value attached by the original caller
	pub fn attached_value(&self) -> U256 {
		self.attached_value
	}

	pub fn balance_of(&self, token: Address) -> U256 {
		self.ledger.balance_of(token, self.factory)
	}

	pub fn native_balance(&self) -> U256 {
		self.ledger.native_balance_of(self.factory)
	}

	pub fn allowance(&self, token: Address, spender: Address) -> U256 {
		self.ledger.allowance(token, self.factory, spender)
	}

	pub fn approve(&mut self, token: Address, spender: Address, amount: U256) {
		self.ledger.approve(token, self.factory, spender, amount);
	}

	pub fn transfer(&mut self, token: Address, to: Address, amount: U256) -> LedgerResult<()> {
		self.ledger.transfer(token, self.factory, to, amount)
	}

	pub fn emit(&mut self, event: Event) {
		self.ledger.emit(Log {
			emitter: self.factory,
			event,
		});
	}

	/// Call an external endpoint, forwarding `value` from the factory's native balance
	pub fn call(&mut self, target: Address, value: U256) -> LedgerResult<ExternalCall<'_>> {
		self.ledger.transfer_native(self.factory, target, value)?;
		Ok(ExternalCall {
			sender: self.factory,
			target,
			value,
			ledger: &mut *self.ledger,
		})
	}
}

/// An in-flight call from the factory into an external protocol endpoint
pub struct ExternalCall<'a> {
	sender: Address,
	target: Address,
	value: U256,
	ledger: &'a mut dyn Ledger,
}

impl ExternalCall<'_> {
	pub fn sender(&self) -> Address {
		self.sender
	}

	pub fn target(&self) -> Address {
		self.target
	}

	/// Native value forwarded with the call
	pub fn value(&self) -> U256 {
		self.value
	}

	/// Balance held by the endpoint
	pub fn balance_of(&self, token: Address) -> U256 {
		self.ledger.balance_of(token, self.target)
	}

	/// Pull tokens the sender approved to the endpoint
	pub fn pull(&mut self, token: Address, amount: U256) -> LedgerResult<()> {
		self.ledger
			.transfer_from(token, self.target, self.sender, self.target, amount)
	}

	/// Burn tokens held by the endpoint
	pub fn burn(&mut self, token: Address, amount: U256) -> LedgerResult<()> {
		self.ledger.debit(token, self.target, amount)
	}

	/// Burn directly from the sender; only valid when the endpoint is the token itself
	pub fn burn_from_sender(&mut self, amount: U256) -> LedgerResult<()> {
		self.ledger.debit(self.target, self.sender, amount)
	}

	/// Return native value to `to`
	pub fn refund_native(&mut self, to: Address, amount: U256) -> LedgerResult<()> {
		self.ledger.transfer_native(self.target, to, amount)
	}

	pub fn emit(&mut self, event: Event) {
		self.ledger.emit(Log {
			emitter: self.target,
			event,
		});
	}
}
