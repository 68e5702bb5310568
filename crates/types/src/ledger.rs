//! Asset ledger abstraction
//!
//! The ledger holds fungible-token balances and allowances, native balances,
//! deployed-code markers and the append-only log. Implementations only supply
//! raw getters and setters; the transfer rules live in the provided methods so
//! every backend enforces them the same way.

use crate::events::Log;
use crate::primitives::{Address, U256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
	#[error("Insufficient balance of {token} for {holder}: available {available}, required {required}")]
	InsufficientBalance {
		token: Address,
		holder: Address,
		available: U256,
		required: U256,
	},

	#[error("Insufficient allowance of {token} from {owner} to {spender}: available {available}, required {required}")]
	InsufficientAllowance {
		token: Address,
		owner: Address,
		spender: Address,
		available: U256,
		required: U256,
	},

	#[error("Insufficient native balance for {holder}: available {available}, required {required}")]
	InsufficientNativeBalance {
		holder: Address,
		available: U256,
		required: U256,
	},

	#[error("Balance overflow for {holder}")]
	Overflow { holder: Address },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

pub trait Ledger {
	fn balance_of(&self, token: Address, holder: Address) -> U256;

	fn native_balance_of(&self, holder: Address) -> U256;

	fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256;

	fn has_code(&self, account: Address) -> bool;

	fn set_balance(&mut self, token: Address, holder: Address, amount: U256);

	fn set_native_balance(&mut self, holder: Address, amount: U256);

	fn set_allowance(&mut self, token: Address, owner: Address, spender: Address, amount: U256);

	fn set_code(&mut self, account: Address);

	fn emit(&mut self, log: Log);

	/// Increase a token balance (minting when not paired with a debit)
	fn credit(&mut self, token: Address, holder: Address, amount: U256) -> LedgerResult<()> {
		let balance = self
			.balance_of(token, holder)
			.checked_add(amount)
			.ok_or(LedgerError::Overflow { holder })?;
		self.set_balance(token, holder, balance);
		Ok(())
	}

	/// Decrease a token balance (burning when not paired with a credit)
	fn debit(&mut self, token: Address, holder: Address, amount: U256) -> LedgerResult<()> {
		let available = self.balance_of(token, holder);
		let balance = available
			.checked_sub(amount)
			.ok_or(LedgerError::InsufficientBalance {
				token,
				holder,
				available,
				required: amount,
			})?;
		self.set_balance(token, holder, balance);
		Ok(())
	}

	fn transfer(
		&mut self,
		token: Address,
		from: Address,
		to: Address,
		amount: U256,
	) -> LedgerResult<()> {
		self.debit(token, from, amount)?;
		self.credit(token, to, amount)
	}

	fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
		self.set_allowance(token, owner, spender, amount);
	}

	/// Spend `spender`'s allowance over `from`. An allowance of `U256::MAX` is never decreased.
	fn transfer_from(
		&mut self,
		token: Address,
		spender: Address,
		from: Address,
		to: Address,
		amount: U256,
	) -> LedgerResult<()> {
		let available = self.allowance(token, from, spender);
		if available < amount {
			return Err(LedgerError::InsufficientAllowance {
				token,
				owner: from,
				spender,
				available,
				required: amount,
			});
		}
		if available != U256::MAX {
			self.set_allowance(token, from, spender, available - amount);
		}
		self.transfer(token, from, to, amount)
	}

	fn credit_native(&mut self, holder: Address, amount: U256) -> LedgerResult<()> {
		let balance = self
			.native_balance_of(holder)
			.checked_add(amount)
			.ok_or(LedgerError::Overflow { holder })?;
		self.set_native_balance(holder, balance);
		Ok(())
	}

	fn debit_native(&mut self, holder: Address, amount: U256) -> LedgerResult<()> {
		let available = self.native_balance_of(holder);
		let balance = available
			.checked_sub(amount)
			.ok_or(LedgerError::InsufficientNativeBalance {
				holder,
				available,
				required: amount,
			})?;
		self.set_native_balance(holder, balance);
		Ok(())
	}

	fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> LedgerResult<()> {
		if amount.is_zero() {
			return Ok(());
		}
		self.debit_native(from, amount)?;
		self.credit_native(to, amount)
	}

	/// Deposit `holder`'s native value into the wrapped-native contract
	fn wrap_native(&mut self, wrapped_native: Address, holder: Address, amount: U256) -> LedgerResult<()> {
		self.transfer_native(holder, wrapped_native, amount)?;
		self.credit(wrapped_native, holder, amount)
	}
}
