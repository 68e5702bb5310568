//! In-memory asset ledger

use std::collections::{HashMap, HashSet};
use topup_types::{Address, Ledger, Log, U256};

/// HashMap-backed ledger; zero balances and allowances are not stored
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
	balances: HashMap<(Address, Address), U256>,
	native_balances: HashMap<Address, U256>,
	allowances: HashMap<(Address, Address, Address), U256>,
	code: HashSet<Address>,
	logs: Vec<Log>,
}

impl MemoryLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every log emitted so far, oldest first
	pub fn logs(&self) -> &[Log] {
		&self.logs
	}

	/// Logs emitted by one account
	pub fn logs_from(&self, emitter: Address) -> impl Iterator<Item = &Log> {
		self.logs.iter().filter(move |log| log.emitter == emitter)
	}

	/// Sum of all balances of `token`
	pub fn total_supply(&self, token: Address) -> U256 {
		self.balances
			.iter()
			.filter(|((t, _), _)| *t == token)
			.fold(U256::ZERO, |total, (_, amount)| total.saturating_add(*amount))
	}
}

impl Ledger for MemoryLedger {
	fn balance_of(&self, token: Address, holder: Address) -> U256 {
		self.balances
			.get(&(token, holder))
			.copied()
			.unwrap_or_default()
	}

	fn native_balance_of(&self, holder: Address) -> U256 {
		self.native_balances.get(&holder).copied().unwrap_or_default()
	}

	fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
		self.allowances
			.get(&(token, owner, spender))
			.copied()
			.unwrap_or_default()
	}

	fn has_code(&self, account: Address) -> bool {
		self.code.contains(&account)
	}

	fn set_balance(&mut self, token: Address, holder: Address, amount: U256) {
		if amount.is_zero() {
			self.balances.remove(&(token, holder));
		} else {
			self.balances.insert((token, holder), amount);
		}
	}

	fn set_native_balance(&mut self, holder: Address, amount: U256) {
		if amount.is_zero() {
			self.native_balances.remove(&holder);
		} else {
			self.native_balances.insert(holder, amount);
		}
	}

	fn set_allowance(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
		if amount.is_zero() {
			self.allowances.remove(&(token, owner, spender));
		} else {
			self.allowances.insert((token, owner, spender), amount);
		}
	}

	fn set_code(&mut self, account: Address) {
		self.code.insert(account);
	}

	fn emit(&mut self, log: Log) {
		self.logs.push(log);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use topup_types::{Event, LedgerError};

	fn addr(byte: u8) -> Address {
		Address::repeat_byte(byte)
	}

	#[test]
	fn test_transfer_moves_balance() {
		let mut ledger = MemoryLedger::new();
		let token = addr(0xAA);
		ledger.credit(token, addr(1), U256::from(100)).unwrap();

		ledger.transfer(token, addr(1), addr(2), U256::from(40)).unwrap();

		assert_eq!(ledger.balance_of(token, addr(1)), U256::from(60));
		assert_eq!(ledger.balance_of(token, addr(2)), U256::from(40));
		assert_eq!(ledger.total_supply(token), U256::from(100));
	}

	#[test]
	fn test_transfer_insufficient_balance() {
		let mut ledger = MemoryLedger::new();
		let token = addr(0xAA);
		ledger.credit(token, addr(1), U256::from(10)).unwrap();

		let err = ledger
			.transfer(token, addr(1), addr(2), U256::from(11))
			.unwrap_err();

		assert_eq!(
			err,
			LedgerError::InsufficientBalance {
				token,
				holder: addr(1),
				available: U256::from(10),
				required: U256::from(11),
			}
		);
		assert_eq!(ledger.balance_of(token, addr(1)), U256::from(10));
	}

	#[test]
	fn test_transfer_from_spends_allowance() {
		let mut ledger = MemoryLedger::new();
		let token = addr(0xAA);
		ledger.credit(token, addr(1), U256::from(100)).unwrap();
		ledger.approve(token, addr(1), addr(3), U256::from(70));

		ledger
			.transfer_from(token, addr(3), addr(1), addr(3), U256::from(50))
			.unwrap();
		assert_eq!(ledger.allowance(token, addr(1), addr(3)), U256::from(20));

		let err = ledger
			.transfer_from(token, addr(3), addr(1), addr(3), U256::from(21))
			.unwrap_err();
		assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
	}

	#[test]
	fn test_unlimited_allowance_is_not_decreased() {
		let mut ledger = MemoryLedger::new();
		let token = addr(0xAA);
		ledger.credit(token, addr(1), U256::from(100)).unwrap();
		ledger.approve(token, addr(1), addr(3), U256::MAX);

		ledger
			.transfer_from(token, addr(3), addr(1), addr(3), U256::from(100))
			.unwrap();
		assert_eq!(ledger.allowance(token, addr(1), addr(3)), U256::MAX);
	}

	#[test]
	fn test_wrap_native() {
		let mut ledger = MemoryLedger::new();
		let weth = addr(0x42);
		ledger.credit_native(addr(1), U256::from(5)).unwrap();

		ledger.wrap_native(weth, addr(1), U256::from(3)).unwrap();

		assert_eq!(ledger.native_balance_of(addr(1)), U256::from(2));
		assert_eq!(ledger.native_balance_of(weth), U256::from(3));
		assert_eq!(ledger.balance_of(weth, addr(1)), U256::from(3));
	}

	#[test]
	fn test_credit_overflow() {
		let mut ledger = MemoryLedger::new();
		let token = addr(0xAA);
		ledger.credit(token, addr(1), U256::MAX).unwrap();

		let err = ledger.credit(token, addr(1), U256::from(1)).unwrap_err();
		assert_eq!(err, LedgerError::Overflow { holder: addr(1) });
	}

	#[test]
	fn test_logs_filtered_by_emitter() {
		let mut ledger = MemoryLedger::new();
		ledger.emit(Log {
			emitter: addr(1),
			event: Event::Paused { account: addr(9) },
		});
		ledger.emit(Log {
			emitter: addr(2),
			event: Event::Unpaused { account: addr(9) },
		});

		assert_eq!(ledger.logs().len(), 2);
		assert_eq!(ledger.logs_from(addr(2)).count(), 1);
	}
}
