//! Transaction journal over a ledger
//!
//! [`LedgerTx`] buffers every write in an overlay. Reads fall through to the
//! base ledger for keys the transaction has not touched. Nothing reaches the
//! base until [`LedgerTx::commit`]; dropping the transaction discards the
//! overlay, balances and logs alike.

use std::collections::{HashMap, HashSet};
use topup_types::{Address, Ledger, Log, U256};
use tracing::debug;

pub struct LedgerTx<'a> {
	base: &'a mut dyn Ledger,
	balances: HashMap<(Address, Address), U256>,
	native_balances: HashMap<Address, U256>,
	allowances: HashMap<(Address, Address, Address), U256>,
	code: HashSet<Address>,
	logs: Vec<Log>,
}

impl<'a> LedgerTx<'a> {
	pub fn new(base: &'a mut dyn Ledger) -> Self {
		Self {
			base,
			balances: HashMap::new(),
			native_balances: HashMap::new(),
			allowances: HashMap::new(),
			code: HashSet::new(),
			logs: Vec::new(),
		}
	}

	/// Logs emitted inside this transaction and not yet committed
	pub fn pending_logs(&self) -> &[Log] {
		&self.logs
	}

	/// Apply every buffered write to the base ledger
	pub fn commit(self) {
		let LedgerTx {
			base,
			balances,
			native_balances,
			allowances,
			code,
			logs,
		} = self;

		debug!(
			"Committing ledger transaction: {} balances, {} native, {} allowances, {} logs",
			balances.len(),
			native_balances.len(),
			allowances.len(),
			logs.len()
		);

		for ((token, holder), amount) in balances {
			base.set_balance(token, holder, amount);
		}
		for (holder, amount) in native_balances {
			base.set_native_balance(holder, amount);
		}
		for ((token, owner, spender), amount) in allowances {
			base.set_allowance(token, owner, spender, amount);
		}
		for account in code {
			base.set_code(account);
		}
		for log in logs {
			base.emit(log);
		}
	}
}

impl Ledger for LedgerTx<'_> {
	fn balance_of(&self, token: Address, holder: Address) -> U256 {
		match self.balances.get(&(token, holder)) {
			Some(amount) => *amount,
			None => self.base.balance_of(token, holder),
		}
	}

	fn native_balance_of(&self, holder: Address) -> U256 {
		match self.native_balances.get(&holder) {
			Some(amount) => *amount,
			None => self.base.native_balance_of(holder),
		}
	}

	fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
		match self.allowances.get(&(token, owner, spender)) {
			Some(amount) => *amount,
			None => self.base.allowance(token, owner, spender),
		}
	}

	fn has_code(&self, account: Address) -> bool {
		self.code.contains(&account) || self.base.has_code(account)
	}

	fn set_balance(&mut self, token: Address, holder: Address, amount: U256) {
		self.balances.insert((token, holder), amount);
	}

	fn set_native_balance(&mut self, holder: Address, amount: U256) {
		self.native_balances.insert(holder, amount);
	}

	fn set_allowance(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
		self.allowances.insert((token, owner, spender), amount);
	}

	fn set_code(&mut self, account: Address) {
		self.code.insert(account);
	}

	fn emit(&mut self, log: Log) {
		self.logs.push(log);
	}
}
