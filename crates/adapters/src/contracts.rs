//! Directory of external protocol endpoints
//!
//! Adapters only talk to endpoints they were wired with at construction.
//! A route naming an address outside the adapter's directory is rejected with
//! the adapter's protocol-specific error.

use std::collections::HashMap;
use std::sync::Arc;
use topup_types::Address;

#[derive(Debug)]
pub struct Contracts<T: ?Sized> {
	entries: HashMap<Address, Arc<T>>,
}

impl<T: ?Sized> Default for Contracts<T> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<T: ?Sized> Clone for Contracts<T> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
		}
	}
}

impl<T: ?Sized> Contracts<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert
	pub fn with(mut self, address: Address, contract: Arc<T>) -> Self {
		self.insert(address, contract);
		self
	}

	pub fn insert(&mut self, address: Address, contract: Arc<T>) {
		self.entries.insert(address, contract);
	}

	pub fn get(&self, address: Address) -> Option<&Arc<T>> {
		self.entries.get(&address)
	}

	pub fn addresses(&self) -> impl Iterator<Item = &Address> {
		self.entries.keys()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
