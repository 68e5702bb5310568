//! Append-only, order-preserving registry of deployed instances

use std::collections::HashMap;
use topup_types::Address;

#[derive(Debug, Clone)]
pub struct InstanceRegistry<T> {
	order: Vec<Address>,
	entries: HashMap<Address, T>,
}

impl<T> Default for InstanceRegistry<T> {
	fn default() -> Self {
		Self {
			order: Vec::new(),
			entries: HashMap::new(),
		}
	}
}

impl<T> InstanceRegistry<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a new instance; returns false and keeps the existing entry on duplicates
	pub fn insert(&mut self, address: Address, instance: T) -> bool {
		if self.entries.contains_key(&address) {
			return false;
		}
		self.order.push(address);
		self.entries.insert(address, instance);
		true
	}

	pub fn contains(&self, address: Address) -> bool {
		self.entries.contains_key(&address)
	}

	pub fn get(&self, address: Address) -> Option<&T> {
		self.entries.get(&address)
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Addresses in `[start, start + n)`, clamped to the registry length
	pub fn page(&self, start: usize, n: usize) -> &[Address] {
		let len = self.order.len();
		let start = start.min(len);
		let end = start.saturating_add(n).min(len);
		&self.order[start..end]
	}

	/// Instances in the same window as [`InstanceRegistry::page`]
	pub fn window(&self, start: usize, n: usize) -> impl Iterator<Item = &T> {
		self.page(start, n)
			.iter()
			.filter_map(|address| self.entries.get(address))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn registry(count: u8) -> InstanceRegistry<u8> {
		let mut registry = InstanceRegistry::new();
		for i in 0..count {
			assert!(registry.insert(Address::repeat_byte(i + 1), i));
		}
		registry
	}

	#[test]
	fn test_preserves_insertion_order() {
		let registry = registry(3);
		assert_eq!(
			registry.page(0, 10),
			&[
				Address::repeat_byte(1),
				Address::repeat_byte(2),
				Address::repeat_byte(3)
			]
		);
	}

	#[test]
	fn test_duplicate_insert_is_rejected() {
		let mut registry = registry(2);
		assert!(!registry.insert(Address::repeat_byte(1), 42));
		assert_eq!(registry.len(), 2);
		assert_eq!(registry.get(Address::repeat_byte(1)), Some(&0));
	}

	#[test]
	fn test_page_clamps() {
		let registry = registry(5);
		assert_eq!(registry.page(1, 2).len(), 2);
		assert_eq!(registry.page(3, 10).len(), 2);
		assert!(registry.page(5, 1).is_empty());
		assert!(registry.page(100, 1).is_empty());
		assert_eq!(registry.page(2, usize::MAX).len(), 3);
		assert!(registry.page(0, 0).is_empty());
	}

	#[test]
	fn test_window_yields_entries() {
		let registry = registry(4);
		let values: Vec<u8> = registry.window(1, 2).copied().collect();
		assert_eq!(values, vec![1, 2]);
	}
}
