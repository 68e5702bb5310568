//! Per-token routing table

use std::collections::HashMap;
use topup_types::{Address, TokenRoute};

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: HashMap<Address, TokenRoute>,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, token: Address) -> Option<&TokenRoute> {
		self.routes.get(&token)
	}

	/// Route for `token` if it points at an adapter
	pub fn configured(&self, token: Address) -> Option<&TokenRoute> {
		self.routes.get(&token).filter(|route| route.is_configured())
	}

	pub fn is_configured(&self, token: Address) -> bool {
		self.configured(token).is_some()
	}

	/// Overwrite the route of `token`, returning the previous one
	pub fn insert(&mut self, token: Address, route: TokenRoute) -> Option<TokenRoute> {
		self.routes.insert(token, route)
	}

	pub fn tokens(&self) -> impl Iterator<Item = &Address> {
		self.routes.keys()
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
