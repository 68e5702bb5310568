use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use topup_service::BridgeNode;
use topup_types::Address;

/// Application state shared across handlers
///
/// Every call locks the node, so node operations never interleave.
#[derive(Clone)]
pub struct AppState {
	pub node: Arc<Mutex<BridgeNode>>,
	/// API key to the account it acts as
	pub api_keys: Arc<HashMap<String, Address>>,
}

impl AppState {
	pub fn new(node: BridgeNode, api_keys: HashMap<String, Address>) -> Self {
		Self {
			node: Arc::new(Mutex::new(node)),
			api_keys: Arc::new(api_keys),
		}
	}

	/// Account for an API key; unknown keys act as the zero address
	pub fn account_for(&self, key: Option<&str>) -> Address {
		key.and_then(|k| self.api_keys.get(k).copied())
			.unwrap_or(Address::ZERO)
	}
}
