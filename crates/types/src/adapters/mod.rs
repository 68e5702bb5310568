//! Bridge adapter domain model

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterRegistryError};
pub use traits::BridgeAdapter;

use crate::primitives::{deduct_slippage, Address, U256, NATIVE_ASSET};
use crate::routes::{AdapterKind, BridgeParams, TokenRoute};
use serde::{Deserialize, Serialize};

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Descriptive information about a registered adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
	/// Stable identifier, e.g. `cctp-v2`
	pub adapter_id: String,
	/// Address routes bind to
	pub address: Address,
	pub kind: AdapterKind,
	pub name: String,
	pub version: String,
}

impl AdapterInfo {
	pub fn new(
		adapter_id: impl Into<String>,
		address: Address,
		kind: AdapterKind,
		name: impl Into<String>,
	) -> Self {
		Self {
			adapter_id: adapter_id.into(),
			address,
			kind,
			name: name.into(),
			version: "1.0.0".to_string(),
		}
	}

	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();
		self
	}
}

/// What the factory asks an adapter to move
#[derive(Debug, Clone, Copy)]
pub struct BridgeRequest<'a> {
	pub token: Address,
	pub amount: U256,
	/// Recipient on the destination chain
	pub recipient: Address,
	pub max_slippage_bps: u16,
	pub params: &'a BridgeParams,
}

impl<'a> BridgeRequest<'a> {
	pub fn for_route(token: Address, amount: U256, route: &'a TokenRoute) -> Self {
		Self {
			token,
			amount,
			recipient: route.recipient,
			max_slippage_bps: route.max_slippage_bps,
			params: &route.additional_data,
		}
	}

	/// Minimum acceptable receipt under the route's slippage ceiling
	pub fn min_amount(&self) -> U256 {
		deduct_slippage(self.amount, self.max_slippage_bps)
	}
}

/// Fee quoted for a bridge, always denominated in the native asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeFee {
	pub fee_token: Address,
	pub fee_amount: U256,
}

impl BridgeFee {
	pub fn native(fee_amount: U256) -> Self {
		Self {
			fee_token: NATIVE_ASSET,
			fee_amount,
		}
	}

	pub fn free() -> Self {
		Self::native(U256::ZERO)
	}
}

/// Outcome of a successful bridge call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeReceipt {
	pub kind: AdapterKind,
	pub token: Address,
	/// Amount that left the factory
	pub amount_sent: U256,
	/// Lower bound guaranteed on the destination side
	pub min_amount_received: U256,
	pub native_fee: U256,
}
