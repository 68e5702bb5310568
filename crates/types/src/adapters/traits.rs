//! Core adapter trait

use super::{AdapterInfo, AdapterResult, BridgeFee, BridgeReceipt, BridgeRequest};
use crate::context::FactoryContext;
use crate::primitives::Address;
use crate::routes::AdapterKind;
use std::fmt::Debug;

/// Core trait for bridge adapter implementations
///
/// An adapter wraps one external bridge protocol. It holds only immutable
/// wiring to the protocol's endpoints and executes inside the factory's
/// context, spending the factory's balances and attached value.
pub trait BridgeAdapter: Send + Sync + Debug {
	/// Get adapter information
	/// This is the only required accessor - others have default implementations
	fn adapter_info(&self) -> &AdapterInfo;

	/// Address routes use to select this adapter
	fn address(&self) -> Address {
		self.adapter_info().address
	}

	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	fn kind(&self) -> AdapterKind {
		self.adapter_info().kind
	}

	/// Price moving `request.amount` without touching any state
	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee>;

	/// Move `request.amount` of the factory's balance to the destination chain
	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt>;
}
