//! Per-token routing data
//!
//! A [`TokenRoute`] binds one supported token to the bridge adapter that moves
//! it, the recipient on the destination chain, the slippage ceiling and the
//! adapter-specific [`BridgeParams`].

pub mod params;

pub use params::{
	AdapterKind, BridgeParams, CctpParams, NttParams, OftParams, RollupWithdrawalParams,
	StargateMode, StargateParams, TellerParams,
};

use crate::primitives::{Address, MAX_SLIPPAGE_BPS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Routing entry for one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRoute {
	/// Address of the adapter that bridges this token
	pub bridge_adapter: Address,
	/// Recipient on the destination chain
	pub recipient: Address,
	/// Maximum tolerated shortfall in basis points
	pub max_slippage_bps: u16,
	/// Protocol parameters interpreted only by the adapter
	pub additional_data: BridgeParams,
}

/// Reasons a route is rejected before it is stored
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteValidationError {
	#[error("Bridge adapter cannot be the zero address")]
	ZeroAdapter,

	#[error("Recipient cannot be the zero address")]
	ZeroRecipient,

	#[error("Slippage of {slippage_bps} bps exceeds the maximum of {max_bps} bps")]
	SlippageTooHigh { slippage_bps: u16, max_bps: u16 },
}

impl TokenRoute {
	pub fn new(
		bridge_adapter: Address,
		recipient: Address,
		max_slippage_bps: u16,
		additional_data: BridgeParams,
	) -> Self {
		Self {
			bridge_adapter,
			recipient,
			max_slippage_bps,
			additional_data,
		}
	}

	/// A route is configured once it points at an adapter
	pub fn is_configured(&self) -> bool {
		self.bridge_adapter != Address::ZERO
	}

	/// Check the invariants every stored route must satisfy
	pub fn validate(&self) -> Result<(), RouteValidationError> {
		if self.bridge_adapter == Address::ZERO {
			return Err(RouteValidationError::ZeroAdapter);
		}
		if self.recipient == Address::ZERO {
			return Err(RouteValidationError::ZeroRecipient);
		}
		if self.max_slippage_bps > MAX_SLIPPAGE_BPS {
			return Err(RouteValidationError::SlippageTooHigh {
				slippage_bps: self.max_slippage_bps,
				max_bps: MAX_SLIPPAGE_BPS,
			});
		}
		Ok(())
	}

	pub fn kind(&self) -> AdapterKind {
		self.additional_data.kind()
	}
}
