//! Simulated protocol endpoints
//!
//! In-process stand-ins for the external bridge protocols. They apply the
//! same checks the real contracts apply at the adapter boundary, move funds
//! through the ledger and emit the protocol's own logs. Local nodes wire them
//! from configuration; tests tune their quotes through the setters.

mod gateway_router;
mod ntt_manager;
mod oft;
mod stargate_pool;
mod teller;
mod token_messenger;

pub use gateway_router::{SimulatedGatewayRouter, Withdrawal};
pub use ntt_manager::{OutboundTransfer, SimulatedNttManager};
pub use oft::SimulatedOft;
pub use stargate_pool::SimulatedStargatePool;
pub use teller::{BridgedShares, SimulatedTeller};
pub use token_messenger::{BurnMessage, SimulatedTokenMessenger};

use topup_types::{keccak256, Address, B256, U256, BPS_DENOMINATOR};

/// Message id derived from the endpoint and its outbound nonce
pub(crate) fn message_id(endpoint: Address, nonce: u64) -> B256 {
	let mut preimage = Vec::with_capacity(28);
	preimage.extend_from_slice(endpoint.as_slice());
	preimage.extend_from_slice(&nonce.to_be_bytes());
	keccak256(preimage)
}

/// `amount` minus a `fee_bps` cut
pub(crate) fn after_fee(amount: U256, fee_bps: u16) -> U256 {
	amount - amount * U256::from(fee_bps.min(BPS_DENOMINATOR)) / U256::from(BPS_DENOMINATOR)
}
