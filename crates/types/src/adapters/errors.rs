//! Error types for adapter operations

use crate::ledger::LedgerError;
use crate::primitives::{Address, U256};
use crate::routes::AdapterKind;
use thiserror::Error;

/// Bridge adapter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
	#[error("Invalid params: {adapter} adapter received {found} parameters")]
	InvalidParams {
		adapter: AdapterKind,
		found: AdapterKind,
	},

	#[error("Insufficient min amount: minimum {min_amount}, would receive {amount_received}")]
	InsufficientMinAmount {
		min_amount: U256,
		amount_received: U256,
	},

	#[error("Insufficient native fee: required {required}, provided {provided}")]
	InsufficientNativeFee { required: U256, provided: U256 },

	#[error("Invalid token messenger: {messenger}")]
	InvalidTokenMessenger { messenger: Address },

	#[error("Token {token} is not a supported burn token of {messenger}")]
	UnsupportedBurnToken { messenger: Address, token: Address },

	#[error("Max fee {max_fee} must be below the bridged amount {amount}")]
	InvalidMaxFee { max_fee: U256, amount: U256 },

	#[error("Invalid Stargate pool {pool} for token {token}")]
	InvalidStargatePool { pool: Address, token: Address },

	#[error("Invalid OFT {oft} for token {token}")]
	InvalidOft { oft: Address, token: Address },

	#[error("Invalid gateway router: {router}")]
	InvalidGatewayRouter { router: Address },

	#[error("Router {router} has no gateway for token {token}")]
	InvalidGateway { router: Address, token: Address },

	#[error("Invalid NTT manager {manager} for token {token}")]
	InvalidNttManager { manager: Address, token: Address },

	#[error("Amount {amount} is below the {decimals}-decimal transfer floor")]
	AmountTooSmall { amount: U256, decimals: u8 },

	#[error("Unsupported token precision: {decimals} decimals (at most {max})")]
	UnsupportedDecimals { decimals: u8, max: u8 },

	#[error("Invalid teller {teller} for token {token}")]
	InvalidTeller { teller: Address, token: Address },

	#[error("{endpoint} rejected the call: {reason}")]
	Protocol { endpoint: Address, reason: String },

	#[error("Ledger error: {0}")]
	Ledger(#[from] LedgerError),
}

/// Adapter registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterRegistryError {
	#[error("Adapter already registered: {address}")]
	AlreadyRegistered { address: Address },

	#[error("Adapter cannot be registered at the zero address")]
	ZeroAddress,
}

impl AdapterError {
	/// Rejection raised by an external protocol endpoint
	pub fn protocol(endpoint: Address, reason: impl Into<String>) -> Self {
		AdapterError::Protocol {
			endpoint,
			reason: reason.into(),
		}
	}
}
