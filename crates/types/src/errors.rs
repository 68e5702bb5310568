//! Error types for the collector and the factory

use crate::adapters::AdapterError;
use crate::ledger::LedgerError;
use crate::primitives::{Address, B256};
use crate::roles::Role;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectorError {
	#[error("Collector {collector} is already initialized")]
	AlreadyInitialized { collector: Address },

	#[error("Caller {caller} is not the owner of collector {collector}")]
	Unauthorized { collector: Address, caller: Address },

	#[error("Ledger error: {0}")]
	Ledger(#[from] LedgerError),
}

pub type CollectorResult<T> = Result<T, CollectorError>;

/// Coarse classification used to map failures onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
	Authorization,
	Configuration,
	State,
	Protocol,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
	#[error("Account {account} is missing role {role}")]
	Unauthorized { role: Role, account: Address },

	#[error("Address {address} already holds code (salt {salt})")]
	AddressCollision { address: Address, salt: B256 },

	#[error("Token cannot be the zero address")]
	TokenCannotBeZeroAddress,

	#[error("Invalid config: {reason}")]
	InvalidConfig { reason: String },

	#[error("Array length mismatch: {tokens} tokens, {routes} routes")]
	ArrayLengthMismatch { tokens: usize, routes: usize },

	#[error("No route configured for token {token}")]
	TokenConfigNotSet { token: Address },

	#[error("Factory holds no balance of {token}")]
	ZeroBalance { token: Address },

	#[error("{instance} is not a deployed instance")]
	InvalidTopUpAddress { instance: Address },

	#[error("Token {token} is supported for bridging and cannot be recovered")]
	OnlyUnsupportedTokens { token: Address },

	#[error("Recovery wallet not set")]
	RecoveryWalletNotSet,

	#[error("Factory is paused")]
	Paused,

	#[error("Factory is not paused")]
	NotPaused,

	#[error("No adapter registered at {adapter}")]
	AdapterNotFound { adapter: Address },

	#[error("Adapter error: {0}")]
	Adapter(#[from] AdapterError),

	#[error("Collector error: {0}")]
	Collector(#[from] CollectorError),

	#[error("Ledger error: {0}")]
	Ledger(#[from] LedgerError),
}

pub type FactoryResult<T> = Result<T, FactoryError>;

impl FactoryError {
	pub fn category(&self) -> ErrorCategory {
		match self {
			FactoryError::Unauthorized { .. } => ErrorCategory::Authorization,
			FactoryError::TokenCannotBeZeroAddress
			| FactoryError::InvalidConfig { .. }
			| FactoryError::ArrayLengthMismatch { .. }
			| FactoryError::TokenConfigNotSet { .. }
			| FactoryError::RecoveryWalletNotSet
			| FactoryError::OnlyUnsupportedTokens { .. }
			| FactoryError::AdapterNotFound { .. } => ErrorCategory::Configuration,
			FactoryError::ZeroBalance { .. }
			| FactoryError::AddressCollision { .. }
			| FactoryError::InvalidTopUpAddress { .. }
			| FactoryError::Paused
			| FactoryError::NotPaused
			| FactoryError::Collector(_)
			| FactoryError::Ledger(_) => ErrorCategory::State,
			FactoryError::Adapter(_) => ErrorCategory::Protocol,
		}
	}

	/// Short machine-readable code for API responses
	pub fn code(&self) -> &'static str {
		match self {
			FactoryError::Unauthorized { .. } => "UNAUTHORIZED",
			FactoryError::AddressCollision { .. } => "ADDRESS_COLLISION",
			FactoryError::TokenCannotBeZeroAddress => "TOKEN_CANNOT_BE_ZERO_ADDRESS",
			FactoryError::InvalidConfig { .. } => "INVALID_CONFIG",
			FactoryError::ArrayLengthMismatch { .. } => "ARRAY_LENGTH_MISMATCH",
			FactoryError::TokenConfigNotSet { .. } => "TOKEN_CONFIG_NOT_SET",
			FactoryError::ZeroBalance { .. } => "ZERO_BALANCE",
			FactoryError::InvalidTopUpAddress { .. } => "INVALID_TOPUP_ADDRESS",
			FactoryError::OnlyUnsupportedTokens { .. } => "ONLY_UNSUPPORTED_TOKENS",
			FactoryError::RecoveryWalletNotSet => "RECOVERY_WALLET_NOT_SET",
			FactoryError::Paused => "PAUSED",
			FactoryError::NotPaused => "NOT_PAUSED",
			FactoryError::AdapterNotFound { .. } => "ADAPTER_NOT_FOUND",
			FactoryError::Adapter(_) => "ADAPTER_ERROR",
			FactoryError::Collector(_) => "COLLECTOR_ERROR",
			FactoryError::Ledger(_) => "LEDGER_ERROR",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::primitives::U256;

	#[test]
	fn test_categories() {
		let unauthorized = FactoryError::Unauthorized {
			role: Role::TopUpFactoryAdmin,
			account: Address::ZERO,
		};
		assert_eq!(unauthorized.category(), ErrorCategory::Authorization);

		let not_set = FactoryError::TokenConfigNotSet {
			token: Address::ZERO,
		};
		assert_eq!(not_set.category(), ErrorCategory::Configuration);

		let zero = FactoryError::ZeroBalance {
			token: Address::ZERO,
		};
		assert_eq!(zero.category(), ErrorCategory::State);

		let adapter: FactoryError = AdapterError::InsufficientNativeFee {
			required: U256::from(2),
			provided: U256::from(1),
		}
		.into();
		assert_eq!(adapter.category(), ErrorCategory::Protocol);
	}

	#[test]
	fn test_ledger_errors_are_state() {
		let err: FactoryError = LedgerError::Overflow {
			holder: Address::ZERO,
		}
		.into();
		assert_eq!(err.category(), ErrorCategory::State);
		assert_eq!(err.code(), "LEDGER_ERROR");
	}
}
