//! TopUp Types
//!
//! Shared models and traits for the TopUp bridge.
//! This crate holds the chain primitives, routing data, events, errors and
//! the seams (`Ledger`, `BridgeAdapter`, `RoleService`) the other crates plug into.

pub mod adapters;
pub mod context;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod primitives;
pub mod roles;
pub mod routes;

// Re-export serde_json for convenience
pub use serde_json;

pub use adapters::{
	AdapterError, AdapterInfo, AdapterRegistryError, AdapterResult, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest,
};

pub use context::{ExternalCall, FactoryContext};

pub use errors::{
	CollectorError, CollectorResult, ErrorCategory, FactoryError, FactoryResult,
};

pub use events::{Event, Log};

pub use ledger::{Ledger, LedgerError, LedgerResult};

pub use primitives::{
	address, deduct_slippage, keccak256, Address, Bytes, CallEnv, B256, BPS_DENOMINATOR,
	MAX_SLIPPAGE_BPS, MAX_TOKEN_DECIMALS, NATIVE_ASSET, U256,
};

pub use roles::{Role, RoleService};

pub use routes::{
	AdapterKind, BridgeParams, CctpParams, NttParams, OftParams, RollupWithdrawalParams,
	RouteValidationError, StargateMode, StargateParams, TellerParams, TokenRoute,
};
