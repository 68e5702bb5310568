//! Events emitted into the ledger's log

use crate::primitives::{Address, B256, U256};
use crate::routes::TokenRoute;
use serde::Serialize;

/// A log entry: the emitting account and its event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Log {
	pub emitter: Address,
	#[serde(flatten)]
	pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
	// Factory
	InstanceDeployed {
		instance: Address,
		salt: B256,
	},
	TokenRouteSet {
		token: Address,
		route: TokenRoute,
	},
	RecoveryWalletSet {
		old_wallet: Option<Address>,
		new_wallet: Address,
	},
	FundsRecovered {
		token: Address,
		amount: U256,
		wallet: Address,
	},
	Paused {
		account: Address,
	},
	Unpaused {
		account: Address,
	},

	// Collector
	CollectorInitialized {
		owner: Address,
	},
	TopUpProcessed {
		token: Address,
		amount: U256,
	},

	// Adapters, emitted from the factory's context
	BridgeCctp {
		destination_domain: u32,
		recipient: B256,
		token: Address,
		amount: U256,
		max_fee: U256,
		min_finality_threshold: u32,
	},
	BridgeStargate {
		token: Address,
		amount: U256,
		min_amount: U256,
		destination_endpoint_id: u32,
		recipient: Address,
		guid: B256,
		ticket_id: Option<u64>,
	},
	BridgeOft {
		token: Address,
		amount: U256,
		min_amount: U256,
		destination_endpoint_id: u32,
		recipient: Address,
		guid: B256,
	},
	BridgeRollupWithdrawal {
		token: Address,
		amount: U256,
		recipient: Address,
		gas_limit: u64,
		fee: U256,
	},
	BridgeNtt {
		token: Address,
		amount: U256,
		dust: U256,
		recipient_chain: u16,
		recipient: B256,
		sequence: u64,
	},
	BridgeTeller {
		token: Address,
		shares: U256,
		recipient: Address,
		fee: U256,
		message_id: B256,
	},

	// External protocol endpoints
	DepositForBurn {
		nonce: u64,
		burn_token: Address,
		amount: U256,
		depositor: Address,
		mint_recipient: B256,
		destination_domain: u32,
		max_fee: U256,
		min_finality_threshold: u32,
	},
	OftSent {
		guid: B256,
		destination_endpoint_id: u32,
		from: Address,
		amount_sent: U256,
		amount_received: U256,
	},
	BusRode {
		destination_endpoint_id: u32,
		ticket_id: u64,
	},
	WithdrawalInitiated {
		token: Address,
		from: Address,
		to: Address,
		amount: U256,
		gas_limit: u64,
	},
	TransferSent {
		sequence: u64,
		recipient: B256,
		amount: U256,
		fee: U256,
		recipient_chain: u16,
	},
	SharesBridged {
		message_id: B256,
		shares: U256,
		to: Address,
		fee: U256,
	},
}

impl Event {
	/// Snake-case event name, matching the serialized `event` tag
	pub fn name(&self) -> &'static str {
		match self {
			Event::InstanceDeployed { .. } => "instance_deployed",
			Event::TokenRouteSet { .. } => "token_route_set",
			Event::RecoveryWalletSet { .. } => "recovery_wallet_set",
			Event::FundsRecovered { .. } => "funds_recovered",
			Event::Paused { .. } => "paused",
			Event::Unpaused { .. } => "unpaused",
			Event::CollectorInitialized { .. } => "collector_initialized",
			Event::TopUpProcessed { .. } => "top_up_processed",
			Event::BridgeCctp { .. } => "bridge_cctp",
			Event::BridgeStargate { .. } => "bridge_stargate",
			Event::BridgeOft { .. } => "bridge_oft",
			Event::BridgeRollupWithdrawal { .. } => "bridge_rollup_withdrawal",
			Event::BridgeNtt { .. } => "bridge_ntt",
			Event::BridgeTeller { .. } => "bridge_teller",
			Event::DepositForBurn { .. } => "deposit_for_burn",
			Event::OftSent { .. } => "oft_sent",
			Event::BusRode { .. } => "bus_rode",
			Event::WithdrawalInitiated { .. } => "withdrawal_initiated",
			Event::TransferSent { .. } => "transfer_sent",
			Event::SharesBridged { .. } => "shares_bridged",
		}
	}
}
