//! Adapter-specific bridge parameters

use crate::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of bridge protocols an adapter can wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
	/// Native burn-and-mint (CCTP-style)
	Cctp,
	/// Liquidity-pool relay (Stargate-style)
	Stargate,
	/// Omnichain fungible token transfer
	Oft,
	/// Native L2 to L1 withdrawal through a gateway router
	RollupWithdrawal,
	/// Native token transfer over generic message passing
	Ntt,
	/// Vault-share bridging through a teller
	Teller,
}

impl AdapterKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			AdapterKind::Cctp => "cctp",
			AdapterKind::Stargate => "stargate",
			AdapterKind::Oft => "oft",
			AdapterKind::RollupWithdrawal => "rollup_withdrawal",
			AdapterKind::Ntt => "ntt",
			AdapterKind::Teller => "teller",
		}
	}
}

impl fmt::Display for AdapterKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parameters stored in a route's `additional_data`, tagged by protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum BridgeParams {
	Cctp(CctpParams),
	Stargate(StargateParams),
	Oft(OftParams),
	RollupWithdrawal(RollupWithdrawalParams),
	Ntt(NttParams),
	Teller(TellerParams),
}

impl BridgeParams {
	pub fn kind(&self) -> AdapterKind {
		match self {
			BridgeParams::Cctp(_) => AdapterKind::Cctp,
			BridgeParams::Stargate(_) => AdapterKind::Stargate,
			BridgeParams::Oft(_) => AdapterKind::Oft,
			BridgeParams::RollupWithdrawal(_) => AdapterKind::RollupWithdrawal,
			BridgeParams::Ntt(_) => AdapterKind::Ntt,
			BridgeParams::Teller(_) => AdapterKind::Teller,
		}
	}

	pub fn as_cctp(&self) -> Option<&CctpParams> {
		match self {
			BridgeParams::Cctp(params) => Some(params),
			_ => None,
		}
	}

	pub fn as_stargate(&self) -> Option<&StargateParams> {
		match self {
			BridgeParams::Stargate(params) => Some(params),
			_ => None,
		}
	}

	pub fn as_oft(&self) -> Option<&OftParams> {
		match self {
			BridgeParams::Oft(params) => Some(params),
			_ => None,
		}
	}

	pub fn as_rollup_withdrawal(&self) -> Option<&RollupWithdrawalParams> {
		match self {
			BridgeParams::RollupWithdrawal(params) => Some(params),
			_ => None,
		}
	}

	pub fn as_ntt(&self) -> Option<&NttParams> {
		match self {
			BridgeParams::Ntt(params) => Some(params),
			_ => None,
		}
	}

	pub fn as_teller(&self) -> Option<&TellerParams> {
		match self {
			BridgeParams::Teller(params) => Some(params),
			_ => None,
		}
	}
}

/// Burn-and-mint parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CctpParams {
	pub token_messenger: Address,
	pub destination_domain: u32,
	/// Fee the relayer may keep on the destination side; must stay below the amount
	pub max_fee: U256,
	/// 1000 for fast transfers, 2000 for finalized
	pub min_finality_threshold: u32,
}

/// Delivery mode of a Stargate pool transfer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StargateMode {
	/// Immediate, dedicated message
	Taxi,
	/// Batched with other passengers
	#[default]
	Bus,
}

impl StargateMode {
	/// Command bytes carried in `SendParam::oft_cmd`
	pub fn oft_cmd(&self) -> Bytes {
		match self {
			StargateMode::Taxi => Bytes::new(),
			StargateMode::Bus => Bytes::from_static(&[0u8]),
		}
	}
}

/// Liquidity-pool relay parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StargateParams {
	pub pool: Address,
	pub destination_endpoint_id: u32,
	#[serde(default)]
	pub mode: StargateMode,
}

/// OFT transfer parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OftParams {
	pub oft: Address,
	pub destination_endpoint_id: u32,
}

/// Native rollup withdrawal parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupWithdrawalParams {
	pub gateway_router: Address,
	/// Gas forwarded for execution of the message on the destination side
	pub gas_limit: u64,
}

/// Native token transfer parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NttParams {
	pub manager: Address,
	/// Wormhole chain id of the destination
	pub recipient_chain: u16,
	#[serde(default)]
	pub should_queue: bool,
	#[serde(default)]
	pub transceiver_instructions: Bytes,
}

/// Vault-share teller parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerParams {
	pub teller: Address,
	#[serde(default)]
	pub bridge_data: Bytes,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_kind_matches_variant() {
		let params = BridgeParams::RollupWithdrawal(RollupWithdrawalParams {
			gateway_router: Address::ZERO,
			gas_limit: 100_000,
		});
		assert_eq!(params.kind(), AdapterKind::RollupWithdrawal);
		assert!(params.as_rollup_withdrawal().is_some());
		assert!(params.as_cctp().is_none());
	}

	#[test]
	fn test_stargate_mode_defaults_to_bus() {
		let params: BridgeParams = serde_json::from_value(json!({
			"protocol": "stargate",
			"pool": "0x00000000000000000000000000000000000000aa",
			"destination_endpoint_id": 30101
		}))
		.unwrap();

		let stargate = params.as_stargate().unwrap();
		assert_eq!(stargate.mode, StargateMode::Bus);
		assert_eq!(stargate.mode.oft_cmd(), Bytes::from_static(&[0u8]));
		assert!(StargateMode::Taxi.oft_cmd().is_empty());
	}

	#[test]
	fn test_ntt_optional_fields() {
		let params: BridgeParams = serde_json::from_value(json!({
			"protocol": "ntt",
			"manager": "0x00000000000000000000000000000000000000bb",
			"recipient_chain": 2
		}))
		.unwrap();

		let ntt = params.as_ntt().unwrap();
		assert!(!ntt.should_queue);
		assert!(ntt.transceiver_instructions.is_empty());
	}

	#[test]
	fn test_unknown_protocol_rejected() {
		let result = serde_json::from_value::<BridgeParams>(json!({
			"protocol": "carrier_pigeon",
			"pool": "0x00000000000000000000000000000000000000aa"
		}));
		assert!(result.is_err());
	}

	#[test]
	fn test_kind_display() {
		assert_eq!(AdapterKind::RollupWithdrawal.to_string(), "rollup_withdrawal");
		assert_eq!(
			serde_json::to_value(AdapterKind::Stargate).unwrap(),
			json!("stargate")
		);
	}
}
