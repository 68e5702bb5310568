//! Shared fixtures for the integration tests
//!
//! A devnet with one simulated endpoint and one adapter per protocol family,
//! a route for each token and a single admin.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use topup_bridge::config::{
	AdapterSettings, ApiKeySettings, ConfigurableValue, GatewayMapping, GenesisAllocation,
	ProtocolSettings, RouteSettings, Settings,
};
use topup_bridge::types::{
	CctpParams, NttParams, OftParams, RollupWithdrawalParams, StargateMode, StargateParams,
	TellerParams,
};
use topup_bridge::{
	AdapterKind, Address, AppState, BridgeNode, BridgeParams, NodeBuilder, B256, U256,
};

pub const FACTORY: Address = Address::repeat_byte(0xFA);
pub const WETH: Address = Address::repeat_byte(0x42);
pub const GATEWAY: Address = Address::repeat_byte(0x6A);

pub const ADMIN: Address = Address::repeat_byte(0xAD);
pub const PAUSER: Address = Address::repeat_byte(0xA1);
pub const USER: Address = Address::repeat_byte(0x01);
pub const RECIPIENT: Address = Address::repeat_byte(0xB0);
pub const RECOVERY: Address = Address::repeat_byte(0xEE);

pub const USDC: Address = Address::repeat_byte(0x11);
pub const USDT: Address = Address::repeat_byte(0x12);
pub const OFT_TOKEN: Address = Address::repeat_byte(0x13);
pub const ROLLUP_TOKEN: Address = Address::repeat_byte(0x14);
pub const NTT_TOKEN: Address = Address::repeat_byte(0x15);
pub const VAULT: Address = Address::repeat_byte(0x16);
pub const UNROUTED: Address = Address::repeat_byte(0x17);

pub const MESSENGER: Address = Address::repeat_byte(0xE1);
pub const POOL: Address = Address::repeat_byte(0xE2);
pub const ROUTER: Address = Address::repeat_byte(0xE4);
pub const TOKEN_GATEWAY: Address = Address::repeat_byte(0xF4);
pub const MANAGER: Address = Address::repeat_byte(0xE5);
pub const TELLER: Address = Address::repeat_byte(0xE6);

pub const CCTP_ADAPTER: Address = Address::repeat_byte(0xC1);
pub const STARGATE_ADAPTER: Address = Address::repeat_byte(0xC2);
pub const OFT_ADAPTER: Address = Address::repeat_byte(0xC3);
pub const ROLLUP_ADAPTER: Address = Address::repeat_byte(0xC4);
pub const NTT_ADAPTER: Address = Address::repeat_byte(0xC5);
pub const TELLER_ADAPTER: Address = Address::repeat_byte(0xC6);

pub const ADMIN_KEY: &str = "test-admin-key";
pub const PAUSER_KEY: &str = "test-pauser-key";

pub const STARGATE_POOL_FEE_BPS: u16 = 50;
pub const ROLLUP_BASE_FEE: u64 = 1_000;
pub const TELLER_FEE: u64 = 500;

pub fn salt(n: u8) -> B256 {
	B256::repeat_byte(n)
}

fn adapter(kind: AdapterKind, address: Address) -> AdapterSettings {
	AdapterSettings {
		kind,
		address,
		enabled: true,
		name: None,
		trimmed_decimals: None,
	}
}

fn route(token: Address, adapter: &str, max_slippage_bps: u16, params: BridgeParams) -> RouteSettings {
	RouteSettings {
		token,
		adapter: adapter.to_string(),
		recipient: RECIPIENT,
		max_slippage_bps,
		params,
	}
}

pub fn cctp_params() -> BridgeParams {
	BridgeParams::Cctp(CctpParams {
		token_messenger: MESSENGER,
		destination_domain: 2000,
		max_fee: U256::ZERO,
		min_finality_threshold: 2000,
	})
}

pub fn stargate_params() -> BridgeParams {
	BridgeParams::Stargate(StargateParams {
		pool: POOL,
		destination_endpoint_id: 30184,
		mode: StargateMode::Taxi,
	})
}

/// Devnet settings with every protocol family wired
pub fn devnet_settings() -> Settings {
	let mut settings = Settings::default();
	settings.network.factory = FACTORY;
	settings.network.wrapped_native = WETH;
	settings.network.gateway = Some(GATEWAY);

	settings.roles.admins = vec![ADMIN];
	settings.roles.pausers = vec![PAUSER];
	settings.roles.unpausers = vec![ADMIN];
	settings.api_keys = vec![
		ApiKeySettings {
			key: ConfigurableValue::from_plain(ADMIN_KEY),
			account: ADMIN,
		},
		ApiKeySettings {
			key: ConfigurableValue::from_plain(PAUSER_KEY),
			account: PAUSER,
		},
	];

	settings.protocols = vec![
		ProtocolSettings::TokenMessenger {
			address: MESSENGER,
			burn_tokens: vec![USDC],
		},
		ProtocolSettings::StargatePool {
			address: POOL,
			token: USDT,
			fee_bps: STARGATE_POOL_FEE_BPS,
			native_fee: U256::ZERO,
		},
		ProtocolSettings::Oft {
			address: OFT_TOKEN,
			token: None,
			decimal_conversion_rate: U256::from(1_000),
			fee_bps: 0,
			native_fee: U256::ZERO,
		},
		ProtocolSettings::GatewayRouter {
			address: ROUTER,
			gateways: vec![GatewayMapping {
				token: ROLLUP_TOKEN,
				gateway: TOKEN_GATEWAY,
			}],
			base_fee: U256::from(ROLLUP_BASE_FEE),
			fee_per_gas: U256::ZERO,
		},
		ProtocolSettings::NttManager {
			address: MANAGER,
			token: NTT_TOKEN,
			decimals: 18,
			delivery_prices: vec![U256::ZERO],
		},
		ProtocolSettings::Teller {
			address: TELLER,
			vault: VAULT,
			fee: U256::from(TELLER_FEE),
		},
	];

	settings.adapters = HashMap::from([
		("cctp".to_string(), adapter(AdapterKind::Cctp, CCTP_ADAPTER)),
		(
			"stargate".to_string(),
			adapter(AdapterKind::Stargate, STARGATE_ADAPTER),
		),
		("oft".to_string(), adapter(AdapterKind::Oft, OFT_ADAPTER)),
		(
			"rollup".to_string(),
			adapter(AdapterKind::RollupWithdrawal, ROLLUP_ADAPTER),
		),
		("ntt".to_string(), adapter(AdapterKind::Ntt, NTT_ADAPTER)),
		("teller".to_string(), adapter(AdapterKind::Teller, TELLER_ADAPTER)),
	]);

	settings.routes = vec![
		route(USDC, "cctp", 0, cctp_params()),
		route(USDT, "stargate", 50, stargate_params()),
		route(
			OFT_TOKEN,
			"oft",
			10,
			BridgeParams::Oft(OftParams {
				oft: OFT_TOKEN,
				destination_endpoint_id: 30184,
			}),
		),
		route(
			ROLLUP_TOKEN,
			"rollup",
			0,
			BridgeParams::RollupWithdrawal(RollupWithdrawalParams {
				gateway_router: ROUTER,
				gas_limit: 200_000,
			}),
		),
		route(
			NTT_TOKEN,
			"ntt",
			0,
			BridgeParams::Ntt(NttParams {
				manager: MANAGER,
				recipient_chain: 30,
				should_queue: false,
				transceiver_instructions: Default::default(),
			}),
		),
		route(
			VAULT,
			"teller",
			0,
			BridgeParams::Teller(TellerParams {
				teller: TELLER,
				bridge_data: Default::default(),
			}),
		),
	];

	settings.genesis = vec![GenesisAllocation {
		account: USER,
		token: None,
		amount: U256::from(1_000_000u64),
	}];
	settings
}

pub fn build_node() -> BridgeNode {
	NodeBuilder::new()
		.with_settings(devnet_settings())
		.build()
		.expect("devnet settings build")
}

pub fn test_router() -> (Router, AppState) {
	NodeBuilder::new()
		.with_settings(devnet_settings())
		.start()
		.expect("devnet router")
}

/// Deploy an instance and deposit `amount` of `token` into it
pub fn funded_instance(node: &mut BridgeNode, n: u8, token: Address, amount: u64) -> Address {
	let instance = node.deploy_instance(ADMIN, salt(n)).expect("deploy");
	node.mint(token, instance, U256::from(amount)).expect("mint");
	instance
}
