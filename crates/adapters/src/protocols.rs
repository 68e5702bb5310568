//! External bridge protocol interfaces
//!
//! Each trait is the narrow slice of a protocol's on-chain interface that an
//! adapter needs. Calls that move funds take an [`ExternalCall`]: the factory
//! calling the endpoint with attached native value. Through it the endpoint
//! can pull what the factory approved, burn what it holds and emit its logs.

use std::fmt::Debug;
use topup_types::{AdapterResult, Address, Bytes, ExternalCall, B256, U256};

// ================================
// BURN AND MINT
// ================================

/// Arguments of a burn-and-mint deposit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositForBurn {
	pub amount: U256,
	pub destination_domain: u32,
	pub mint_recipient: B256,
	pub burn_token: Address,
	/// Zero allows any caller on the destination
	pub destination_caller: B256,
	pub max_fee: U256,
	pub min_finality_threshold: u32,
}

pub trait TokenMessenger: Send + Sync + Debug {
	fn address(&self) -> Address;

	fn is_supported_burn_token(&self, token: Address) -> bool;

	/// Burn `request.amount` and return the message nonce
	fn deposit_for_burn(&self, call: ExternalCall<'_>, request: &DepositForBurn)
		-> AdapterResult<u64>;
}

// ================================
// OMNICHAIN FUNGIBLE TOKENS
// ================================

/// LayerZero OFT send parameters, amounts in local decimals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendParam {
	pub dst_eid: u32,
	pub to: B256,
	pub amount_ld: U256,
	pub min_amount_ld: U256,
	pub extra_options: Bytes,
	pub compose_msg: Bytes,
	pub oft_cmd: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OftLimit {
	pub min_amount_ld: U256,
	pub max_amount_ld: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OftReceipt {
	pub amount_sent_ld: U256,
	pub amount_received_ld: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessagingFee {
	pub native_fee: U256,
	pub lz_token_fee: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagingReceipt {
	pub guid: B256,
	pub nonce: u64,
	pub fee: MessagingFee,
}

pub trait OftEndpoint: Send + Sync + Debug {
	fn address(&self) -> Address;

	/// Underlying ERC20 the endpoint moves
	fn token(&self) -> Address;

	/// Whether the endpoint pulls via allowance (adapter OFTs) or burns directly
	fn approval_required(&self) -> bool;

	fn quote_oft(&self, send_param: &SendParam) -> AdapterResult<(OftLimit, OftReceipt)>;

	fn quote_send(&self, send_param: &SendParam, pay_in_lz_token: bool)
		-> AdapterResult<MessagingFee>;

	fn send(
		&self,
		call: ExternalCall<'_>,
		send_param: &SendParam,
		fee: &MessagingFee,
		refund_address: Address,
	) -> AdapterResult<(MessagingReceipt, OftReceipt)>;
}

// ================================
// LIQUIDITY POOL RELAY
// ================================

/// Seat on a batched bus ride
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
	pub ticket_id: u64,
	pub passenger_bytes: Bytes,
}

pub trait StargatePool: OftEndpoint {
	/// Send through the pool; bus mode returns the ticket instead of a dedicated message
	fn send_token(
		&self,
		call: ExternalCall<'_>,
		send_param: &SendParam,
		fee: &MessagingFee,
		refund_address: Address,
	) -> AdapterResult<(MessagingReceipt, OftReceipt, Option<Ticket>)>;
}

// ================================
// ROLLUP WITHDRAWAL
// ================================

pub trait GatewayRouter: Send + Sync + Debug {
	fn address(&self) -> Address;

	/// Gateway responsible for `token`, if any
	fn erc20_gateway(&self, token: Address) -> Option<Address>;

	/// Native fee for a withdrawal message executing with `gas_limit`
	fn estimate_message_fee(&self, gas_limit: u64) -> U256;

	/// Withdraw `amount` to `to` on the parent chain; `call` targets the token's gateway
	fn withdraw_erc20(
		&self,
		call: ExternalCall<'_>,
		token: Address,
		to: Address,
		amount: U256,
		gas_limit: u64,
	) -> AdapterResult<()>;
}

// ================================
// NATIVE TOKEN TRANSFERS
// ================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttTransfer {
	pub amount: U256,
	pub recipient_chain: u16,
	pub recipient: B256,
	pub refund_address: B256,
	pub should_queue: bool,
	pub transceiver_instructions: Bytes,
}

pub trait NttManager: Send + Sync + Debug {
	fn address(&self) -> Address;

	fn token(&self) -> Address;

	fn token_decimals(&self) -> u8;

	/// Per-transceiver delivery prices and their total
	fn quote_delivery_price(
		&self,
		recipient_chain: u16,
		transceiver_instructions: &Bytes,
	) -> AdapterResult<(Vec<U256>, U256)>;

	/// Returns the outbound message sequence
	fn transfer(&self, call: ExternalCall<'_>, transfer: &NttTransfer) -> AdapterResult<u64>;
}

// ================================
// VAULT TELLER
// ================================

pub trait Teller: Send + Sync + Debug {
	fn address(&self) -> Address;

	/// Vault whose shares the teller bridges
	fn vault(&self) -> Address;

	fn preview_fee(
		&self,
		shares: U256,
		to: Address,
		bridge_data: &Bytes,
		fee_token: Address,
	) -> AdapterResult<U256>;

	/// Returns the cross-chain message id
	fn bridge(
		&self,
		call: ExternalCall<'_>,
		shares: U256,
		to: Address,
		bridge_data: &Bytes,
		fee_token: Address,
		max_fee: U256,
	) -> AdapterResult<B256>;
}
