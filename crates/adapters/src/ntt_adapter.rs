//! Native token transfer adapter (Wormhole NTT)
//!
//! NTT carries amounts with at most `trimmed_decimals` decimals. The adapter
//! truncates the factory's balance to that precision before sending; the
//! remainder (dust) stays in the factory for a later bridge.

use crate::contracts::Contracts;
use crate::protocols::{NttManager, NttTransfer};
use crate::{ensure_native_fee, invalid_params};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, Event, FactoryContext, NttParams, MAX_TOKEN_DECIMALS, U256,
};
use tracing::{debug, info};

/// Wire precision of NTT amounts
pub const DEFAULT_TRIMMED_DECIMALS: u8 = 8;

#[derive(Debug)]
pub struct NttAdapter {
	info: AdapterInfo,
	managers: Contracts<dyn NttManager>,
	trimmed_decimals: u8,
}

impl NttAdapter {
	pub fn new(address: Address, managers: Contracts<dyn NttManager>) -> Self {
		Self::with_info(
			AdapterInfo::new("ntt-v1", address, AdapterKind::Ntt, "Wormhole NTT Adapter"),
			managers,
		)
	}

	pub fn with_info(info: AdapterInfo, managers: Contracts<dyn NttManager>) -> Self {
		Self {
			info,
			managers,
			trimmed_decimals: DEFAULT_TRIMMED_DECIMALS,
		}
	}

	pub fn with_trimmed_decimals(mut self, trimmed_decimals: u8) -> Self {
		self.trimmed_decimals = trimmed_decimals;
		self
	}

	fn resolve<'r>(
		&self,
		request: &BridgeRequest<'r>,
	) -> AdapterResult<(&'r NttParams, &Arc<dyn NttManager>)> {
		let params = request
			.params
			.as_ntt()
			.ok_or_else(|| invalid_params(AdapterKind::Ntt, request.params))?;

		let manager = self
			.managers
			.get(params.manager)
			.filter(|manager| manager.token() == request.token)
			.ok_or(AdapterError::InvalidNttManager {
				manager: params.manager,
				token: request.token,
			})?;

		Ok((params, manager))
	}

	/// Truncate `amount` to the adapter's decimal floor
	pub fn trim(&self, amount: U256, token_decimals: u8) -> AdapterResult<U256> {
		for decimals in [token_decimals, self.trimmed_decimals] {
			if decimals > MAX_TOKEN_DECIMALS {
				return Err(AdapterError::UnsupportedDecimals {
					decimals,
					max: MAX_TOKEN_DECIMALS,
				});
			}
		}
		if token_decimals <= self.trimmed_decimals {
			return Ok(amount);
		}
		let factor = U256::from(10u64).pow(U256::from(token_decimals - self.trimmed_decimals));
		Ok(amount - amount % factor)
	}
}

impl BridgeAdapter for NttAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		let (params, manager) = self.resolve(request)?;
		let (_, total) =
			manager.quote_delivery_price(params.recipient_chain, &params.transceiver_instructions)?;
		Ok(BridgeFee::native(total))
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"NTT adapter bridging {} of {} to {}",
			request.amount, request.token, request.recipient
		);

		let (params, manager) = self.resolve(request)?;

		let amount = self.trim(request.amount, manager.token_decimals())?;
		if amount.is_zero() {
			return Err(AdapterError::AmountTooSmall {
				amount: request.amount,
				decimals: self.trimmed_decimals,
			});
		}
		let min_amount = request.min_amount();
		if amount < min_amount {
			return Err(AdapterError::InsufficientMinAmount {
				min_amount,
				amount_received: amount,
			});
		}
		let dust = request.amount - amount;

		let (_, fee) =
			manager.quote_delivery_price(params.recipient_chain, &params.transceiver_instructions)?;
		ensure_native_fee(ctx, fee)?;

		let recipient = request.recipient.into_word();
		let refund_address = ctx.factory().into_word();
		ctx.approve(request.token, manager.address(), amount);
		let call = ctx.call(manager.address(), fee)?;
		let sequence = manager.transfer(
			call,
			&NttTransfer {
				amount,
				recipient_chain: params.recipient_chain,
				recipient,
				refund_address,
				should_queue: params.should_queue,
				transceiver_instructions: params.transceiver_instructions.clone(),
			},
		)?;

		ctx.emit(Event::BridgeNtt {
			token: request.token,
			amount,
			dust,
			recipient_chain: params.recipient_chain,
			recipient,
			sequence,
		});

		info!(
			"Transferred {} of {} to chain {} (sequence {}, dust {})",
			amount, request.token, params.recipient_chain, sequence, dust
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::Ntt,
			token: request.token,
			amount_sent: amount,
			min_amount_received: amount,
			native_fee: fee,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::simulated::SimulatedNttManager;
	use topup_storage::MemoryLedger;
	use topup_types::{BridgeParams, Bytes, Ledger, TokenRoute};

	const FACTORY: Address = Address::repeat_byte(0xFA);
	const W: Address = Address::repeat_byte(0x57);
	const MANAGER: Address = Address::repeat_byte(0x3A);

	fn setup(decimals: u8) -> (NttAdapter, Arc<SimulatedNttManager>) {
		let manager = Arc::new(
			SimulatedNttManager::new(MANAGER, W, decimals)
				.with_delivery_prices(vec![U256::from(5), U256::from(6)]),
		);
		let adapter = NttAdapter::new(
			Address::repeat_byte(0xA5),
			Contracts::new().with(MANAGER, manager.clone() as Arc<dyn NttManager>),
		);
		(adapter, manager)
	}

	fn route(slippage: u16) -> TokenRoute {
		TokenRoute::new(
			Address::repeat_byte(0xA5),
			Address::repeat_byte(0xBE),
			slippage,
			BridgeParams::Ntt(NttParams {
				manager: MANAGER,
				recipient_chain: 2,
				should_queue: false,
				transceiver_instructions: Bytes::new(),
			}),
		)
	}

	fn ledger_with(amount: U256) -> MemoryLedger {
		let mut ledger = MemoryLedger::new();
		ledger.credit(W, FACTORY, amount).unwrap();
		ledger.credit_native(FACTORY, U256::from(11)).unwrap();
		ledger
	}

	#[test]
	fn test_trim() {
		let (adapter, _) = setup(18);
		let amount = U256::from(1_234_567_891_234_567_891u64);
		assert_eq!(adapter.trim(amount, 18), Ok(U256::from(1_234_567_890_000_000_000u64)));
		assert_eq!(adapter.trim(U256::from(123), 6), Ok(U256::from(123)));
		assert_eq!(adapter.trim(U256::from(123), 8), Ok(U256::from(123)));
	}

	#[test]
	fn test_trim_rejects_unrealistic_precision() {
		let (adapter, _) = setup(18);
		assert_eq!(
			adapter.trim(U256::from(1), 86),
			Err(AdapterError::UnsupportedDecimals {
				decimals: 86,
				max: MAX_TOKEN_DECIMALS
			})
		);
		assert!(adapter.trim(U256::MAX, MAX_TOKEN_DECIMALS).is_ok());

		let wide =
			NttAdapter::new(Address::repeat_byte(0xA5), Contracts::new()).with_trimmed_decimals(40);
		assert!(matches!(
			wide.trim(U256::from(1), 18),
			Err(AdapterError::UnsupportedDecimals { decimals: 40, .. })
		));
	}

	#[test]
	fn test_bridge_fails_for_unrealistic_manager_precision() {
		let (adapter, manager) = setup(90);
		let balance = U256::from(1_000_000u64);
		let mut ledger = ledger_with(balance);
		let route = route(0);
		let request = BridgeRequest::for_route(W, balance, &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(11), &mut ledger);
		assert!(matches!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::UnsupportedDecimals { decimals: 90, .. })
		));
		drop(ctx);
		assert!(manager.transfers().is_empty());
		assert_eq!(ledger.balance_of(W, FACTORY), balance);
	}

	#[test]
	fn test_dust_stays_in_factory() {
		let (adapter, manager) = setup(18);
		let balance = U256::from(1_000_000_000_000_000_123u64);
		let mut ledger = ledger_with(balance);
		let route = route(10);
		let request = BridgeRequest::for_route(W, balance, &route);

		assert_eq!(adapter.get_bridge_fee(&request).unwrap().fee_amount, U256::from(11));

		let receipt = {
			let mut ctx = FactoryContext::new(FACTORY, U256::from(11), &mut ledger);
			adapter.bridge(&mut ctx, &request).unwrap()
		};

		assert_eq!(receipt.amount_sent, U256::from(1_000_000_000_000_000_000u64));
		assert_eq!(ledger.balance_of(W, FACTORY), U256::from(123));
		assert_eq!(manager.transfers().len(), 1);
		assert!(ledger.logs_from(FACTORY).any(|log| matches!(
			log.event,
			Event::BridgeNtt { dust, sequence: 0, .. } if dust == U256::from(123)
		)));
	}

	#[test]
	fn test_amount_below_floor() {
		let (adapter, _) = setup(18);
		let balance = U256::from(9_999_999_999u64);
		let mut ledger = ledger_with(balance);
		let route = route(0);
		let request = BridgeRequest::for_route(W, balance, &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(11), &mut ledger);
		assert_eq!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::AmountTooSmall {
				amount: balance,
				decimals: 8
			})
		);
	}

	#[test]
	fn test_truncation_checked_against_slippage() {
		let (adapter, _) = setup(18);
		// 1.5e10 trims to 1e10, a 33% shortfall
		let balance = U256::from(15_000_000_000u64);
		let mut ledger = ledger_with(balance);
		let route = route(200);
		let request = BridgeRequest::for_route(W, balance, &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(11), &mut ledger);
		assert!(matches!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::InsufficientMinAmount { .. })
		));
	}

	#[test]
	fn test_delivery_price_must_be_attached() {
		let (adapter, _) = setup(6);
		let mut ledger = ledger_with(U256::from(500));
		let route = route(0);
		let request = BridgeRequest::for_route(W, U256::from(500), &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(10), &mut ledger);
		assert_eq!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::InsufficientNativeFee {
				required: U256::from(11),
				provided: U256::from(10),
			})
		);
	}
}
