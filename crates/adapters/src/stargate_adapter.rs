//! Liquidity-pool relay adapter (Stargate v2)
//!
//! Quotes the pool's receive amount first and refuses to send when it is
//! below the route's slippage minimum. The quoted receive amount becomes the
//! send's own minimum, so the pool cannot settle for less.

use crate::contracts::Contracts;
use crate::protocols::{SendParam, StargatePool};
use crate::{ensure_native_fee, invalid_params};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, Bytes, Event, FactoryContext, StargateParams,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct StargateAdapter {
	info: AdapterInfo,
	pools: Contracts<dyn StargatePool>,
}

impl StargateAdapter {
	pub fn new(address: Address, pools: Contracts<dyn StargatePool>) -> Self {
		Self::with_info(
			AdapterInfo::new("stargate-v2", address, AdapterKind::Stargate, "Stargate Pool Adapter"),
			pools,
		)
	}

	pub fn with_info(info: AdapterInfo, pools: Contracts<dyn StargatePool>) -> Self {
		Self { info, pools }
	}

	fn resolve<'r>(
		&self,
		request: &BridgeRequest<'r>,
	) -> AdapterResult<(&'r StargateParams, &Arc<dyn StargatePool>)> {
		let params = request
			.params
			.as_stargate()
			.ok_or_else(|| invalid_params(AdapterKind::Stargate, request.params))?;

		let pool = self
			.pools
			.get(params.pool)
			.filter(|pool| pool.token() == request.token)
			.ok_or(AdapterError::InvalidStargatePool {
				pool: params.pool,
				token: request.token,
			})?;

		Ok((params, pool))
	}

	fn send_param(request: &BridgeRequest<'_>, params: &StargateParams) -> SendParam {
		SendParam {
			dst_eid: params.destination_endpoint_id,
			to: request.recipient.into_word(),
			amount_ld: request.amount,
			min_amount_ld: request.min_amount(),
			extra_options: Bytes::new(),
			compose_msg: Bytes::new(),
			oft_cmd: params.mode.oft_cmd(),
		}
	}
}

impl BridgeAdapter for StargateAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		let (params, pool) = self.resolve(request)?;
		let fee = pool.quote_send(&Self::send_param(request, params), false)?;
		Ok(BridgeFee::native(fee.native_fee))
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"Stargate adapter bridging {} of {} to {}",
			request.amount, request.token, request.recipient
		);

		let (params, pool) = self.resolve(request)?;
		let mut send_param = Self::send_param(request, params);

		let (_, quoted) = pool.quote_oft(&send_param)?;
		let min_amount = request.min_amount();
		if quoted.amount_received_ld < min_amount {
			return Err(AdapterError::InsufficientMinAmount {
				min_amount,
				amount_received: quoted.amount_received_ld,
			});
		}
		send_param.min_amount_ld = quoted.amount_received_ld;

		let fee = pool.quote_send(&send_param, false)?;
		ensure_native_fee(ctx, fee.native_fee)?;

		let refund_address = ctx.factory();
		ctx.approve(request.token, pool.address(), request.amount);
		let call = ctx.call(pool.address(), fee.native_fee)?;
		let (messaging, receipt, ticket) = pool.send_token(call, &send_param, &fee, refund_address)?;

		ctx.emit(Event::BridgeStargate {
			token: request.token,
			amount: receipt.amount_sent_ld,
			min_amount: send_param.min_amount_ld,
			destination_endpoint_id: params.destination_endpoint_id,
			recipient: request.recipient,
			guid: messaging.guid,
			ticket_id: ticket.as_ref().map(|ticket| ticket.ticket_id),
		});

		info!(
			"Sent {} of {} through pool {} to endpoint {} ({:?})",
			receipt.amount_sent_ld,
			request.token,
			params.pool,
			params.destination_endpoint_id,
			params.mode
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::Stargate,
			token: request.token,
			amount_sent: receipt.amount_sent_ld,
			min_amount_received: send_param.min_amount_ld,
			native_fee: fee.native_fee,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::simulated::SimulatedStargatePool;
	use topup_storage::MemoryLedger;
	use topup_types::{BridgeParams, Ledger, StargateMode, TokenRoute, U256};

	const FACTORY: Address = Address::repeat_byte(0xFA);
	const USDT: Address = Address::repeat_byte(0x06);
	const POOL: Address = Address::repeat_byte(0x5A);

	fn setup(fee_bps: u16, native_fee: u64) -> (StargateAdapter, Arc<SimulatedStargatePool>, MemoryLedger) {
		let pool = Arc::new(
			SimulatedStargatePool::new(POOL, USDT)
				.with_fee_bps(fee_bps)
				.with_native_fee(U256::from(native_fee)),
		);
		let adapter = StargateAdapter::new(
			Address::repeat_byte(0xA2),
			Contracts::new().with(POOL, pool.clone() as Arc<dyn StargatePool>),
		);
		let mut ledger = MemoryLedger::new();
		ledger.credit(USDT, FACTORY, U256::from(1000)).unwrap();
		ledger.credit_native(FACTORY, U256::from(1_000)).unwrap();
		(adapter, pool, ledger)
	}

	fn route(slippage: u16, mode: StargateMode) -> TokenRoute {
		TokenRoute::new(
			Address::repeat_byte(0xA2),
			Address::repeat_byte(0xBE),
			slippage,
			BridgeParams::Stargate(StargateParams {
				pool: POOL,
				destination_endpoint_id: 30101,
				mode,
			}),
		)
	}

	#[test]
	fn test_bridge_within_slippage() {
		let (adapter, _, mut ledger) = setup(50, 7);
		let route = route(50, StargateMode::Taxi);
		let request = BridgeRequest::for_route(USDT, U256::from(1000), &route);

		let receipt = {
			let mut ctx = FactoryContext::new(FACTORY, U256::from(7), &mut ledger);
			adapter.bridge(&mut ctx, &request).unwrap()
		};

		assert_eq!(receipt.min_amount_received, U256::from(995));
		assert_eq!(receipt.native_fee, U256::from(7));
		assert_eq!(ledger.balance_of(USDT, FACTORY), U256::ZERO);
		assert_eq!(ledger.balance_of(USDT, POOL), U256::from(1000));
		assert_eq!(ledger.native_balance_of(POOL), U256::from(7));
	}

	#[test]
	fn test_quote_below_minimum_fails() {
		let (adapter, _, mut ledger) = setup(50, 0);
		let route = route(40, StargateMode::Taxi);
		let request = BridgeRequest::for_route(USDT, U256::from(1000), &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::ZERO, &mut ledger);
		assert_eq!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::InsufficientMinAmount {
				min_amount: U256::from(996),
				amount_received: U256::from(995),
			})
		);
	}

	#[test]
	fn test_insufficient_attached_value() {
		let (adapter, _, mut ledger) = setup(0, 10);
		let route = route(0, StargateMode::Bus);
		let request = BridgeRequest::for_route(USDT, U256::from(1000), &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(9), &mut ledger);
		assert_eq!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::InsufficientNativeFee {
				required: U256::from(10),
				provided: U256::from(9),
			})
		);
	}

	#[test]
	fn test_bus_mode_rides_with_ticket() {
		let (adapter, _, mut ledger) = setup(0, 0);
		let route = route(0, StargateMode::Bus);
		let request = BridgeRequest::for_route(USDT, U256::from(1000), &route);

		{
			let mut ctx = FactoryContext::new(FACTORY, U256::ZERO, &mut ledger);
			adapter.bridge(&mut ctx, &request).unwrap();
		}

		assert!(ledger
			.logs_from(POOL)
			.any(|log| matches!(log.event, Event::BusRode { ticket_id: 0, .. })));
		assert!(ledger.logs_from(FACTORY).any(|log| matches!(
			log.event,
			Event::BridgeStargate {
				ticket_id: Some(0),
				..
			}
		)));
	}

	#[test]
	fn test_fee_quote_and_pool_token_mismatch() {
		let (adapter, _, _) = setup(0, 42);
		let route = route(0, StargateMode::Taxi);

		let request = BridgeRequest::for_route(USDT, U256::from(1000), &route);
		assert_eq!(
			adapter.get_bridge_fee(&request).unwrap().fee_amount,
			U256::from(42)
		);

		let other = Address::repeat_byte(0x99);
		let request = BridgeRequest::for_route(other, U256::from(1000), &route);
		assert_eq!(
			adapter.get_bridge_fee(&request),
			Err(AdapterError::InvalidStargatePool {
				pool: POOL,
				token: other
			})
		);
	}

	proptest::proptest! {
		#[test]
		fn prop_success_never_below_slippage_floor(
			amount in 1u64..u64::MAX,
			slippage in 0u16..=200,
			pool_fee_bps in 0u16..=300,
		) {
			let (adapter, _, _) = setup(pool_fee_bps, 0);
			let mut ledger = MemoryLedger::new();
			ledger.credit(USDT, FACTORY, U256::from(amount)).unwrap();
			let route = route(slippage, StargateMode::Taxi);
			let request = BridgeRequest::for_route(USDT, U256::from(amount), &route);

			let mut ctx = FactoryContext::new(FACTORY, U256::ZERO, &mut ledger);
			match adapter.bridge(&mut ctx, &request) {
				Ok(receipt) => {
					let floor = topup_types::deduct_slippage(U256::from(amount), slippage);
					proptest::prop_assert!(receipt.min_amount_received >= floor);
				}
				Err(err) => {
					proptest::prop_assert!(
						matches!(err, AdapterError::InsufficientMinAmount { .. }),
						"unexpected error {err:?}"
					);
					proptest::prop_assert!(pool_fee_bps > slippage);
				}
			}
		}
	}
}
