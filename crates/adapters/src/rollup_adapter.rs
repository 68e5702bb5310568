//! Native rollup withdrawal adapter
//!
//! Withdraws through the chain's canonical gateway router. The exact amount
//! leaves the factory; the message fee scales with the route's gas limit.
//! Completion on the parent chain is not tracked.

use crate::contracts::Contracts;
use crate::protocols::GatewayRouter;
use crate::{ensure_native_fee, invalid_params};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, Event, FactoryContext, RollupWithdrawalParams,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct RollupWithdrawalAdapter {
	info: AdapterInfo,
	routers: Contracts<dyn GatewayRouter>,
}

struct Resolved<'a, 'r> {
	params: &'r RollupWithdrawalParams,
	router: &'a Arc<dyn GatewayRouter>,
	gateway: Address,
}

impl RollupWithdrawalAdapter {
	pub fn new(address: Address, routers: Contracts<dyn GatewayRouter>) -> Self {
		Self::with_info(
			AdapterInfo::new(
				"rollup-withdrawal-v1",
				address,
				AdapterKind::RollupWithdrawal,
				"Rollup Gateway Withdrawal Adapter",
			),
			routers,
		)
	}

	pub fn with_info(info: AdapterInfo, routers: Contracts<dyn GatewayRouter>) -> Self {
		Self { info, routers }
	}

	fn resolve<'r>(&self, request: &BridgeRequest<'r>) -> AdapterResult<Resolved<'_, 'r>> {
		let params = request
			.params
			.as_rollup_withdrawal()
			.ok_or_else(|| invalid_params(AdapterKind::RollupWithdrawal, request.params))?;

		let router = self.routers.get(params.gateway_router).ok_or(
			AdapterError::InvalidGatewayRouter {
				router: params.gateway_router,
			},
		)?;
		let gateway = router
			.erc20_gateway(request.token)
			.ok_or(AdapterError::InvalidGateway {
				router: params.gateway_router,
				token: request.token,
			})?;

		Ok(Resolved {
			params,
			router,
			gateway,
		})
	}
}

impl BridgeAdapter for RollupWithdrawalAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		let resolved = self.resolve(request)?;
		Ok(BridgeFee::native(
			resolved.router.estimate_message_fee(resolved.params.gas_limit),
		))
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"Rollup adapter withdrawing {} of {} to {}",
			request.amount, request.token, request.recipient
		);

		let Resolved {
			params,
			router,
			gateway,
		} = self.resolve(request)?;
		let fee = router.estimate_message_fee(params.gas_limit);
		ensure_native_fee(ctx, fee)?;

		ctx.approve(request.token, gateway, request.amount);
		let call = ctx.call(gateway, fee)?;
		router.withdraw_erc20(
			call,
			request.token,
			request.recipient,
			request.amount,
			params.gas_limit,
		)?;

		ctx.emit(Event::BridgeRollupWithdrawal {
			token: request.token,
			amount: request.amount,
			recipient: request.recipient,
			gas_limit: params.gas_limit,
			fee,
		});

		info!(
			"Initiated withdrawal of {} of {} via gateway {}",
			request.amount, request.token, gateway
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::RollupWithdrawal,
			token: request.token,
			amount_sent: request.amount,
			min_amount_received: request.amount,
			native_fee: fee,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::simulated::SimulatedGatewayRouter;
	use topup_storage::MemoryLedger;
	use topup_types::{BridgeParams, Ledger, TokenRoute, U256};

	const FACTORY: Address = Address::repeat_byte(0xFA);
	const DAI: Address = Address::repeat_byte(0xDA);
	const ROUTER: Address = Address::repeat_byte(0x70);
	const GATEWAY: Address = Address::repeat_byte(0x71);

	fn setup() -> (RollupWithdrawalAdapter, Arc<SimulatedGatewayRouter>) {
		let router = Arc::new(
			SimulatedGatewayRouter::new(ROUTER)
				.with_gateway(DAI, GATEWAY)
				.with_fees(U256::from(100), U256::from(2)),
		);
		let adapter = RollupWithdrawalAdapter::new(
			Address::repeat_byte(0xA4),
			Contracts::new().with(ROUTER, router.clone() as Arc<dyn GatewayRouter>),
		);
		(adapter, router)
	}

	fn route(router: Address) -> TokenRoute {
		TokenRoute::new(
			Address::repeat_byte(0xA4),
			Address::repeat_byte(0xBE),
			0,
			BridgeParams::RollupWithdrawal(RollupWithdrawalParams {
				gateway_router: router,
				gas_limit: 50,
			}),
		)
	}

	#[test]
	fn test_withdraws_exact_amount() {
		let (adapter, router) = setup();
		let mut ledger = MemoryLedger::new();
		ledger.credit(DAI, FACTORY, U256::from(777)).unwrap();
		ledger.credit_native(FACTORY, U256::from(200)).unwrap();
		let route = route(ROUTER);
		let request = BridgeRequest::for_route(DAI, U256::from(777), &route);

		assert_eq!(
			adapter.get_bridge_fee(&request).unwrap().fee_amount,
			U256::from(200)
		);

		let receipt = {
			let mut ctx = FactoryContext::new(FACTORY, U256::from(200), &mut ledger);
			adapter.bridge(&mut ctx, &request).unwrap()
		};

		assert_eq!(receipt.amount_sent, U256::from(777));
		assert_eq!(receipt.min_amount_received, U256::from(777));
		assert_eq!(ledger.balance_of(DAI, FACTORY), U256::ZERO);
		assert_eq!(ledger.native_balance_of(GATEWAY), U256::from(200));

		let withdrawals = router.withdrawals();
		assert_eq!(withdrawals.len(), 1);
		assert_eq!(withdrawals[0].to, Address::repeat_byte(0xBE));
		assert_eq!(withdrawals[0].gas_limit, 50);
	}

	#[test]
	fn test_fee_checked_against_attached_value() {
		let (adapter, _) = setup();
		let mut ledger = MemoryLedger::new();
		ledger.credit(DAI, FACTORY, U256::from(1)).unwrap();
		ledger.credit_native(FACTORY, U256::from(1_000)).unwrap();
		let route = route(ROUTER);
		let request = BridgeRequest::for_route(DAI, U256::from(1), &route);

		let mut ctx = FactoryContext::new(FACTORY, U256::from(199), &mut ledger);
		assert_eq!(
			adapter.bridge(&mut ctx, &request),
			Err(AdapterError::InsufficientNativeFee {
				required: U256::from(200),
				provided: U256::from(199),
			})
		);
	}

	#[test]
	fn test_unknown_router_and_gateway() {
		let (adapter, _) = setup();

		let route_unknown = route(Address::repeat_byte(0x01));
		let request = BridgeRequest::for_route(DAI, U256::from(1), &route_unknown);
		assert!(matches!(
			adapter.get_bridge_fee(&request),
			Err(AdapterError::InvalidGatewayRouter { .. })
		));

		let route = route(ROUTER);
		let request = BridgeRequest::for_route(Address::repeat_byte(0x02), U256::from(1), &route);
		assert!(matches!(
			adapter.get_bridge_fee(&request),
			Err(AdapterError::InvalidGateway { .. })
		));
	}
}
