//! Vault-share teller adapter
//!
//! Bridges vault shares 1:1 through the vault's teller, paying the
//! messaging fee in native value.

use crate::contracts::Contracts;
use crate::protocols::Teller;
use crate::{ensure_native_fee, invalid_params};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, Event, FactoryContext, TellerParams, NATIVE_ASSET,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct TellerAdapter {
	info: AdapterInfo,
	tellers: Contracts<dyn Teller>,
}

impl TellerAdapter {
	pub fn new(address: Address, tellers: Contracts<dyn Teller>) -> Self {
		Self::with_info(
			AdapterInfo::new("teller-v1", address, AdapterKind::Teller, "Vault Teller Adapter"),
			tellers,
		)
	}

	pub fn with_info(info: AdapterInfo, tellers: Contracts<dyn Teller>) -> Self {
		Self { info, tellers }
	}

	fn resolve<'r>(
		&self,
		request: &BridgeRequest<'r>,
	) -> AdapterResult<(&'r TellerParams, &Arc<dyn Teller>)> {
		let params = request
			.params
			.as_teller()
			.ok_or_else(|| invalid_params(AdapterKind::Teller, request.params))?;

		let teller = self
			.tellers
			.get(params.teller)
			.filter(|teller| teller.vault() == request.token)
			.ok_or(AdapterError::InvalidTeller {
				teller: params.teller,
				token: request.token,
			})?;

		Ok((params, teller))
	}
}

impl BridgeAdapter for TellerAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		let (params, teller) = self.resolve(request)?;
		let fee = teller.preview_fee(
			request.amount,
			request.recipient,
			&params.bridge_data,
			NATIVE_ASSET,
		)?;
		Ok(BridgeFee::native(fee))
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"Teller adapter bridging {} shares of {} to {}",
			request.amount, request.token, request.recipient
		);

		let (params, teller) = self.resolve(request)?;
		let fee = teller.preview_fee(
			request.amount,
			request.recipient,
			&params.bridge_data,
			NATIVE_ASSET,
		)?;
		ensure_native_fee(ctx, fee)?;

		ctx.approve(request.token, teller.address(), request.amount);
		let call = ctx.call(teller.address(), fee)?;
		let message_id = teller.bridge(
			call,
			request.amount,
			request.recipient,
			&params.bridge_data,
			NATIVE_ASSET,
			fee,
		)?;

		ctx.emit(Event::BridgeTeller {
			token: request.token,
			shares: request.amount,
			recipient: request.recipient,
			fee,
			message_id,
		});

		info!(
			"Bridged {} shares of {} through teller {} (message {})",
			request.amount, request.token, params.teller, message_id
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::Teller,
			token: request.token,
			amount_sent: request.amount,
			min_amount_received: request.amount,
			native_fee: fee,
		})
	}
}
