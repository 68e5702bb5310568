//! OFT transfer adapter (LayerZero v2)

use crate::contracts::Contracts;
use crate::protocols::{OftEndpoint, SendParam};
use crate::{ensure_native_fee, invalid_params};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, Bytes, Event, FactoryContext, OftParams,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct OftAdapter {
	info: AdapterInfo,
	ofts: Contracts<dyn OftEndpoint>,
}

impl OftAdapter {
	pub fn new(address: Address, ofts: Contracts<dyn OftEndpoint>) -> Self {
		Self::with_info(
			AdapterInfo::new("oft-v2", address, AdapterKind::Oft, "LayerZero OFT Adapter"),
			ofts,
		)
	}

	pub fn with_info(info: AdapterInfo, ofts: Contracts<dyn OftEndpoint>) -> Self {
		Self { info, ofts }
	}

	fn resolve<'r>(
		&self,
		request: &BridgeRequest<'r>,
	) -> AdapterResult<(&'r OftParams, &Arc<dyn OftEndpoint>)> {
		let params = request
			.params
			.as_oft()
			.ok_or_else(|| invalid_params(AdapterKind::Oft, request.params))?;

		let oft = self
			.ofts
			.get(params.oft)
			.filter(|oft| oft.token() == request.token)
			.ok_or(AdapterError::InvalidOft {
				oft: params.oft,
				token: request.token,
			})?;

		Ok((params, oft))
	}

	fn send_param(request: &BridgeRequest<'_>, params: &OftParams) -> SendParam {
		SendParam {
			dst_eid: params.destination_endpoint_id,
			to: request.recipient.into_word(),
			amount_ld: request.amount,
			min_amount_ld: request.min_amount(),
			extra_options: Bytes::new(),
			compose_msg: Bytes::new(),
			oft_cmd: Bytes::new(),
		}
	}
}

impl BridgeAdapter for OftAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		let (params, oft) = self.resolve(request)?;
		let fee = oft.quote_send(&Self::send_param(request, params), false)?;
		Ok(BridgeFee::native(fee.native_fee))
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"OFT adapter bridging {} of {} to {}",
			request.amount, request.token, request.recipient
		);

		let (params, oft) = self.resolve(request)?;
		let send_param = Self::send_param(request, params);

		let (_, quoted) = oft.quote_oft(&send_param)?;
		if quoted.amount_received_ld < send_param.min_amount_ld {
			return Err(AdapterError::InsufficientMinAmount {
				min_amount: send_param.min_amount_ld,
				amount_received: quoted.amount_received_ld,
			});
		}

		let fee = oft.quote_send(&send_param, false)?;
		ensure_native_fee(ctx, fee.native_fee)?;

		if oft.approval_required() {
			ctx.approve(request.token, oft.address(), request.amount);
		}
		let refund_address = ctx.factory();
		let call = ctx.call(oft.address(), fee.native_fee)?;
		let (messaging, receipt) = oft.send(call, &send_param, &fee, refund_address)?;

		ctx.emit(Event::BridgeOft {
			token: request.token,
			amount: receipt.amount_sent_ld,
			min_amount: send_param.min_amount_ld,
			destination_endpoint_id: params.destination_endpoint_id,
			recipient: request.recipient,
			guid: messaging.guid,
		});

		info!(
			"Sent {} of {} through OFT {} to endpoint {}",
			receipt.amount_sent_ld, request.token, params.oft, params.destination_endpoint_id
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::Oft,
			token: request.token,
			amount_sent: receipt.amount_sent_ld,
			min_amount_received: send_param.min_amount_ld,
			native_fee: fee.native_fee,
		})
	}
}
