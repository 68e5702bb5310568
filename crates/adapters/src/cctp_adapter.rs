//! Burn-and-mint adapter (CCTP v2)
//!
//! Burns the factory's balance through a token messenger; the same amount
//! is minted to the recipient on the destination domain, minus at most
//! `max_fee` kept by the relayer. No native fee is charged on the source side.

use crate::contracts::Contracts;
use crate::invalid_params;
use crate::protocols::{DepositForBurn, TokenMessenger};
use std::sync::Arc;
use topup_types::{
	AdapterError, AdapterInfo, AdapterKind, AdapterResult, Address, BridgeAdapter, BridgeFee,
	BridgeReceipt, BridgeRequest, CctpParams, Event, FactoryContext, B256, U256,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct CctpAdapter {
	info: AdapterInfo,
	messengers: Contracts<dyn TokenMessenger>,
}

impl CctpAdapter {
	pub fn new(address: Address, messengers: Contracts<dyn TokenMessenger>) -> Self {
		Self::with_info(
			AdapterInfo::new("cctp-v2", address, AdapterKind::Cctp, "CCTP Burn-and-Mint Adapter"),
			messengers,
		)
	}

	pub fn with_info(info: AdapterInfo, messengers: Contracts<dyn TokenMessenger>) -> Self {
		Self { info, messengers }
	}

	fn resolve<'r>(
		&self,
		request: &BridgeRequest<'r>,
	) -> AdapterResult<(&'r CctpParams, &Arc<dyn TokenMessenger>)> {
		let params = request
			.params
			.as_cctp()
			.ok_or_else(|| invalid_params(AdapterKind::Cctp, request.params))?;

		let messenger = self.messengers.get(params.token_messenger).ok_or(
			AdapterError::InvalidTokenMessenger {
				messenger: params.token_messenger,
			},
		)?;
		if !messenger.is_supported_burn_token(request.token) {
			return Err(AdapterError::UnsupportedBurnToken {
				messenger: params.token_messenger,
				token: request.token,
			});
		}
		if params.max_fee >= request.amount {
			return Err(AdapterError::InvalidMaxFee {
				max_fee: params.max_fee,
				amount: request.amount,
			});
		}

		Ok((params, messenger))
	}
}

impl BridgeAdapter for CctpAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.info
	}

	fn get_bridge_fee(&self, request: &BridgeRequest<'_>) -> AdapterResult<BridgeFee> {
		self.resolve(request)?;
		Ok(BridgeFee::free())
	}

	fn bridge(
		&self,
		ctx: &mut FactoryContext<'_>,
		request: &BridgeRequest<'_>,
	) -> AdapterResult<BridgeReceipt> {
		debug!(
			"CCTP adapter bridging {} of {} to {}",
			request.amount, request.token, request.recipient
		);

		let (params, messenger) = self.resolve(request)?;
		let mint_recipient = request.recipient.into_word();

		ctx.approve(request.token, messenger.address(), request.amount);
		let call = ctx.call(messenger.address(), U256::ZERO)?;
		let nonce = messenger.deposit_for_burn(
			call,
			&DepositForBurn {
				amount: request.amount,
				destination_domain: params.destination_domain,
				mint_recipient,
				burn_token: request.token,
				destination_caller: B256::ZERO,
				max_fee: params.max_fee,
				min_finality_threshold: params.min_finality_threshold,
			},
		)?;

		ctx.emit(Event::BridgeCctp {
			destination_domain: params.destination_domain,
			recipient: mint_recipient,
			token: request.token,
			amount: request.amount,
			max_fee: params.max_fee,
			min_finality_threshold: params.min_finality_threshold,
		});

		info!(
			"Burned {} of {} for domain {} (nonce {})",
			request.amount, request.token, params.destination_domain, nonce
		);

		Ok(BridgeReceipt {
			kind: AdapterKind::Cctp,
			token: request.token,
			amount_sent: request.amount,
			min_amount_received: request.amount - params.max_fee,
			native_fee: U256::ZERO,
		})
	}
}
