//! Sweep and recovery handlers

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use topup_types::{Address, U256};

use crate::caller::Caller;
use crate::handlers::common::{factory_error, HandlerError};
use crate::handlers::instances::SweepResponse;
use crate::state::AppState;

/// Sweep of the instances in `[start, start + n)`, clamped to the number deployed
#[derive(Debug, Deserialize)]
pub struct PullBody {
	pub tokens: Vec<Address>,
	#[serde(default)]
	pub start: usize,
	#[serde(default)]
	pub n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecoverBody {
	pub token: Address,
	pub amount: U256,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecoveryWalletBody {
	pub wallet: Address,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecoveryResponse {
	pub token: Address,
	pub amount: U256,
	pub wallet: Address,
}

/// POST /api/v1/pull
pub async fn pull_funds(
	State(state): State<AppState>,
	Json(body): Json<PullBody>,
) -> Result<Json<SweepResponse>, HandlerError> {
	// Without `n` the window runs to the last instance
	let n = body.n.unwrap_or(usize::MAX);

	let mut node = state.node.lock().await;
	let swept = node
		.pull_funds(&body.tokens, body.start, n)
		.map_err(factory_error)?;
	Ok(Json(SweepResponse { swept }))
}

/// POST /api/v1/recover
pub async fn recover_funds(
	State(state): State<AppState>,
	Caller(caller): Caller,
	Json(body): Json<RecoverBody>,
) -> Result<Json<RecoveryResponse>, HandlerError> {
	let mut node = state.node.lock().await;
	node.recover_funds(caller, body.token, body.amount)
		.map_err(factory_error)?;
	// recovery succeeded, so the wallet is set
	let wallet = node.factory().recovery_wallet().unwrap_or_default();
	Ok(Json(RecoveryResponse {
		token: body.token,
		amount: body.amount,
		wallet,
	}))
}

/// PUT /api/v1/recovery-wallet
pub async fn set_recovery_wallet(
	State(state): State<AppState>,
	Caller(caller): Caller,
	Json(body): Json<RecoveryWalletBody>,
) -> Result<Json<RecoveryWalletBody>, HandlerError> {
	let mut node = state.node.lock().await;
	node.set_recovery_wallet(caller, body.wallet)
		.map_err(factory_error)?;
	Ok(Json(body))
}
