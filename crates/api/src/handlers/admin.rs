//! Pause control and node status

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use topup_types::{AdapterInfo, Address};

use crate::caller::Caller;
use crate::handlers::common::{factory_error, HandlerError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PauseResponse {
	pub paused: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
	pub factory: Address,
	pub wrapped_native: Address,
	pub paused: bool,
	pub instance_count: usize,
	pub recovery_wallet: Option<Address>,
	pub gateway: Option<Address>,
	pub adapters: Vec<AdapterInfo>,
}

/// POST /api/v1/pause
pub async fn pause(
	State(state): State<AppState>,
	Caller(caller): Caller,
) -> Result<Json<PauseResponse>, HandlerError> {
	let mut node = state.node.lock().await;
	node.pause(caller).map_err(factory_error)?;
	Ok(Json(PauseResponse { paused: true }))
}

/// POST /api/v1/unpause
pub async fn unpause(
	State(state): State<AppState>,
	Caller(caller): Caller,
) -> Result<Json<PauseResponse>, HandlerError> {
	let mut node = state.node.lock().await;
	node.unpause(caller).map_err(factory_error)?;
	Ok(Json(PauseResponse { paused: false }))
}

/// GET /api/v1/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
	let node = state.node.lock().await;
	let factory = node.factory();
	let mut adapters: Vec<_> = factory
		.adapters()
		.get_all()
		.iter()
		.map(|a| a.adapter_info().clone())
		.collect();
	adapters.sort_by(|a, b| a.adapter_id.cmp(&b.adapter_id));

	Json(StatusResponse {
		factory: factory.address(),
		wrapped_native: factory.wrapped_native(),
		paused: factory.is_paused(),
		instance_count: factory.instance_count(),
		recovery_wallet: factory.recovery_wallet(),
		gateway: node.gateway().map(|g| g.address()),
		adapters,
	})
}
