//! Token route and bridge handlers

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use serde::{Deserialize, Serialize};
use topup_types::{Address, BridgeReceipt, CallEnv, FactoryError, TokenRoute, U256};
use tracing::{debug, info};

use crate::caller::Caller;
use crate::handlers::common::{error_response, factory_error, parse_address, HandlerError};
use crate::state::AppState;

/// Body of a bridge call; `value` is the native value attached to pay fees
#[derive(Debug, Default, Deserialize)]
pub struct BridgeBody {
	#[serde(default)]
	pub value: U256,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeeResponse {
	pub token: Address,
	pub fee_token: Address,
	pub fee_amount: U256,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupportedResponse {
	pub token: Address,
	pub supported: bool,
}

/// Parallel token and route lists, applied all-or-nothing
#[derive(Debug, Serialize, Deserialize)]
pub struct SetRoutesBody {
	pub tokens: Vec<Address>,
	pub routes: Vec<TokenRoute>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetRoutesResponse {
	pub updated: usize,
}

/// POST /api/v1/tokens/{token}/bridge
pub async fn bridge_token(
	State(state): State<AppState>,
	Caller(caller): Caller,
	Path(token): Path<String>,
	body: Option<Json<BridgeBody>>,
) -> Result<Json<BridgeReceipt>, HandlerError> {
	let token = parse_address("token", &token)?;
	let Json(body) = body.unwrap_or_default();
	debug!("Bridge requested for {} by {} with value {}", token, caller, body.value);

	let mut node = state.node.lock().await;
	let receipt = node
		.bridge(&CallEnv::new(caller).with_value(body.value), token)
		.map_err(factory_error)?;
	Ok(Json(receipt))
}

/// GET /api/v1/tokens/{token}/fee
pub async fn get_bridge_fee(
	State(state): State<AppState>,
	Path(token): Path<String>,
) -> Result<Json<FeeResponse>, HandlerError> {
	let token = parse_address("token", &token)?;
	let node = state.node.lock().await;
	let fee = node.get_bridge_fee(token).map_err(factory_error)?;
	Ok(Json(FeeResponse {
		token,
		fee_token: fee.fee_token,
		fee_amount: fee.fee_amount,
	}))
}

/// GET /api/v1/tokens/{token}/route
pub async fn get_token_route(
	State(state): State<AppState>,
	Path(token): Path<String>,
) -> Result<Json<TokenRoute>, HandlerError> {
	let token = parse_address("token", &token)?;
	let node = state.node.lock().await;
	node.factory()
		.token_route(token)
		.cloned()
		.map(Json)
		.ok_or_else(|| factory_error(FactoryError::TokenConfigNotSet { token }))
}

/// GET /api/v1/tokens/{token}/supported
pub async fn is_token_supported(
	State(state): State<AppState>,
	Path(token): Path<String>,
) -> Result<Json<SupportedResponse>, HandlerError> {
	let token = parse_address("token", &token)?;
	let node = state.node.lock().await;
	Ok(Json(SupportedResponse {
		token,
		supported: node.factory().is_token_supported(token),
	}))
}

/// PUT /api/v1/routes
pub async fn set_token_routes(
	State(state): State<AppState>,
	Caller(caller): Caller,
	Json(body): Json<SetRoutesBody>,
) -> Result<Json<SetRoutesResponse>, HandlerError> {
	if body.tokens.is_empty() {
		return Err(error_response(
			StatusCode::BAD_REQUEST,
			"EMPTY_ROUTES",
			"At least one token route is required",
		));
	}

	let mut node = state.node.lock().await;
	node.set_token_route(caller, &body.tokens, &body.routes)
		.map_err(factory_error)?;
	info!("{} token route(s) updated by {}", body.tokens.len(), caller);
	Ok(Json(SetRoutesResponse {
		updated: body.tokens.len(),
	}))
}
