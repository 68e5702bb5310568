//! Deposit instance handlers

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use serde::{Deserialize, Serialize};
use topup_service::SweptBalance;
use topup_types::{Address, B256};

use crate::caller::Caller;
use crate::handlers::common::{factory_error, parse_address, parse_b256, HandlerError};
use crate::pagination::WindowQuery;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct DeployBody {
	pub salt: B256,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstanceResponse {
	pub salt: B256,
	pub instance: Address,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstancesResponse {
	pub instances: Vec<Address>,
	pub start: usize,
	pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct PullInstanceBody {
	pub tokens: Vec<Address>,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
	pub swept: Vec<SweptBalance>,
}

/// POST /api/v1/instances
pub async fn deploy_instance(
	State(state): State<AppState>,
	Caller(caller): Caller,
	Json(body): Json<DeployBody>,
) -> Result<(StatusCode, Json<InstanceResponse>), HandlerError> {
	let mut node = state.node.lock().await;
	let instance = node
		.deploy_instance(caller, body.salt)
		.map_err(factory_error)?;
	Ok((
		StatusCode::CREATED,
		Json(InstanceResponse {
			salt: body.salt,
			instance,
		}),
	))
}

/// GET /api/v1/instances?start=&n=
pub async fn get_deployed_instances(
	State(state): State<AppState>,
	Query(query): Query<WindowQuery>,
) -> Json<InstancesResponse> {
	let (start, n) = query.bounds();
	let node = state.node.lock().await;
	Json(InstancesResponse {
		instances: node.factory().deployed_instances(start, n),
		start,
		total: node.factory().instance_count(),
	})
}

/// GET /api/v1/instances/predict/{salt}
pub async fn predict_instance(
	State(state): State<AppState>,
	Path(salt): Path<String>,
) -> Result<Json<InstanceResponse>, HandlerError> {
	let salt = parse_b256("salt", &salt)?;
	let node = state.node.lock().await;
	Ok(Json(InstanceResponse {
		salt,
		instance: node.factory().predict_instance_address(salt),
	}))
}

/// POST /api/v1/instances/{address}/pull
pub async fn pull_from_instance(
	State(state): State<AppState>,
	Path(instance): Path<String>,
	Json(body): Json<PullInstanceBody>,
) -> Result<Json<SweepResponse>, HandlerError> {
	let instance = parse_address("instance", &instance)?;
	let mut node = state.node.lock().await;
	let swept = node
		.pull_funds_from_instance(&body.tokens, instance)
		.map_err(factory_error)?;
	Ok(Json(SweepResponse { swept }))
}
