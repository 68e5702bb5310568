use axum::{
	routing::{get, post, put},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{
	bridge_token, deploy_instance, get_bridge_fee, get_deployed_instances, get_token_route,
	health, is_token_supported, pause, predict_instance, pull_from_instance, pull_funds,
	recover_funds, set_recovery_wallet, set_token_routes, status, unpause,
};
use crate::state::AppState;

/// Build the node router; state is applied by the caller with `.with_state(...)`
pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(256 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	Router::new()
		.route("/health", get(health))
		.route("/api/v1/status", get(status))
		.route("/api/v1/tokens/{token}/bridge", post(bridge_token))
		.route("/api/v1/tokens/{token}/fee", get(get_bridge_fee))
		.route("/api/v1/tokens/{token}/route", get(get_token_route))
		.route("/api/v1/tokens/{token}/supported", get(is_token_supported))
		.route("/api/v1/routes", put(set_token_routes))
		.route(
			"/api/v1/instances",
			post(deploy_instance).get(get_deployed_instances),
		)
		.route("/api/v1/instances/predict/{salt}", get(predict_instance))
		.route("/api/v1/instances/{address}/pull", post(pull_from_instance))
		.route("/api/v1/pull", post(pull_funds))
		.route("/api/v1/recover", post(recover_funds))
		.route("/api/v1/recovery-wallet", put(set_recovery_wallet))
		.route("/api/v1/pause", post(pause))
		.route("/api/v1/unpause", post(unpause))
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit)
}
