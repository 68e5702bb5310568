//! Caller identity resolved from the `x-api-key` header

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use topup_types::Address;
use tracing::debug;

use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Account a request acts as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Address);

impl FromRequestParts<AppState> for Caller {
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let key = parts
			.headers
			.get(API_KEY_HEADER)
			.and_then(|v| v.to_str().ok());
		let account = state.account_for(key);
		if key.is_some() && account.is_zero() {
			debug!("Unknown API key, acting as the zero address");
		}
		Ok(Caller(account))
	}
}
