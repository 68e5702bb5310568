use std::str::FromStr;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use topup_types::{Address, ErrorCategory, FactoryError, B256};
use tracing::warn;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

/// Error half of every handler result
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HandlerError {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

/// Map a factory failure onto its HTTP status by error category
pub fn factory_error(err: FactoryError) -> HandlerError {
	let status = match (&err, err.category()) {
		(FactoryError::TokenConfigNotSet { .. } | FactoryError::AdapterNotFound { .. }, _) => {
			StatusCode::NOT_FOUND
		},
		(_, ErrorCategory::Authorization) => StatusCode::FORBIDDEN,
		(_, ErrorCategory::Configuration) => StatusCode::BAD_REQUEST,
		(_, ErrorCategory::State) => StatusCode::CONFLICT,
		(_, ErrorCategory::Protocol) => StatusCode::UNPROCESSABLE_ENTITY,
	};
	if status != StatusCode::NOT_FOUND {
		warn!("Request failed with {}: {}", err.code(), err);
	}
	error_response(status, err.code(), err.to_string())
}

pub fn parse_address(field: &str, raw: &str) -> Result<Address, HandlerError> {
	Address::from_str(raw).map_err(|e| {
		error_response(
			StatusCode::BAD_REQUEST,
			"INVALID_ADDRESS",
			format!("Invalid {} '{}': {}", field, raw, e),
		)
	})
}

pub fn parse_b256(field: &str, raw: &str) -> Result<B256, HandlerError> {
	B256::from_str(raw).map_err(|e| {
		error_response(
			StatusCode::BAD_REQUEST,
			"INVALID_HASH",
			format!("Invalid {} '{}': {}", field, raw, e),
		)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use topup_types::{AdapterError, U256};

	#[test]
	fn test_status_by_category() {
		let cases = [
			(
				FactoryError::Unauthorized {
					role: topup_types::Role::TopUpFactoryAdmin,
					account: Address::ZERO,
				},
				StatusCode::FORBIDDEN,
			),
			(
				FactoryError::TokenConfigNotSet { token: Address::ZERO },
				StatusCode::NOT_FOUND,
			),
			(FactoryError::TokenCannotBeZeroAddress, StatusCode::BAD_REQUEST),
			(
				FactoryError::ZeroBalance { token: Address::ZERO },
				StatusCode::CONFLICT,
			),
			(
				FactoryError::Adapter(AdapterError::InsufficientMinAmount {
					min_amount: U256::from(996),
					amount_received: U256::from(995),
				}),
				StatusCode::UNPROCESSABLE_ENTITY,
			),
		];

		for (err, expected) in cases {
			let code = err.code();
			let (status, Json(body)) = factory_error(err);
			assert_eq!(status, expected);
			assert_eq!(body.error, code);
		}
	}

	#[test]
	fn test_parse_address() {
		assert!(parse_address("token", "0x1111111111111111111111111111111111111111").is_ok());

		let (status, Json(body)) = parse_address("token", "usdc").unwrap_err();
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body.error, "INVALID_ADDRESS");
	}
}
