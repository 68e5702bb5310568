//! Chain primitives shared across the workspace

pub use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};

/// Sentinel address standing for the chain's native asset in token lists
pub const NATIVE_ASSET: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Basis-point denominator (100%)
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Ceiling for any route's slippage tolerance (2%)
pub const MAX_SLIPPAGE_BPS: u16 = 200;

/// Largest token precision amounts are scaled across; `10^36` still fits a `U256` product
pub const MAX_TOKEN_DECIMALS: u8 = 36;

/// Minimum amount that must arrive after applying `slippage_bps`.
///
/// Computes `floor(amount * (10000 - slippage_bps) / 10000)` without
/// overflowing for amounts close to `U256::MAX`. Slippage above 10000 bps is
/// treated as 100%.
pub fn deduct_slippage(amount: U256, slippage_bps: u16) -> U256 {
	let denominator = U256::from(BPS_DENOMINATOR);
	let kept = U256::from(BPS_DENOMINATOR.saturating_sub(slippage_bps));

	(amount / denominator) * kept + (amount % denominator) * kept / denominator
}

/// Caller identity and native value attached to a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEnv {
	pub caller: Address,
	pub value: U256,
}

impl CallEnv {
	/// A call without attached value
	pub fn new(caller: Address) -> Self {
		Self {
			caller,
			value: U256::ZERO,
		}
	}

	pub fn with_value(mut self, value: U256) -> Self {
		self.value = value;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_deduct_slippage_examples() {
		assert_eq!(deduct_slippage(U256::from(1000), 50), U256::from(995));
		assert_eq!(deduct_slippage(U256::from(1000), 40), U256::from(996));
		assert_eq!(deduct_slippage(U256::from(1_000_000), 0), U256::from(1_000_000));
		assert_eq!(deduct_slippage(U256::from(999), 200), U256::from(979));
		assert_eq!(deduct_slippage(U256::ZERO, 200), U256::ZERO);
	}

	#[test]
	fn test_deduct_slippage_does_not_overflow() {
		let min = deduct_slippage(U256::MAX, MAX_SLIPPAGE_BPS);
		assert!(min < U256::MAX);
		assert!(min > U256::MAX / U256::from(2));
	}

	#[test]
	fn test_full_slippage_keeps_nothing() {
		assert_eq!(deduct_slippage(U256::from(12345), 10_000), U256::ZERO);
		assert_eq!(deduct_slippage(U256::from(12345), u16::MAX), U256::ZERO);
	}

	#[test]
	fn test_native_asset_sentinel() {
		assert_eq!(
			NATIVE_ASSET.to_string().to_lowercase(),
			"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
		);
	}

	proptest! {
		#[test]
		fn prop_matches_naive_formula(amount in any::<u128>(), bps in 0u16..=MAX_SLIPPAGE_BPS) {
			let amount = U256::from(amount);
			let naive = amount * U256::from(10_000 - bps) / U256::from(10_000);
			prop_assert_eq!(deduct_slippage(amount, bps), naive);
		}

		#[test]
		fn prop_never_exceeds_amount(amount in any::<u128>(), bps in any::<u16>()) {
			let amount = U256::from(amount);
			prop_assert!(deduct_slippage(amount, bps) <= amount);
		}
	}
}
