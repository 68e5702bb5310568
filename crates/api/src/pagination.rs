use serde::Deserialize;

pub const DEFAULT_WINDOW: usize = 25;
pub const MAX_WINDOW: usize = 100;

/// `?start=&n=` window for listing deployed instances
#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
	pub start: Option<usize>,
	pub n: Option<usize>,
}

impl WindowQuery {
	/// Effective `(start, n)` with `n` clamped to `1..=MAX_WINDOW`
	pub fn bounds(&self) -> (usize, usize) {
		(
			self.start.unwrap_or(0),
			self.n.unwrap_or(DEFAULT_WINDOW).clamp(1, MAX_WINDOW),
		)
	}
}
