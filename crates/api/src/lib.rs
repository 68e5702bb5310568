//! TopUp API
//!
//! Axum-based HTTP surface of the bridge node.

pub mod caller;
pub mod handlers;
pub mod pagination;
pub mod router;
pub mod state;

pub use caller::{Caller, API_KEY_HEADER};
pub use handlers::common::ErrorResponse;
pub use router::create_router;
pub use state::AppState;
