pub mod admin;
pub mod common;
pub mod funds;
pub mod health;
pub mod instances;
pub mod tokens;

pub use admin::{pause, status, unpause};
pub use funds::{pull_funds, recover_funds, set_recovery_wallet};
pub use health::health;
pub use instances::{deploy_instance, get_deployed_instances, predict_instance, pull_from_instance};
pub use tokens::{bridge_token, get_bridge_fee, get_token_route, is_token_supported, set_token_routes};
