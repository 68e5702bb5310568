//! TopUp Service
//!
//! The bridging-orchestration core: the collector factory, the deposit
//! collectors it deploys, the native asset gateway and the node bundling
//! them with the ledger.

pub mod collector;
pub mod factory;
pub mod gateway;
pub mod node;

pub use collector::{DepositCollector, SweptBalance, COLLECTOR_CODE_ID};
pub use factory::CollectorFactory;
pub use gateway::NativeAssetGateway;
pub use node::BridgeNode;
