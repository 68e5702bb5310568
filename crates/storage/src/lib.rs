//! TopUp Storage
//!
//! In-memory state backends for the TopUp bridge: the asset ledger with its
//! transaction journal, the routing table, the deployed-instance registry and
//! the role registry.

pub mod instance_registry;
pub mod journal;
pub mod memory_ledger;
pub mod role_registry;
pub mod route_table;

pub use instance_registry::InstanceRegistry;
pub use journal::LedgerTx;
pub use memory_ledger::MemoryLedger;
pub use role_registry::MemoryRoleRegistry;
pub use route_table::RouteTable;
