//! Roles and the capability-checking seam

use crate::primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Deploys instances, configures routes and recovers funds
	TopUpFactoryAdmin,
	Pauser,
	Unpauser,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::TopUpFactoryAdmin => "TOPUP_FACTORY_ADMIN_ROLE",
			Role::Pauser => "PAUSER",
			Role::Unpauser => "UNPAUSER",
		}
	}

	/// Role identifier as the role service stores it
	pub fn id(&self) -> B256 {
		keccak256(self.as_str())
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Capability check consulted before every privileged operation
pub trait RoleService: Send + Sync {
	fn has_role(&self, role: Role, account: Address) -> bool;
}
