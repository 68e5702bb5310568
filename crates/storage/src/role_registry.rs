//! In-memory role registry

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use topup_types::{Address, Role, RoleService};
use tracing::info;

/// Role grants shared between the node and its configuration layer
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleRegistry {
	grants: Arc<DashMap<Role, HashSet<Address>>>,
}

impl MemoryRoleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn grant_role(&self, role: Role, account: Address) {
		if self.grants.entry(role).or_default().insert(account) {
			info!("Granted role {} to {}", role, account);
		}
	}

	pub fn revoke_role(&self, role: Role, account: Address) {
		if let Some(mut members) = self.grants.get_mut(&role) {
			if members.remove(&account) {
				info!("Revoked role {} from {}", role, account);
			}
		}
	}

	pub fn members(&self, role: Role) -> Vec<Address> {
		self.grants
			.get(&role)
			.map(|members| members.iter().copied().collect())
			.unwrap_or_default()
	}
}

impl RoleService for MemoryRoleRegistry {
	fn has_role(&self, role: Role, account: Address) -> bool {
		self.grants
			.get(&role)
			.is_some_and(|members| members.contains(&account))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_grant_and_revoke() {
		let registry = MemoryRoleRegistry::new();
		let admin = Address::repeat_byte(1);

		assert!(!registry.has_role(Role::TopUpFactoryAdmin, admin));
		registry.grant_role(Role::TopUpFactoryAdmin, admin);
		assert!(registry.has_role(Role::TopUpFactoryAdmin, admin));
		assert!(!registry.has_role(Role::Pauser, admin));

		registry.revoke_role(Role::TopUpFactoryAdmin, admin);
		assert!(!registry.has_role(Role::TopUpFactoryAdmin, admin));
	}

	#[test]
	fn test_clones_share_grants() {
		let registry = MemoryRoleRegistry::new();
		let shared = registry.clone();
		shared.grant_role(Role::Pauser, Address::repeat_byte(7));

		assert_eq!(registry.members(Role::Pauser), vec![Address::repeat_byte(7)]);
	}
}
