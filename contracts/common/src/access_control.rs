//! Access Control Module
//!
//! Two-level role hierarchy for a pool instance.
//!
//! ## Key Features
//!
//! - **Admin**: self-administering root role, held by the pool creator
//! - **Manager**: administered by Admin, supplied at construction
//! - **Distributor**: administered by Manager, allowed to deposit rewards
//! - **Self-renounce**: any holder may drop its own role without admin rights
//!
//! Re-granting a held role, revoking an unheld role and renouncing an unheld
//! role are no-ops that emit nothing.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::roles::{
    ADMIN_ROLE_ID, ADMIN_ROLE_NAME, DISTRIBUTOR_ROLE_NAME, MANAGER_ROLE_NAME, ROLE_COUNT,
};
use crate::events::{EventLog, PoolEvent};
use crate::types::{Address, RoleId};
use crate::{BTreeSet, PoolError, PoolResult, Vec};

// ============================================================================
// Types
// ============================================================================

/// Pool roles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    BorshSerialize, BorshDeserialize,
)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum Role {
    /// Root role, administers itself and Manager
    Admin = 0,
    /// Administers Distributor
    Manager = 1,
    /// May deposit rewards
    Distributor = 2,
}

impl Role {
    /// All roles in table order
    pub const ALL: [Role; ROLE_COUNT] = [Role::Admin, Role::Manager, Role::Distributor];

    fn index(self) -> usize {
        self as usize
    }

    /// Canonical role name
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_ROLE_NAME,
            Role::Manager => MANAGER_ROLE_NAME,
            Role::Distributor => DISTRIBUTOR_ROLE_NAME,
        }
    }

    /// Stable 32-byte identifier
    ///
    /// Admin is the all-zero id; other roles hash their canonical name.
    pub fn id(&self) -> RoleId {
        match self {
            Role::Admin => ADMIN_ROLE_ID,
            _ => Sha256::digest(self.name().as_bytes()).into(),
        }
    }

    /// Resolve an identifier back to its role
    pub fn from_id(id: &RoleId) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.id() == *id)
    }

    /// Role whose holders administer this role by default
    pub fn default_admin(&self) -> Role {
        match self {
            Role::Admin | Role::Manager => Role::Admin,
            Role::Distributor => Role::Manager,
        }
    }
}

/// Role assignments plus the role -> admin-role lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    members: [BTreeSet<Address>; ROLE_COUNT],
    admins: [Role; ROLE_COUNT],
}

impl RoleTable {
    /// Seed the table: `admin` holds Admin, `manager` holds Manager
    pub fn new(admin: Address, manager: Address) -> Self {
        let mut table = Self {
            members: [BTreeSet::new(), BTreeSet::new(), BTreeSet::new()],
            admins: [
                Role::Admin.default_admin(),
                Role::Manager.default_admin(),
                Role::Distributor.default_admin(),
            ],
        };
        table.members[Role::Admin.index()].insert(admin);
        table.members[Role::Manager.index()].insert(manager);
        table
    }

    /// Check if `account` holds `role`
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members[role.index()].contains(account)
    }

    /// Role that administers `role`
    pub fn role_admin(&self, role: Role) -> Role {
        self.admins[role.index()]
    }

    /// Fail with `Unauthorized` unless `caller` holds `role`
    pub fn check_role(&self, role: Role, caller: &Address) -> PoolResult<()> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(PoolError::Unauthorized { role, caller: *caller })
        }
    }

    /// Number of accounts holding `role`
    pub fn member_count(&self, role: Role) -> usize {
        self.members[role.index()].len()
    }
}

// ============================================================================
// Core Access Control Functions
// ============================================================================

/// Grant `role` to `account`; caller must hold the role's admin role
///
/// Returns `false` when `account` already held the role.
pub fn grant_role(
    table: &mut RoleTable,
    events: &mut EventLog,
    caller: Address,
    role: Role,
    account: Address,
) -> PoolResult<bool> {
    table.check_role(table.role_admin(role), &caller)?;

    let granted = table.members[role.index()].insert(account);
    if granted {
        events.emit(PoolEvent::RoleGranted { role, account, sender: caller });
    }
    Ok(granted)
}

/// Revoke `role` from `account`; caller must hold the role's admin role
///
/// Returns `false` when `account` did not hold the role.
pub fn revoke_role(
    table: &mut RoleTable,
    events: &mut EventLog,
    caller: Address,
    role: Role,
    account: Address,
) -> PoolResult<bool> {
    table.check_role(table.role_admin(role), &caller)?;

    let revoked = table.members[role.index()].remove(&account);
    if revoked {
        events.emit(PoolEvent::RoleRevoked { role, account, sender: caller });
    }
    Ok(revoked)
}

/// Drop `role` from `account`; only `account` itself may do this
pub fn renounce_role(
    table: &mut RoleTable,
    events: &mut EventLog,
    caller: Address,
    role: Role,
    account: Address,
) -> PoolResult<bool> {
    if caller != account {
        return Err(PoolError::RenounceNotSelf { account, caller });
    }

    let renounced = table.members[role.index()].remove(&account);
    if renounced {
        events.emit(PoolEvent::RoleRevoked { role, account, sender: account });
    }
    Ok(renounced)
}

/// Get all roles held by an address
pub fn roles_of(table: &RoleTable, account: &Address) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| table.has_role(*role, account))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
