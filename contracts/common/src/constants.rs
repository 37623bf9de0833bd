//! Protocol Constants
//!
//! Canonical role names and fixed identifiers shared by every pool instance.

/// Role naming
pub mod roles {
    /// Canonical name of the self-administering root role
    pub const ADMIN_ROLE_NAME: &str = "DEFAULT_ADMIN_ROLE";
    /// Canonical name of the role that manages distributors
    pub const MANAGER_ROLE_NAME: &str = "MANAGER_ROLE";
    /// Canonical name of the role allowed to deposit rewards
    pub const DISTRIBUTOR_ROLE_NAME: &str = "TEAM_ROLE";

    /// The admin role identifier is all zeroes
    pub const ADMIN_ROLE_ID: [u8; 32] = [0u8; 32];

    /// Number of roles in the hierarchy
    pub const ROLE_COUNT: usize = 3;
}

/// Logging targets
pub mod log_targets {
    /// Ledger operations
    pub const LEDGER: &str = "ethpool::ledger";
    /// Dispatcher and upgrade path
    pub const DISPATCHER: &str = "ethpool::dispatcher";
}
