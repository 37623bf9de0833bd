//! ETHPool Common Library
//!
//! Shared types, constants, errors, events and access control for the
//! ETHPool accounting engine.
//!
//! ## Modules
//!
//! - **Access Control**: Admin / Manager / Distributor role hierarchy
//! - **Events**: Append-only audit log of every successful mutation
//! - **Math**: Checked, truncating integer arithmetic
//! - **Errors**: One machine-matchable variant per failure condition
//!
//! This crate is `no_std` compatible when built without the default `std`
//! feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{collections::BTreeSet, vec::Vec};
#[cfg(feature = "std")]
pub use std::{collections::BTreeSet, vec::Vec};

pub mod access_control;
pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod types;

// Re-exports for convenience
pub use access_control::{grant_role, renounce_role, revoke_role, roles_of, Role, RoleTable};
pub use errors::*;
pub use events::*;
pub use math::*;
pub use types::*;
