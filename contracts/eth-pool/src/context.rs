//! Call Context
//!
//! Every mutating ledger entry point receives a `CallContext` naming the
//! caller and the route the call took. A ledger deployed behind a dispatcher
//! only accepts contexts carrying that dispatcher's token.

use std::sync::atomic::{AtomicU64, Ordering};

use ethpool_common::Address;

static NEXT_DISPATCHER_ID: AtomicU64 = AtomicU64::new(1);

/// Capability held by exactly one dispatcher
///
/// Cannot be constructed or cloned outside this crate.
#[derive(Debug)]
pub struct DispatchToken {
    id: u64,
}

impl DispatchToken {
    pub(crate) fn mint() -> Self {
        Self { id: NEXT_DISPATCHER_ID.fetch_add(1, Ordering::Relaxed) }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

/// How a call reached the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Straight to the ledger
    Direct,
    /// Forwarded by the dispatcher with the given id
    Delegated(u64),
}

/// Caller identity plus routing marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    caller: Address,
    route: Route,
}

impl CallContext {
    /// Context for a call made straight to the ledger
    pub fn direct(caller: Address) -> Self {
        Self { caller, route: Route::Direct }
    }

    /// Context for a call forwarded by the holder of `token`
    pub fn delegated(caller: Address, token: &DispatchToken) -> Self {
        Self { caller, route: Route::Delegated(token.id()) }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn route(&self) -> Route {
        self.route
    }
}
