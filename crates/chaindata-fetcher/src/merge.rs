//! Reconciliation of a fetch outcome with the previously cached value.
//!
//! The policy:
//! - A clean (complete) fetch is authoritative: it replaces the previous
//!   value wholesale.
//! - A degraded fetch is merged per contract with the previous value as a
//!   set union, so a rate-limited partial response never erases previously
//!   known holdings.
//! - A hard failure never reaches this module; the caller propagates the
//!   error and leaves the cache untouched.
//!
//! Whether the reconciled value is persisted is the service's decision
//! (an empty result with no previous entry is returned but not written).

use chaindata_types::Inventory;

use crate::provider::FetchOutcome;

/// Combine the previous cached inventory with a new fetch outcome.
pub fn reconcile_inventory(
    previous: Option<&Inventory>,
    outcome: FetchOutcome<Inventory>,
) -> Inventory {
    match outcome {
        FetchOutcome::Complete(new) => new,
        FetchOutcome::Degraded(partial) => match previous {
            Some(prev) => prev.union_with(&partial),
            None => Inventory::new().union_with(&partial),
        },
    }
}
