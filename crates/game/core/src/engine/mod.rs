//! Ownership graph operations.
//!
//! All mutation of the graph is implemented here as methods on
//! [`World`](crate::World), grouped by concern:
//!
//! - `holder`: read-only resolution of who ultimately holds an item
//! - `aggregate`: recursive weight/value totals and best-item queries
//! - `containment`: backpack admission control
//! - `transfer`: drop, move, terminate and the internal link rewriting
//! - `anchors`: equip, unequip, pick up, hit points
//! - `treasure`: looting corpses
//! - `purse`: ducat handling
//! - `invariants`: whole-graph audit
//!
//! Each operation validates before it mutates, so an `Err` always leaves the
//! graph untouched.
mod aggregate;
mod anchors;
mod containment;
mod error;
mod holder;
mod invariants;
mod purse;
mod transfer;
mod treasure;

pub use anchors::{Placement, Rehome};
pub use error::{ContainmentRejection, OwnershipError};
pub use invariants::InvariantViolation;
pub use purse::PurseOutcome;
pub use treasure::{TreasurePolicy, TreasureReport};
