//! Ownership and containment graph for items, backpacks and characters.
//!
//! `satchel-core` keeps every item in exactly one place: on the ground, inside
//! a backpack, or anchored to a slot of a character. The [`World`] arena owns
//! all nodes; the methods in [`engine`] are the only way to rewrite links and
//! they always update both sides of a link together, validating first so that
//! a failed operation leaves the graph untouched.
//!
//! Identification numbers are issued through an injected [`Registry`], and
//! looting preferences through [`TreasurePolicy`], so concrete character and
//! item kinds live in downstream crates.
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod state;
pub mod sync;

pub use config::{CoreConfig, KindTuning, ValueRange};
pub use engine::{
    ContainmentRejection, InvariantViolation, OwnershipError, Placement, PurseOutcome, Rehome,
    TreasurePolicy, TreasureReport,
};
pub use error::{DomainError, ErrorSeverity};
pub use registry::{AnyId, IdPolicy, Registry, RegistryError};
pub use state::{
    Anchor, AnchorSpec, ArmorData, BackpackData, Character, CharacterId, CharacterSpec, GraphNode,
    Item, ItemCategory, ItemId, ItemKind, ItemSpec, KindMask, OwnerRef, PurseData, SlotId,
    WeaponData, World,
};
pub use sync::SharedWorld;
