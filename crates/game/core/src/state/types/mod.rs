//! Plain data types of the ownership graph.
mod character;
mod common;
mod item;
mod owner;

pub use character::{Anchor, AnchorSpec, Character, CharacterSpec};
pub use common::{CharacterId, GraphNode, ItemId, SlotId};
pub use item::{
    ArmorData, BackpackData, Item, ItemCategory, ItemKind, ItemSpec, KindMask, PurseData,
    WeaponData,
};
pub use owner::OwnerRef;
