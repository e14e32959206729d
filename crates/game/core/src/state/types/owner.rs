//! Owner tag carried by every item.

use super::{CharacterId, ItemId, SlotId};

/// Which node currently owns an item.
///
/// Exactly one variant is active. Whatever it points at holds the matching
/// back-reference (anchor slot or backpack content entry); the engine updates
/// both sides inside a single operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OwnerRef {
    /// Lying on the ground.
    #[default]
    None,
    /// Hanging on an anchor slot of a character.
    Anchored(CharacterId, SlotId),
    /// Directly inside a backpack.
    Contained(ItemId),
}

impl OwnerRef {
    #[inline]
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the anchoring character and slot, if anchored.
    pub const fn anchor(&self) -> Option<(CharacterId, SlotId)> {
        match *self {
            Self::Anchored(character, slot) => Some((character, slot)),
            _ => None,
        }
    }

    /// Returns the directly enclosing backpack, if contained.
    pub const fn container(&self) -> Option<ItemId> {
        match *self {
            Self::Contained(backpack) => Some(backpack),
            _ => None,
        }
    }
}
