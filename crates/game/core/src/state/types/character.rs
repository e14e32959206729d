//! Characters and their anchor slots.
//!
//! A character owns a fixed array of anchors decided at construction. Each anchor
//! accepts a subset of item categories (a belt may only take a purse) and holds
//! at most one item.

use arrayvec::ArrayVec;

use super::{ItemCategory, ItemId, KindMask, SlotId};
use crate::config::CoreConfig;

/// One named slot on a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    name: String,
    accepts: KindMask,
    pub(crate) item: Option<ItemId>,
}

impl Anchor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self) -> KindMask {
        self.accepts
    }

    pub fn item(&self) -> Option<ItemId> {
        self.item
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn admits(&self, category: ItemCategory) -> bool {
        self.accepts.accepts(category)
    }
}

/// Anchor layout entry used when spawning a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorSpec {
    pub name: String,
    pub accepts: KindMask,
}

impl AnchorSpec {
    pub fn new(name: impl Into<String>, accepts: KindMask) -> Self {
        Self {
            name: name.into(),
            accepts,
        }
    }

    /// A slot that takes anything a backpack could also take.
    pub fn gear(name: impl Into<String>) -> Self {
        Self::new(name, KindMask::GEAR)
    }
}

/// Item-holding entity with anchor slots, hit points and a carrying capacity.
///
/// # Invariants
///
/// - `hitpoints <= max_hitpoints`
/// - `dead ⇔ hitpoints == 0`; a dead character never fights
/// - the anchor count never changes after construction
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    name: String,
    pub(crate) hitpoints: u32,
    max_hitpoints: u32,
    pub(crate) fighting: bool,
    capacity: f32,
    pub(crate) anchors: ArrayVec<Anchor, { CoreConfig::MAX_ANCHORS }>,
}

impl Character {
    pub(crate) fn from_spec(spec: &CharacterSpec) -> Self {
        let anchors = spec
            .anchors
            .iter()
            .take(CoreConfig::MAX_ANCHORS)
            .map(|anchor| Anchor {
                name: anchor.name.clone(),
                accepts: anchor.accepts,
                item: None,
            })
            .collect();

        Self {
            name: spec.name.clone(),
            hitpoints: spec
                .hitpoints
                .unwrap_or(spec.max_hitpoints)
                .min(spec.max_hitpoints),
            max_hitpoints: spec.max_hitpoints,
            fighting: false,
            capacity: spec.capacity,
            anchors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.max_hitpoints
    }

    /// Quick check if character is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hitpoints > 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn is_fighting(&self) -> bool {
        self.fighting
    }

    /// Maximum aggregate weight across all anchored items.
    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    pub fn number_of_anchors(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchor(&self, slot: SlotId) -> Option<&Anchor> {
        self.anchors.get(slot.index())
    }

    pub fn anchors(&self) -> impl Iterator<Item = (SlotId, &Anchor)> {
        self.anchors
            .iter()
            .enumerate()
            .map(|(index, anchor)| (SlotId(index as u8), anchor))
    }

    /// Items hanging on anchors, in slot order.
    pub fn anchored_items(&self) -> impl Iterator<Item = (SlotId, ItemId)> + '_ {
        self.anchors()
            .filter_map(|(slot, anchor)| anchor.item.map(|item| (slot, item)))
    }

    /// Slot currently holding `item`, if any.
    pub fn slot_of(&self, item: ItemId) -> Option<SlotId> {
        self.anchored_items()
            .find(|(_, anchored)| *anchored == item)
            .map(|(slot, _)| slot)
    }
}

/// Construction input for a new character.
///
/// Kind-specific rules (hero names, prime hit points, ...) are checked by the
/// character kind before the `CharacterSpec` reaches the world; the world only enforces the
/// structural ones.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub name: String,
    pub max_hitpoints: u32,
    /// Starting hit points; defaults to `max_hitpoints`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hitpoints: Option<u32>,
    pub capacity: f32,
    pub anchors: Vec<AnchorSpec>,
}

impl CharacterSpec {
    pub fn new(name: impl Into<String>, max_hitpoints: u32, capacity: f32) -> Self {
        Self {
            name: name.into(),
            max_hitpoints,
            hitpoints: None,
            capacity,
            anchors: Vec::new(),
        }
    }

    /// Appends an anchor slot (builder pattern).
    pub fn anchor(mut self, anchor: AnchorSpec) -> Self {
        self.anchors.push(anchor);
        self
    }

    /// Appends `count` general-purpose slots (builder pattern).
    pub fn gear_slots(mut self, count: usize) -> Self {
        let start = self.anchors.len();
        self.anchors
            .extend((start..start + count).map(|index| AnchorSpec::gear(format!("slot {index}"))));
        self
    }

    pub fn with_hitpoints(mut self, hitpoints: u32) -> Self {
        self.hitpoints = Some(hitpoints);
        self
    }
}
