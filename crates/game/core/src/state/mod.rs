//! Authoritative ownership graph representation.
//!
//! This module owns the arena that stores every item and character. Nodes refer
//! to each other by stable handles ([`ItemId`], [`CharacterId`]) instead of
//! pointers; the engine (`crate::engine`) is the only place that rewrites the
//! links, always both sides at once.
pub mod types;

use std::collections::BTreeMap;

pub use types::{
    Anchor, AnchorSpec, ArmorData, BackpackData, Character, CharacterId, CharacterSpec, GraphNode,
    Item, ItemCategory, ItemId, ItemKind, ItemSpec, KindMask, OwnerRef, PurseData, SlotId,
    WeaponData,
};

use crate::config::CoreConfig;
use crate::engine::OwnershipError;
use crate::registry::Registry;

/// Arena holding all items and characters plus the identification registry.
#[derive(Debug)]
pub struct World {
    config: CoreConfig,
    registry: Registry,
    pub(crate) items: BTreeMap<ItemId, Item>,
    pub(crate) characters: BTreeMap<CharacterId, Character>,
    next_item: u32,
    next_character: u32,
}

impl World {
    /// Creates an empty world issuing identification numbers through `registry`.
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, CoreConfig::default())
    }

    pub fn with_config(registry: Registry, config: CoreConfig) -> Self {
        Self {
            config,
            registry,
            items: BTreeMap::new(),
            characters: BTreeMap::new(),
            next_item: 0,
            next_character: 0,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn item(&self, id: ItemId) -> Result<&Item, OwnershipError> {
        self.items.get(&id).ok_or(OwnershipError::UnknownItem { item: id })
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character, OwnershipError> {
        self.characters
            .get(&id)
            .ok_or(OwnershipError::UnknownCharacter { character: id })
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, OwnershipError> {
        self.items
            .get_mut(&id)
            .ok_or(OwnershipError::UnknownItem { item: id })
    }

    pub(crate) fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character, OwnershipError> {
        self.characters
            .get_mut(&id)
            .ok_or(OwnershipError::UnknownCharacter { character: id })
    }

    /// Returns an iterator over all items in handle order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Returns an iterator over all characters in handle order.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters.iter().map(|(id, character)| (*id, character))
    }

    /// Looks up an item by category and identification number.
    pub fn find_item(&self, category: ItemCategory, id: u64) -> Option<ItemId> {
        self.items()
            .find(|(_, item)| item.category() == category && item.id() == id)
            .map(|(handle, _)| handle)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a free item from `spec`.
    ///
    /// The identification number is validated and reserved through the registry;
    /// an invalid weight falls back to the category default.
    pub fn create_item(&mut self, spec: ItemSpec) -> Result<ItemId, OwnershipError> {
        let category = spec.category();
        let tuning = *self.config.tuning(category);
        let id = self.registry.issue(category, spec.id)?;

        let weight = if spec.weight.is_finite() && spec.weight >= 0.0 {
            spec.weight
        } else {
            tuning.default_weight
        };

        let mut kind = spec.kind;
        let value = match &mut kind {
            ItemKind::Purse(purse) => {
                purse.ducats = purse.ducats.min(purse.capacity);
                purse.ducats.min(i32::MAX as u32) as i32
            }
            ItemKind::Backpack(backpack) => {
                // a new backpack starts empty whatever `ItemSpec` it was cloned from
                backpack.content.clear();
                spec.value
            }
            _ => spec.value,
        };

        let handle = ItemId(self.next_item);
        self.next_item += 1;
        self.items
            .insert(handle, Item::new(id, weight, value, tuning.value_range, kind));

        tracing::debug!(item = %handle, %category, id, weight, "item created");
        Ok(handle)
    }

    /// Creates an item already hanging on `slot` of `character`.
    ///
    /// Fails with [`OwnershipError::InvalidPlacement`] (and creates nothing) when
    /// the slot would not accept it.
    pub fn create_equipped(
        &mut self,
        spec: ItemSpec,
        character: CharacterId,
        slot: SlotId,
    ) -> Result<ItemId, OwnershipError> {
        let category = spec.category();
        let handle = self.create_item(spec)?;
        let placed = match self.equip(character, slot, handle) {
            Ok(placed) => placed,
            Err(err) => {
                self.discard_unplaced(handle, category);
                return Err(err);
            }
        };
        if !placed {
            self.discard_unplaced(handle, category);
            return Err(OwnershipError::InvalidPlacement {
                item: handle,
                character,
                slot,
            });
        }
        Ok(handle)
    }

    fn discard_unplaced(&mut self, handle: ItemId, category: ItemCategory) {
        if let Some(item) = self.items.remove(&handle) {
            self.registry.release(category, item.id());
            self.next_item -= 1;
        }
    }

    /// Spawns a character from `spec`.
    ///
    /// Structural checks only: a non-empty name, positive maximum hit points, a
    /// finite non-negative capacity and between one and
    /// [`CoreConfig::MAX_ANCHORS`] anchors.
    pub fn spawn_character(&mut self, spec: CharacterSpec) -> Result<CharacterId, OwnershipError> {
        let reason = if spec.name.trim().is_empty() {
            Some("name must not be empty")
        } else if spec.max_hitpoints == 0 {
            Some("maximum hit points must be positive")
        } else if !spec.capacity.is_finite() || spec.capacity < 0.0 {
            Some("capacity must be a non-negative number")
        } else if spec.anchors.is_empty() {
            Some("at least one anchor is required")
        } else if spec.anchors.len() > CoreConfig::MAX_ANCHORS {
            Some("too many anchors")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(OwnershipError::InvalidCharacter {
                name: spec.name,
                reason,
            });
        }

        let handle = CharacterId(self.next_character);
        self.next_character += 1;
        self.characters.insert(handle, Character::from_spec(&spec));

        tracing::debug!(character = %handle, name = %spec.name, "character spawned");
        Ok(handle)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}
