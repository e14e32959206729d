//! Item-related state types.
//!
//! This module contains the item node of the ownership graph:
//! - ItemCategory / KindMask: the closed set of item kinds
//! - ItemKind: kind-specific payload (weapon damage, backpack content, ...)
//! - Item: the node itself (identification, weight, value, owner, terminated flag)
//! - ItemSpec: construction input consumed by [`World::create_item`](crate::World::create_item)

use std::collections::BTreeSet;

use bitflags::bitflags;

use super::{ItemId, OwnerRef};
use crate::config::ValueRange;

/// The closed set of item kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Backpack,
    Purse,
}

impl ItemCategory {
    /// Single-bit mask for this category.
    pub const fn mask(self) -> KindMask {
        match self {
            Self::Weapon => KindMask::WEAPON,
            Self::Armor => KindMask::ARMOR,
            Self::Backpack => KindMask::BACKPACK,
            Self::Purse => KindMask::PURSE,
        }
    }

    /// Weapons and armor rot away when left on a corpse.
    pub const fn decays(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor)
    }
}

bitflags! {
    /// Set of item categories an anchor slot accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct KindMask: u8 {
        const WEAPON   = 1 << 0;
        const ARMOR    = 1 << 1;
        const BACKPACK = 1 << 2;
        const PURSE    = 1 << 3;
    }
}

impl KindMask {
    /// Everything except purses.
    pub const GEAR: Self = Self::WEAPON.union(Self::ARMOR).union(Self::BACKPACK);

    #[inline]
    pub const fn accepts(self, category: ItemCategory) -> bool {
        self.contains(category.mask())
    }
}

/// Weapon-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub damage: u32,
}

/// Armor-specific data. `protection` never exceeds `max_protection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorData {
    pub protection: u32,
    pub max_protection: u32,
}

impl ArmorData {
    pub fn new(protection: u32, max_protection: u32) -> Self {
        Self {
            protection: protection.min(max_protection),
            max_protection,
        }
    }
}

/// Backpack-specific data.
///
/// `content` lists the items directly inside; it is only rewritten by the engine
/// together with each child's [`OwnerRef::Contained`] tag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackpackData {
    pub capacity: f32,
    pub(crate) content: BTreeSet<ItemId>,
}

impl BackpackData {
    pub fn new(capacity: f32) -> Self {
        Self {
            capacity: if capacity.is_finite() {
                capacity.max(0.0)
            } else {
                0.0
            },
            content: BTreeSet::new(),
        }
    }

    /// Items directly inside, in handle order.
    pub fn content(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.content.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Purse-specific data: a ducat pouch with a fixed capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurseData {
    pub capacity: u32,
    pub ducats: u32,
}

/// Item type with type-specific data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon(WeaponData),
    Armor(ArmorData),
    Backpack(BackpackData),
    Purse(PurseData),
}

impl ItemKind {
    pub const fn category(&self) -> ItemCategory {
        match self {
            Self::Weapon(_) => ItemCategory::Weapon,
            Self::Armor(_) => ItemCategory::Armor,
            Self::Backpack(_) => ItemCategory::Backpack,
            Self::Purse(_) => ItemCategory::Purse,
        }
    }

    /// The number an item is ranked by against others of its kind: damage,
    /// protection, capacity or ducats.
    pub fn ranking_key(&self) -> f64 {
        match self {
            Self::Weapon(weapon) => f64::from(weapon.damage),
            Self::Armor(armor) => f64::from(armor.protection),
            Self::Backpack(backpack) => f64::from(backpack.capacity),
            Self::Purse(purse) => f64::from(purse.ducats),
        }
    }
}

/// A node of the ownership graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    id: u64,
    weight: f32,
    value: i32,
    value_range: ValueRange,
    pub(crate) owner: OwnerRef,
    pub(crate) terminated: bool,
    pub(crate) kind: ItemKind,
}

impl Item {
    pub(crate) fn new(
        id: u64,
        weight: f32,
        value: i32,
        value_range: ValueRange,
        kind: ItemKind,
    ) -> Self {
        Self {
            id,
            weight,
            value: value_range.clamp(value),
            value_range,
            owner: OwnerRef::None,
            terminated: false,
            kind,
        }
    }

    /// Identification number, unique within this item's category.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Own weight, excluding anything carried inside.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Own value, excluding anything carried inside.
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    pub fn owner(&self) -> OwnerRef {
        self.owner
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn as_backpack(&self) -> Option<&BackpackData> {
        match &self.kind {
            ItemKind::Backpack(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_purse(&self) -> Option<&PurseData> {
        match &self.kind {
            ItemKind::Purse(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn backpack_mut(&mut self) -> Option<&mut BackpackData> {
        match &mut self.kind {
            ItemKind::Backpack(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn purse_mut(&mut self) -> Option<&mut PurseData> {
        match &mut self.kind {
            ItemKind::Purse(data) => Some(data),
            _ => None,
        }
    }

    /// Writes a new value, clamped into this item's range.
    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = self.value_range.clamp(value);
    }
}

/// Construction input for a new item.
///
/// `weight` is validated once: a negative or non-finite weight is replaced by
/// the category's default weight. `value` is clamped, never rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    /// Requested identification number; `None` asks the registry to generate one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<u64>,
    pub weight: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: i32,
    pub kind: ItemKind,
}

impl ItemSpec {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            id: None,
            weight: 0.0,
            value: 0,
            kind,
        }
    }

    pub fn weapon(damage: u32) -> Self {
        Self::new(ItemKind::Weapon(WeaponData { damage }))
    }

    pub fn armor(protection: u32, max_protection: u32) -> Self {
        Self::new(ItemKind::Armor(ArmorData::new(protection, max_protection)))
    }

    pub fn backpack(capacity: f32) -> Self {
        Self::new(ItemKind::Backpack(BackpackData::new(capacity)))
    }

    pub fn purse(capacity: u32, ducats: u32) -> Self {
        Self::new(ItemKind::Purse(PurseData { capacity, ducats }))
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gear_mask_excludes_purses() {
        assert!(KindMask::GEAR.accepts(ItemCategory::Backpack));
        assert!(KindMask::GEAR.accepts(ItemCategory::Weapon));
        assert!(!KindMask::GEAR.accepts(ItemCategory::Purse));
        assert!(KindMask::PURSE.accepts(ItemCategory::Purse));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Backpack".parse::<ItemCategory>(), Ok(ItemCategory::Backpack));
        assert_eq!(ItemCategory::Armor.to_string(), "armor");
    }

    #[test]
    fn armor_protection_is_capped() {
        let armor = ArmorData::new(30, 20);
        assert_eq!(armor.protection, 20);
    }

    #[test]
    fn ranking_key_per_kind() {
        assert_eq!(ItemKind::Weapon(WeaponData { damage: 7 }).ranking_key(), 7.0);
        assert_eq!(ItemKind::Armor(ArmorData::new(30, 20)).ranking_key(), 20.0);
        assert_eq!(ItemKind::Backpack(BackpackData::new(12.5)).ranking_key(), 12.5);
    }

    #[test]
    fn value_is_clamped_on_construction_and_write() {
        let mut item = Item::new(
            6,
            1.0,
            500,
            ValueRange::new(1, 200),
            ItemKind::Weapon(WeaponData { damage: 7 }),
        );
        assert_eq!(item.value(), 200);
        item.set_value(-3);
        assert_eq!(item.value(), 1);
    }

    #[test]
    fn backpack_capacity_is_sanitized() {
        assert_eq!(BackpackData::new(-4.0).capacity, 0.0);
        assert_eq!(BackpackData::new(f32::NAN).capacity, 0.0);
    }
}
