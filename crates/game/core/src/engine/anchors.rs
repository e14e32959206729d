//! Character anchors, admission control and hit points.

use crate::engine::OwnershipError;
use crate::state::{Anchor, CharacterId, ItemCategory, ItemId, SlotId, World};

/// Where [`World::pick_up`] put an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Hung on a free anchor.
    Anchor(SlotId),
    /// Packed into one of the character's anchored backpacks.
    Backpack(ItemId),
}

/// Where [`World::unequip`] re-homed the removed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rehome {
    /// Into another anchored backpack of the same character.
    Backpack(ItemId),
    /// Nothing admitted it, so it went to the ground.
    Ground,
}

impl World {
    /// Returns true if `item` may be hung on `slot` of `character`.
    ///
    /// Items the character already holds can always be rearranged onto a
    /// compatible slot; anything else must be free (or lie on a corpse) and pass
    /// [`World::can_pick_up`].
    pub fn can_place_at(&self, character: CharacterId, slot: SlotId, item: ItemId) -> bool {
        let (Ok(owner), Ok(node)) = (self.character(character), self.item(item)) else {
            return false;
        };
        if node.is_terminated() {
            return false;
        }
        let Some(anchor) = owner.anchor(slot) else {
            return false;
        };
        if !anchor.admits(node.category()) {
            return false;
        }
        if self.is_held_by(item, character) {
            return true;
        }
        !self.is_held_by_living(item) && self.can_pick_up(character, item)
    }

    /// Returns true if `character` could take `item` without exceeding its capacity.
    pub fn can_pick_up(&self, character: CharacterId, item: ItemId) -> bool {
        let (Ok(owner), Ok(node)) = (self.character(character), self.item(item)) else {
            return false;
        };
        if node.is_terminated() {
            return false;
        }
        match self.holder(item) {
            Some(holder) if holder == character => return false,
            Some(_) if self.is_held_by_living(item) => return false,
            _ => {}
        }
        let (Ok(weight), Ok(carried)) = (self.total_weight(item), self.total_weight(character))
        else {
            return false;
        };
        weight <= owner.capacity() - carried
    }

    /// Hangs `item` on `slot`, first unequipping whatever occupies it.
    ///
    /// Returns `Ok(false)` without changing anything when [`World::can_place_at`]
    /// rejects the placement.
    pub fn equip(
        &mut self,
        character: CharacterId,
        slot: SlotId,
        item: ItemId,
    ) -> Result<bool, OwnershipError> {
        self.ensure_alive(character)?;
        self.item(item)?;

        if !self.can_place_at(character, slot, item) {
            tracing::trace!(character = %character, slot = %slot, item = %item, "equip rejected");
            return Ok(false);
        }

        let occupant = self.character(character)?.anchor(slot).and_then(Anchor::item);
        if occupant == Some(item) {
            return Ok(true);
        }
        if occupant.is_some() {
            self.unequip(character, slot)?;
        }
        self.bind_to_character(item, character, slot)?;
        Ok(true)
    }

    /// Empties `slot` and re-homes its item.
    ///
    /// The item goes into the first other anchored backpack (slot order) that
    /// admits it, or to the ground. Returns the removed item and where it went;
    /// `None` for an empty or nonexistent slot.
    pub fn unequip(
        &mut self,
        character: CharacterId,
        slot: SlotId,
    ) -> Result<Option<(ItemId, Rehome)>, OwnershipError> {
        self.ensure_alive(character)?;
        let Some(item) = self.character(character)?.anchor(slot).and_then(Anchor::item) else {
            return Ok(None);
        };

        let target = self
            .anchored_backpacks(character)
            .into_iter()
            .filter(|(other, _)| *other != slot)
            .map(|(_, backpack)| backpack)
            .find(|backpack| self.can_contain(*backpack, item));

        let rehome = match target {
            Some(backpack) => {
                self.move_to(item, backpack)?;
                Rehome::Backpack(backpack)
            }
            None => {
                self.drop(item)?;
                Rehome::Ground
            }
        };
        tracing::debug!(character = %character, slot = %slot, item = %item, to = ?rehome, "item unequipped");
        Ok(Some((item, rehome)))
    }

    /// Takes `item` into the first free compatible anchor, else into the first
    /// anchored backpack that admits it.
    ///
    /// Returns `Ok(None)` with no state change when the character cannot take
    /// the item or has nowhere to put it.
    pub fn pick_up(
        &mut self,
        character: CharacterId,
        item: ItemId,
    ) -> Result<Option<Placement>, OwnershipError> {
        self.ensure_alive(character)?;
        let category = self.item(item)?.category();

        if !self.can_pick_up(character, item) {
            tracing::trace!(character = %character, item = %item, "pick up rejected");
            return Ok(None);
        }

        let free_slots: Vec<SlotId> = self
            .character(character)?
            .anchors()
            .filter(|(_, anchor)| anchor.is_empty() && anchor.admits(category))
            .map(|(slot, _)| slot)
            .collect();
        for slot in free_slots {
            if self.can_place_at(character, slot, item) {
                self.bind_to_character(item, character, slot)?;
                return Ok(Some(Placement::Anchor(slot)));
            }
        }

        for (_, backpack) in self.anchored_backpacks(character) {
            if self.can_contain(backpack, item) {
                self.move_to(item, backpack)?;
                return Ok(Some(Placement::Backpack(backpack)));
            }
        }

        tracing::trace!(character = %character, item = %item, "no room to pick up");
        Ok(None)
    }

    /// Backpacks hanging directly on `character`'s anchors, in slot order.
    pub fn anchored_backpacks(&self, character: CharacterId) -> Vec<(SlotId, ItemId)> {
        let Some(owner) = self.characters.get(&character) else {
            return Vec::new();
        };
        owner
            .anchored_items()
            .filter(|(_, item)| {
                self.items
                    .get(item)
                    .is_some_and(|node| node.category() == ItemCategory::Backpack)
            })
            .collect()
    }

    /// Applies `amount` damage. Returns true if this blow killed the character.
    ///
    /// Damage to the dead is ignored. Dying clears the fighting flag.
    pub fn take_damage(&mut self, character: CharacterId, amount: u32) -> Result<bool, OwnershipError> {
        let owner = self.character_mut(character)?;
        if owner.is_dead() {
            return Ok(false);
        }
        owner.hitpoints = owner.hitpoints.saturating_sub(amount);
        if owner.is_dead() {
            owner.fighting = false;
            tracing::debug!(character = %character, "character died");
            return Ok(true);
        }
        Ok(false)
    }

    /// Restores up to `amount` hit points, capped at the maximum. Returns the new total.
    pub fn heal(&mut self, character: CharacterId, amount: u32) -> Result<u32, OwnershipError> {
        self.ensure_alive(character)?;
        let owner = self.character_mut(character)?;
        owner.hitpoints = owner
            .hitpoints
            .saturating_add(amount)
            .min(owner.max_hitpoints());
        Ok(owner.hitpoints)
    }

    /// Sets the fighting flag. The dead cannot start fighting.
    pub fn set_fighting(&mut self, character: CharacterId, fighting: bool) -> Result<(), OwnershipError> {
        let owner = self.character_mut(character)?;
        if fighting && owner.is_dead() {
            return Err(OwnershipError::DeadCharacter { character });
        }
        owner.fighting = fighting;
        Ok(())
    }

    pub(crate) fn ensure_alive(&self, character: CharacterId) -> Result<(), OwnershipError> {
        if self.character(character)?.is_dead() {
            return Err(OwnershipError::DeadCharacter { character });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AnchorSpec, CharacterSpec, ItemSpec, KindMask};

    fn adventurer(world: &mut World, slots: usize, capacity: f32) -> CharacterId {
        world
            .spawn_character(CharacterSpec::new("Adventurer", 30, capacity).gear_slots(slots))
            .unwrap()
    }

    #[test]
    fn pick_up_respects_capacity() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 5.0);
        let first = world.create_item(ItemSpec::weapon(3).with_weight(3.0)).unwrap();
        let second = world.create_item(ItemSpec::weapon(3).with_weight(3.0)).unwrap();

        assert_eq!(world.pick_up(hero, first), Ok(Some(Placement::Anchor(SlotId(0)))));
        assert_eq!(world.holder(first), Some(hero));
        assert_eq!(world.pick_up(hero, second), Ok(None));
        assert_eq!(world.holder(second), None);
    }

    #[test]
    fn pick_up_falls_back_to_anchored_backpack() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 50.0);
        let sack = world.create_item(ItemSpec::backpack(10.0).with_weight(1.0)).unwrap();
        let sword = world.create_item(ItemSpec::weapon(7).with_weight(2.0)).unwrap();

        world.pick_up(hero, sack).unwrap();
        assert_eq!(world.pick_up(hero, sword), Ok(Some(Placement::Backpack(sack))));
        assert!(world.contains(sack, sword));
        assert_eq!(world.holder(sword), Some(hero));
    }

    #[test]
    fn items_of_living_characters_cannot_be_taken() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 50.0);
        let thief = adventurer(&mut world, 1, 50.0);
        let sword = world.create_item(ItemSpec::weapon(7).with_weight(2.0)).unwrap();
        world.pick_up(hero, sword).unwrap();

        assert!(!world.can_pick_up(thief, sword));
        assert!(!world.can_place_at(thief, SlotId(0), sword));
        assert_eq!(world.equip(thief, SlotId(0), sword), Ok(false));
        assert_eq!(world.holder(sword), Some(hero));

        world.take_damage(hero, 100).unwrap();
        assert!(world.can_pick_up(thief, sword));
        assert_eq!(world.equip(thief, SlotId(0), sword), Ok(true));
        assert_eq!(world.holder(sword), Some(thief));
    }

    #[test]
    fn equip_swaps_occupant_into_backpack() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 2, 50.0);
        let sack = world.create_item(ItemSpec::backpack(10.0).with_weight(1.0)).unwrap();
        let sword = world.create_item(ItemSpec::weapon(7).with_weight(2.0)).unwrap();
        let axe = world.create_item(ItemSpec::weapon(9).with_weight(3.0)).unwrap();

        world.equip(hero, SlotId(0), sword).unwrap();
        world.equip(hero, SlotId(1), sack).unwrap();
        assert_eq!(world.equip(hero, SlotId(0), axe), Ok(true));

        assert_eq!(world.character(hero).unwrap().slot_of(axe), Some(SlotId(0)));
        assert!(world.contains(sack, sword));
        assert_eq!(world.holder(sword), Some(hero));
    }

    #[test]
    fn rearranging_held_items_skips_capacity_check() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 2, 4.0);
        let sword = world.create_item(ItemSpec::weapon(7).with_weight(4.0)).unwrap();
        world.equip(hero, SlotId(0), sword).unwrap();

        assert!(world.can_place_at(hero, SlotId(1), sword));
        assert_eq!(world.equip(hero, SlotId(1), sword), Ok(true));
        assert!(world.character(hero).unwrap().anchor(SlotId(0)).unwrap().is_empty());
        assert_eq!(world.character(hero).unwrap().slot_of(sword), Some(SlotId(1)));
    }

    #[test]
    fn unequip_without_backpack_drops_to_ground() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 50.0);
        let sack = world.create_item(ItemSpec::backpack(5.0).with_weight(1.0)).unwrap();
        let stone = world.create_item(ItemSpec::armor(1, 1).with_weight(3.0)).unwrap();
        world.move_to(stone, sack).unwrap();
        world.equip(hero, SlotId(0), sack).unwrap();
        assert_eq!(world.holder(stone), Some(hero));

        assert_eq!(world.unequip(hero, SlotId(0)), Ok(Some((sack, Rehome::Ground))));
        assert_eq!(world.holder(sack), None);
        assert_eq!(world.holder(stone), None);
        assert!(world.contains(sack, stone));
        assert_eq!(world.unequip(hero, SlotId(0)), Ok(None));
    }

    #[test]
    fn purse_only_slot_rejects_gear() {
        let mut world = World::default();
        let hero = world
            .spawn_character(
                CharacterSpec::new("Hero", 30, 50.0)
                    .anchor(AnchorSpec::new("belt", KindMask::PURSE))
                    .anchor(AnchorSpec::gear("back")),
            )
            .unwrap();
        let purse = world.create_item(ItemSpec::purse(100, 10)).unwrap();
        let sword = world.create_item(ItemSpec::weapon(5).with_weight(1.0)).unwrap();

        assert!(!world.can_place_at(hero, SlotId(0), sword));
        assert_eq!(world.pick_up(hero, sword), Ok(Some(Placement::Anchor(SlotId(1)))));
        assert_eq!(world.pick_up(hero, purse), Ok(Some(Placement::Anchor(SlotId(0)))));
        assert!(!world.can_place_at(hero, SlotId(9), purse));
    }

    #[test]
    fn dead_characters_cannot_transfer() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 50.0);
        let sword = world.create_item(ItemSpec::weapon(5).with_weight(1.0)).unwrap();
        assert_eq!(world.take_damage(hero, 10), Ok(false));
        assert_eq!(world.take_damage(hero, 25), Ok(true));
        assert_eq!(world.take_damage(hero, 25), Ok(false));

        let dead = OwnershipError::DeadCharacter { character: hero };
        assert_eq!(world.pick_up(hero, sword), Err(dead.clone()));
        assert_eq!(world.equip(hero, SlotId(0), sword), Err(dead.clone()));
        assert_eq!(world.unequip(hero, SlotId(0)), Err(dead.clone()));
        assert_eq!(world.heal(hero, 5), Err(dead.clone()));
        assert_eq!(world.set_fighting(hero, true), Err(dead));
    }

    #[test]
    fn healing_is_capped_and_death_stops_fighting() {
        let mut world = World::default();
        let hero = adventurer(&mut world, 1, 50.0);
        world.set_fighting(hero, true).unwrap();
        world.take_damage(hero, 20).unwrap();
        assert_eq!(world.heal(hero, 100), Ok(30));
        world.take_damage(hero, 30).unwrap();
        assert!(!world.character(hero).unwrap().is_fighting());
    }
}
