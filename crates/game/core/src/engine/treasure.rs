//! Looting a corpse.
//!
//! The combat layer calls [`World::collect_treasures`] after a kill, passing the
//! collector's [`TreasurePolicy`]. Wanted items are picked up; unwanted weapons
//! and armor rot away, including those packed in unwanted backpacks, while the
//! backpacks and purses themselves stay on the corpse.

use crate::engine::{OwnershipError, Placement};
use crate::state::{CharacterId, ItemCategory, ItemId, World};

/// Kind-specific looting preference of a character.
pub trait TreasurePolicy {
    /// Returns true if `collector` wants to take `item` from a corpse.
    fn wants_to_take(&self, world: &World, collector: CharacterId, item: ItemId) -> bool;
}

impl<F> TreasurePolicy for F
where
    F: Fn(&World, CharacterId, ItemId) -> bool,
{
    fn wants_to_take(&self, world: &World, collector: CharacterId, item: ItemId) -> bool {
        self(world, collector, item)
    }
}

/// Outcome of a [`World::collect_treasures`] pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreasureReport {
    /// Items the collector took, with where each one went.
    pub taken: Vec<(ItemId, Placement)>,
    /// Wanted items that did not fit; they stay on the corpse.
    pub left_behind: Vec<ItemId>,
    /// Weapons and armor terminated because nobody wanted them.
    pub decayed: Vec<ItemId>,
}

impl World {
    /// Lets `collector` loot the anchored items of the dead `corpse`.
    pub fn collect_treasures(
        &mut self,
        collector: CharacterId,
        corpse: CharacterId,
        policy: &impl TreasurePolicy,
    ) -> Result<TreasureReport, OwnershipError> {
        self.ensure_alive(collector)?;
        let loot: Vec<ItemId> = {
            let body = self.character(corpse)?;
            if body.is_alive() {
                return Err(OwnershipError::NotACorpse { character: corpse });
            }
            body.anchored_items().map(|(_, item)| item).collect()
        };

        let mut report = TreasureReport::default();
        for item in loot {
            if policy.wants_to_take(self, collector, item) {
                match self.pick_up(collector, item)? {
                    Some(placement) => report.taken.push((item, placement)),
                    None => report.left_behind.push(item),
                }
            } else {
                self.decay(item, &mut report.decayed)?;
            }
        }

        tracing::debug!(
            collector = %collector,
            corpse = %corpse,
            taken = report.taken.len(),
            decayed = report.decayed.len(),
            "treasures collected"
        );
        Ok(report)
    }

    /// Terminates `item` if it is a weapon or armor; for a backpack, recurses
    /// into its content and leaves the backpack itself alone.
    fn decay(&mut self, item: ItemId, decayed: &mut Vec<ItemId>) -> Result<(), OwnershipError> {
        let node = self.item(item)?;
        if node.is_terminated() {
            return Ok(());
        }
        match node.category() {
            category if category.decays() => {
                self.terminate(item)?;
                decayed.push(item);
            }
            ItemCategory::Backpack => {
                let content: Vec<ItemId> = node
                    .as_backpack()
                    .map(|data| data.content().collect())
                    .unwrap_or_default();
                for child in content {
                    self.decay(child, decayed)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterSpec, ItemSpec, SlotId};

    fn wants_weapons(world: &World, _: CharacterId, item: ItemId) -> bool {
        world
            .item(item)
            .is_ok_and(|node| node.category() == ItemCategory::Weapon)
    }

    #[test]
    fn looting_requires_a_corpse_and_a_living_collector() {
        let mut world = World::default();
        let hero = world
            .spawn_character(CharacterSpec::new("Hero", 10, 50.0).gear_slots(2))
            .unwrap();
        let orc = world
            .spawn_character(CharacterSpec::new("Orc", 10, 50.0).gear_slots(2))
            .unwrap();

        assert_eq!(
            world.collect_treasures(hero, orc, &wants_weapons),
            Err(OwnershipError::NotACorpse { character: orc })
        );
        world.take_damage(hero, 10).unwrap();
        world.take_damage(orc, 10).unwrap();
        assert_eq!(
            world.collect_treasures(hero, orc, &wants_weapons),
            Err(OwnershipError::DeadCharacter { character: hero })
        );
    }

    #[test]
    fn unwanted_gear_decays_but_backpacks_survive() {
        let mut world = World::default();
        let hero = world
            .spawn_character(CharacterSpec::new("Hero", 10, 50.0).gear_slots(2))
            .unwrap();
        let orc = world
            .spawn_character(CharacterSpec::new("Orc", 10, 50.0).gear_slots(3))
            .unwrap();
        let club = world
            .create_equipped(ItemSpec::weapon(4).with_weight(2.0), orc, SlotId(0))
            .unwrap();
        let hide = world
            .create_equipped(ItemSpec::armor(3, 3).with_weight(4.0), orc, SlotId(1))
            .unwrap();
        let sack = world
            .create_equipped(ItemSpec::backpack(10.0).with_weight(1.0), orc, SlotId(2))
            .unwrap();
        let helm = world.create_item(ItemSpec::armor(2, 2).with_weight(1.0)).unwrap();
        world.move_to(helm, sack).unwrap();
        world.take_damage(orc, 10).unwrap();

        let report = world.collect_treasures(hero, orc, &wants_weapons).unwrap();
        assert_eq!(report.taken, vec![(club, Placement::Anchor(SlotId(0)))]);
        assert_eq!(report.decayed, vec![hide, helm]);
        assert!(world.item(hide).unwrap().is_terminated());
        assert!(world.item(helm).unwrap().is_terminated());
        assert!(!world.item(sack).unwrap().is_terminated());
        assert_eq!(world.holder(sack), Some(orc));
        assert!(world.item(sack).unwrap().as_backpack().unwrap().is_empty());
    }
}
