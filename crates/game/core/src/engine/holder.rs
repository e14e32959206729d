//! Ownership resolver.
//!
//! Read-only walks over owner links. Every walk is bounded by the number of
//! items in the world and verifies the back-reference at each hop, so a broken
//! or cyclic chain resolves to "free" instead of looping.

use crate::state::{CharacterId, ItemId, OwnerRef, World};

impl World {
    /// Character ultimately holding `item`, following anchor and container links.
    ///
    /// Returns `None` for items on the ground, items inside a free backpack, and
    /// whenever a link in the chain is broken.
    pub fn holder(&self, item: ItemId) -> Option<CharacterId> {
        let mut current = item;
        for _ in 0..=self.items.len() {
            match self.items.get(&current)?.owner {
                OwnerRef::None => return None,
                OwnerRef::Anchored(character, slot) => {
                    let anchored = self.characters.get(&character)?.anchor(slot)?.item();
                    return (anchored == Some(current)).then_some(character);
                }
                OwnerRef::Contained(parent) => {
                    let backpack = self.items.get(&parent)?.as_backpack()?;
                    if !backpack.content.contains(&current) {
                        return None;
                    }
                    current = parent;
                }
            }
        }
        None
    }

    /// Enclosing backpacks of `item`, innermost first.
    ///
    /// The walk stops at the first broken link, and also stops (without
    /// repeating) if it ever revisits a node.
    pub fn ancestors(&self, item: ItemId) -> Vec<ItemId> {
        let mut chain = Vec::new();
        let mut current = item;
        while let Some(parent) = self.items.get(&current).and_then(|node| node.owner.container()) {
            if parent == item || chain.contains(&parent) || chain.len() > self.items.len() {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Returns true if `node` is `root` or lies anywhere inside `root`.
    pub fn is_within(&self, node: ItemId, root: ItemId) -> bool {
        node == root || self.ancestors(node).contains(&root)
    }

    /// Outermost item of the chain containing `item` (the item itself when not contained).
    pub fn outermost(&self, item: ItemId) -> ItemId {
        self.ancestors(item).last().copied().unwrap_or(item)
    }

    /// Returns true if `item` is held, directly or through backpacks, by `character`.
    pub fn is_held_by(&self, item: ItemId, character: CharacterId) -> bool {
        self.holder(item) == Some(character)
    }

    /// Returns true if `item` is held by a character with hit points left.
    pub fn is_held_by_living(&self, item: ItemId) -> bool {
        self.holder(item)
            .and_then(|holder| self.characters.get(&holder))
            .is_some_and(|character| character.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{CharacterSpec, ItemSpec, SlotId, World};

    #[test]
    fn free_item_has_no_holder() {
        let mut world = World::default();
        let sword = world.create_item(ItemSpec::weapon(4)).unwrap();
        assert_eq!(world.holder(sword), None);
        assert!(world.ancestors(sword).is_empty());
    }

    #[test]
    fn holder_resolves_through_nested_backpacks() {
        let mut world = World::default();
        let hero = world
            .spawn_character(CharacterSpec::new("Hero", 20, 100.0).gear_slots(1))
            .unwrap();
        let outer = world.create_item(ItemSpec::backpack(20.0)).unwrap();
        let inner = world.create_item(ItemSpec::backpack(10.0)).unwrap();
        let dagger = world.create_item(ItemSpec::weapon(2).with_weight(1.0)).unwrap();

        world.move_to(inner, outer).unwrap();
        world.move_to(dagger, inner).unwrap();
        assert_eq!(world.holder(dagger), None);
        assert_eq!(world.ancestors(dagger), vec![inner, outer]);
        assert_eq!(world.outermost(dagger), outer);

        assert!(world.equip(hero, SlotId(0), outer).unwrap());
        assert_eq!(world.holder(dagger), Some(hero));
        assert!(world.is_held_by_living(dagger));
        assert!(world.is_within(dagger, outer));
        assert!(!world.is_within(outer, dagger));
    }
}
