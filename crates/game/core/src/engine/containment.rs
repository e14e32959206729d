//! Backpack admission control.

use crate::engine::{ContainmentRejection, OwnershipError};
use crate::state::{ItemId, ItemKind, World};

impl World {
    /// Returns true if `item` could be moved into `backpack` right now.
    pub fn can_contain(&self, backpack: ItemId, item: ItemId) -> bool {
        self.check_containment(backpack, item).is_ok()
    }

    /// Runs every admission check for putting `item` directly inside `backpack`.
    ///
    /// Checks, in order: both exist and are alive, the target is a backpack, the
    /// item is not the backpack, the item's kind may be packed, the item is not
    /// held by another living character, the holder can carry it, no cycle would
    /// form, and neither the backpack nor any enclosing backpack overflows.
    pub fn check_containment(&self, backpack: ItemId, item: ItemId) -> Result<(), OwnershipError> {
        let target = self.item(backpack)?;
        let candidate = self.item(item)?;

        if candidate.is_terminated() {
            return Err(OwnershipError::Terminated { item });
        }
        if target.is_terminated() {
            return Err(OwnershipError::Terminated { item: backpack });
        }

        let reject = |reason| Err(OwnershipError::containment(item, backpack, reason));

        if target.as_backpack().is_none() {
            return reject(ContainmentRejection::NotAContainer);
        }
        if item == backpack {
            return reject(ContainmentRejection::SelfContainment);
        }
        match candidate.kind() {
            ItemKind::Purse(_) => return reject(ContainmentRejection::ExcludedKind),
            ItemKind::Weapon(_) | ItemKind::Armor(_) | ItemKind::Backpack(_) => {}
        }

        let target_holder = self.holder(backpack);
        let item_holder = self.holder(item);
        if item_holder.is_some() && item_holder != target_holder && self.is_held_by_living(item) {
            return reject(ContainmentRejection::HeldByOther);
        }
        if let Some(holder) = target_holder {
            if item_holder != Some(holder) && !self.can_pick_up(holder, item) {
                return reject(ContainmentRejection::CapacityExceeded);
            }
        }

        if candidate.as_backpack().is_some() && self.is_within(backpack, item) {
            return reject(ContainmentRejection::Cycle);
        }

        if candidate.owner().container() == Some(backpack) {
            return Ok(());
        }

        let added = self.total_weight(item)?;
        let item_ancestors = self.ancestors(item);
        let mut chain = vec![backpack];
        chain.extend(self.ancestors(backpack));
        for enclosing in chain {
            // moving inside the same enclosure leaves its load unchanged
            if item_ancestors.contains(&enclosing) {
                continue;
            }
            let capacity = self
                .item(enclosing)?
                .as_backpack()
                .map_or(0.0, |data| data.capacity);
            if self.content_weight(enclosing)? + added > capacity {
                return reject(ContainmentRejection::CapacityExceeded);
            }
        }

        Ok(())
    }

    /// Returns true if `item` lies directly inside `backpack`.
    pub fn contains(&self, backpack: ItemId, item: ItemId) -> bool {
        self.items
            .get(&backpack)
            .and_then(|node| node.as_backpack())
            .is_some_and(|data| data.content.contains(&item))
    }

    /// Returns true if `item` lies inside `backpack` at any depth.
    pub fn contains_deep(&self, backpack: ItemId, item: ItemId) -> bool {
        item != backpack && self.is_within(item, backpack)
    }

    /// Items directly inside `backpack` carrying identification number `id`.
    ///
    /// Identification numbers are unique per kind, so at most one item per kind matches.
    pub fn items_with_id(&self, backpack: ItemId, id: u64) -> Vec<ItemId> {
        self.items
            .get(&backpack)
            .and_then(|node| node.as_backpack())
            .map(|data| {
                data.content
                    .iter()
                    .copied()
                    .filter(|child| self.items.get(child).is_some_and(|node| node.id() == id))
                    .collect()
            })
            .unwrap_or_default()
    }
}
