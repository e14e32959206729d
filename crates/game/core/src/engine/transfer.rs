//! Item ownership transfer: drop, move, bind, terminate.
//!
//! Every public entry point validates first and only then rewrites the item's
//! owner tag together with the owner's back-reference. The crate-internal
//! `detach`/`attach_*` helpers assume validation has already happened.

use crate::engine::OwnershipError;
use crate::state::{CharacterId, ItemId, OwnerRef, SlotId, World};

impl World {
    /// Severs `item` from its current owner (anchor or backpack), leaving it on the ground.
    ///
    /// Idempotent: dropping a free item changes nothing.
    ///
    /// A terminated backpack does not refuse removal: dropping never fails with
    /// [`OwnershipError::Terminated`], so the content of a destroyed backpack can
    /// always be recovered. Only moves *into* it are refused (see [`World::move_to`]).
    pub fn drop(&mut self, item: ItemId) -> Result<(), OwnershipError> {
        self.item(item)?;
        let previous = self.detach(item);
        if !previous.is_free() {
            tracing::debug!(item = %item, from = ?previous, "item dropped");
        }
        Ok(())
    }

    /// Moves `item` directly into `backpack`.
    ///
    /// Fails with [`OwnershipError::Terminated`] when either side is terminated and
    /// with [`OwnershipError::InvalidContainment`] when admission control rejects
    /// the move; in both cases nothing changes. Moving an item into the backpack
    /// that already holds it is a no-op.
    pub fn move_to(&mut self, item: ItemId, backpack: ItemId) -> Result<(), OwnershipError> {
        if let Err(err) = self.check_containment(backpack, item) {
            tracing::trace!(item = %item, backpack = %backpack, error = %err, "move rejected");
            return Err(err);
        }
        if self.item(item)?.owner() == OwnerRef::Contained(backpack) {
            return Ok(());
        }

        self.detach(item);
        self.attach_contained(item, backpack);
        tracing::debug!(item = %item, backpack = %backpack, "item moved into backpack");
        Ok(())
    }

    /// Terminates `item`: drops it, then freezes it for good.
    ///
    /// A terminated backpack keeps its content; those items stay valid and can
    /// still be taken out. Terminating twice has no further effect.
    pub fn terminate(&mut self, item: ItemId) -> Result<(), OwnershipError> {
        if self.item(item)?.is_terminated() {
            return Ok(());
        }
        self.detach(item);
        self.item_mut(item)?.terminated = true;
        tracing::debug!(item = %item, "item terminated");
        Ok(())
    }

    /// Writes a new externally computed value, clamped into the item's range.
    ///
    /// A purse's value always mirrors its ducats, so for purses this returns the
    /// current value unchanged. Returns the stored value.
    pub fn set_value(&mut self, item: ItemId, value: i32) -> Result<i32, OwnershipError> {
        let node = self.item_mut(item)?;
        if node.is_terminated() {
            return Err(OwnershipError::Terminated { item });
        }
        if node.as_purse().is_none() {
            node.set_value(value);
        }
        Ok(node.value())
    }

    /// Hangs `item` on `slot` of `character`, first severing it from wherever it is.
    ///
    /// Only [`World::equip`] and [`World::pick_up`] call this, after admission
    /// control passed; the checks here guard the structural preconditions.
    pub(crate) fn bind_to_character(
        &mut self,
        item: ItemId,
        character: CharacterId,
        slot: SlotId,
    ) -> Result<(), OwnershipError> {
        if self.item(item)?.is_terminated() {
            return Err(OwnershipError::Terminated { item });
        }
        let owner = self.character(character)?;
        if owner.is_dead() {
            return Err(OwnershipError::DeadCharacter { character });
        }
        let anchor = owner
            .anchor(slot)
            .ok_or(OwnershipError::InvalidPlacement {
                item,
                character,
                slot,
            })?;
        let category = self.item(item)?.category();
        if !anchor.admits(category) || anchor.item().is_some_and(|occupant| occupant != item) {
            return Err(OwnershipError::InvalidPlacement {
                item,
                character,
                slot,
            });
        }

        self.detach(item);
        self.attach_anchor(item, character, slot);
        tracing::debug!(item = %item, character = %character, slot = %slot, "item anchored");
        Ok(())
    }

    /// Clears both sides of `item`'s current ownership link and returns the old tag.
    pub(crate) fn detach(&mut self, item: ItemId) -> OwnerRef {
        let Some(node) = self.items.get_mut(&item) else {
            return OwnerRef::None;
        };
        let previous = std::mem::take(&mut node.owner);

        match previous {
            OwnerRef::None => {}
            OwnerRef::Anchored(character, slot) => {
                if let Some(anchor) = self
                    .characters
                    .get_mut(&character)
                    .and_then(|owner| owner.anchors.get_mut(slot.index()))
                {
                    if anchor.item == Some(item) {
                        anchor.item = None;
                    }
                }
            }
            OwnerRef::Contained(backpack) => {
                if let Some(content) = self
                    .items
                    .get_mut(&backpack)
                    .and_then(|parent| parent.backpack_mut())
                {
                    content.content.remove(&item);
                }
            }
        }
        previous
    }

    /// Links a free `item` into `backpack`. Caller guarantees admission.
    fn attach_contained(&mut self, item: ItemId, backpack: ItemId) {
        let Some(data) = self
            .items
            .get_mut(&backpack)
            .and_then(|parent| parent.backpack_mut())
        else {
            return;
        };
        data.content.insert(item);
        if let Some(node) = self.items.get_mut(&item) {
            node.owner = OwnerRef::Contained(backpack);
        }
    }

    /// Links a free `item` onto an anchor. Caller guarantees the slot is free and compatible.
    fn attach_anchor(&mut self, item: ItemId, character: CharacterId, slot: SlotId) {
        let Some(anchor) = self
            .characters
            .get_mut(&character)
            .and_then(|owner| owner.anchors.get_mut(slot.index()))
        else {
            return;
        };
        anchor.item = Some(item);
        if let Some(node) = self.items.get_mut(&item) {
            node.owner = OwnerRef::Anchored(character, slot);
        }
    }
}
