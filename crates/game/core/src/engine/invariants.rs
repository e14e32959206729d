//! Whole-graph consistency audit.

use crate::error::{DomainError, ErrorSeverity};
use crate::state::{CharacterId, ItemId, OwnerRef, SlotId, World};

/// Weight comparisons tolerate accumulated rounding of this size.
const WEIGHT_TOLERANCE: f32 = 1e-3;

/// A structural invariant found broken by [`World::check_invariants`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{item} claims {slot} of {character}, which does not point back")]
    AnchorMismatch {
        item: ItemId,
        character: CharacterId,
        slot: SlotId,
    },

    #[error("{item} claims to be inside {backpack}, which does not list it")]
    ContentMismatch { item: ItemId, backpack: ItemId },

    #[error("{item} is inside {backpack}, which is part of its own content")]
    Cycle { item: ItemId, backpack: ItemId },

    #[error("{character} carries {carried} of {capacity}")]
    CharacterOverloaded {
        character: CharacterId,
        carried: f32,
        capacity: f32,
    },

    #[error("{backpack} holds {load} of {capacity}")]
    BackpackOverloaded {
        backpack: ItemId,
        load: f32,
        capacity: f32,
    },

    #[error("terminated {item} is still owned")]
    TerminatedOwned { item: ItemId },

    #[error("purse {item} is inside a backpack")]
    PackedPurse { item: ItemId },

    #[error("{character} has {hitpoints} of {max_hitpoints} hit points")]
    HitpointsOutOfRange {
        character: CharacterId,
        hitpoints: u32,
        max_hitpoints: u32,
    },
}

impl DomainError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cycle { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AnchorMismatch { .. } => "INVARIANT_ANCHOR_MISMATCH",
            Self::ContentMismatch { .. } => "INVARIANT_CONTENT_MISMATCH",
            Self::Cycle { .. } => "INVARIANT_CYCLE",
            Self::CharacterOverloaded { .. } => "INVARIANT_CHARACTER_OVERLOADED",
            Self::BackpackOverloaded { .. } => "INVARIANT_BACKPACK_OVERLOADED",
            Self::TerminatedOwned { .. } => "INVARIANT_TERMINATED_OWNED",
            Self::PackedPurse { .. } => "INVARIANT_PACKED_PURSE",
            Self::HitpointsOutOfRange { .. } => "INVARIANT_HITPOINTS_OUT_OF_RANGE",
        }
    }
}

impl World {
    /// Audits single ownership, back-references, cycle freedom and capacities.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (id, item) in self.items() {
            match item.owner() {
                OwnerRef::None => {}
                OwnerRef::Anchored(character, slot) => {
                    let anchored = self
                        .characters
                        .get(&character)
                        .and_then(|owner| owner.anchor(slot))
                        .and_then(|anchor| anchor.item());
                    if anchored != Some(id) {
                        return Err(InvariantViolation::AnchorMismatch {
                            item: id,
                            character,
                            slot,
                        });
                    }
                }
                OwnerRef::Contained(backpack) => {
                    if !self.contains(backpack, id) {
                        return Err(InvariantViolation::ContentMismatch { item: id, backpack });
                    }
                    if item.as_purse().is_some() {
                        return Err(InvariantViolation::PackedPurse { item: id });
                    }
                }
            }
            if item.is_terminated() && !item.owner().is_free() {
                return Err(InvariantViolation::TerminatedOwned { item: id });
            }

            if let Some(data) = item.as_backpack() {
                if self.is_within_cyclic(id) {
                    return Err(InvariantViolation::Cycle {
                        item: id,
                        backpack: id,
                    });
                }
                for child in data.content() {
                    let owner = self.items.get(&child).map(|node| node.owner());
                    if owner != Some(OwnerRef::Contained(id)) {
                        return Err(InvariantViolation::ContentMismatch {
                            item: child,
                            backpack: id,
                        });
                    }
                }
                let load = self.content_weight(id).unwrap_or(f32::INFINITY);
                if load > data.capacity + WEIGHT_TOLERANCE {
                    return Err(InvariantViolation::BackpackOverloaded {
                        backpack: id,
                        load,
                        capacity: data.capacity,
                    });
                }
            }
        }

        for (id, character) in self.characters() {
            if character.hitpoints() > character.max_hitpoints() {
                return Err(InvariantViolation::HitpointsOutOfRange {
                    character: id,
                    hitpoints: character.hitpoints(),
                    max_hitpoints: character.max_hitpoints(),
                });
            }
            for (slot, item) in character.anchored_items() {
                let owner = self.items.get(&item).map(|node| node.owner());
                if owner != Some(OwnerRef::Anchored(id, slot)) {
                    return Err(InvariantViolation::AnchorMismatch {
                        item,
                        character: id,
                        slot,
                    });
                }
            }
            let carried = self.total_weight(id).unwrap_or(f32::INFINITY);
            if carried > character.capacity() + WEIGHT_TOLERANCE {
                return Err(InvariantViolation::CharacterOverloaded {
                    character: id,
                    carried,
                    capacity: character.capacity(),
                });
            }
        }
        Ok(())
    }

    /// Follows raw container links from `item` and reports whether they lead back to it.
    fn is_within_cyclic(&self, item: ItemId) -> bool {
        let mut current = item;
        for _ in 0..=self.items.len() {
            match self.items.get(&current).and_then(|node| node.owner().container()) {
                Some(parent) if parent == item => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterSpec, ItemSpec};

    #[test]
    fn fresh_world_is_consistent() {
        let mut world = World::default();
        let hero = world
            .spawn_character(CharacterSpec::new("Hero", 10, 20.0).gear_slots(2))
            .unwrap();
        let sack = world.create_item(ItemSpec::backpack(5.0).with_weight(1.0)).unwrap();
        let sword = world.create_item(ItemSpec::weapon(5).with_weight(2.0)).unwrap();
        world.move_to(sword, sack).unwrap();
        world.equip(hero, SlotId(1), sack).unwrap();
        assert_eq!(world.check_invariants(), Ok(()));
    }

    #[test]
    fn detects_broken_back_reference() {
        let mut world = World::default();
        let sack = world.create_item(ItemSpec::backpack(5.0)).unwrap();
        let sword = world.create_item(ItemSpec::weapon(5)).unwrap();
        world.move_to(sword, sack).unwrap();
        world.items.get_mut(&sack).unwrap().backpack_mut().unwrap().content.clear();

        assert_eq!(
            world.check_invariants(),
            Err(InvariantViolation::ContentMismatch {
                item: sword,
                backpack: sack
            })
        );
        assert_eq!(world.holder(sword), None);
    }
}
