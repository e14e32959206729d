use satchel_core::{
    AnchorSpec, CharacterId, CharacterSpec, ItemCategory, ItemId, KindMask, SlotId,
    TreasurePolicy, World,
};

use super::KindError;
use crate::config::HeroTuning;
use crate::ids::Primes;

const MAX_APOSTROPHES: usize = 2;

/// A player-side adventurer.
///
/// Heroes carry two hands, a body, a back and a purse-only belt. Their
/// capacity grows with strength.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub name: String,
    pub max_hitpoints: u32,
    pub strength: u32,
}

impl Hero {
    pub const LEFT_HAND: SlotId = SlotId(0);
    pub const RIGHT_HAND: SlotId = SlotId(1);
    pub const BODY: SlotId = SlotId(2);
    pub const BACK: SlotId = SlotId(3);
    pub const BELT: SlotId = SlotId(4);

    pub fn new(name: impl Into<String>, max_hitpoints: u32, strength: u32) -> Self {
        Self {
            name: name.into(),
            max_hitpoints,
            strength,
        }
    }

    /// Checks a hero name: an uppercase ASCII initial followed by letters,
    /// spaces and at most two apostrophes.
    pub fn validate_name(name: &str) -> Result<(), KindError> {
        let invalid = |reason| {
            Err(KindError::InvalidName {
                name: name.to_owned(),
                reason,
            })
        };
        let mut chars = name.chars();
        match chars.next() {
            None => return invalid("empty"),
            Some(first) if !first.is_ascii_uppercase() => {
                return invalid("must start with an uppercase letter");
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '\'') {
            return invalid("only letters, spaces and apostrophes allowed");
        }
        if name.matches('\'').count() > MAX_APOSTROPHES {
            return invalid("too many apostrophes");
        }
        Ok(())
    }

    /// Validates the hero and produces its [`CharacterSpec`].
    pub fn character_spec(&self, tuning: &HeroTuning) -> Result<CharacterSpec, KindError> {
        Self::validate_name(&self.name)?;
        if !Primes::is_prime(u64::from(self.max_hitpoints)) {
            return Err(KindError::HitpointsNotPrime {
                max_hitpoints: self.max_hitpoints,
            });
        }
        if self.strength == 0 || self.strength > tuning.max_strength {
            return Err(KindError::StrengthOutOfRange {
                strength: self.strength,
                max: tuning.max_strength,
            });
        }

        let capacity = self.strength as f32 * tuning.capacity_per_strength;
        Ok(CharacterSpec::new(self.name.clone(), self.max_hitpoints, capacity)
            .anchor(AnchorSpec::gear("left hand"))
            .anchor(AnchorSpec::gear("right hand"))
            .anchor(AnchorSpec::new("body", KindMask::ARMOR))
            .anchor(AnchorSpec::new("back", KindMask::BACKPACK))
            .anchor(AnchorSpec::new("belt", KindMask::PURSE)))
    }

    pub fn spawn(&self, world: &mut World, tuning: &HeroTuning) -> Result<CharacterId, KindError> {
        let spec = self.character_spec(tuning)?;
        let id = world.spawn_character(spec)?;
        tracing::debug!(character = %id, name = %self.name, strength = self.strength, "hero spawned");
        Ok(id)
    }
}

/// Heroes take every purse, and any other item that beats the best one of
/// its kind they already carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeroPolicy;

impl TreasurePolicy for HeroPolicy {
    fn wants_to_take(&self, world: &World, collector: CharacterId, item: ItemId) -> bool {
        let Ok(node) = world.item(item) else {
            return false;
        };
        if node.category() == ItemCategory::Purse {
            return true;
        }
        match world.best_carried(collector, node.category()) {
            None => true,
            Some(best) => world
                .item(best)
                .is_ok_and(|current| node.kind().ranking_key() > current.kind().ranking_key()),
        }
    }
}
