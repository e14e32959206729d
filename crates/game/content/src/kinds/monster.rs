use satchel_core::{
    AnchorSpec, CharacterId, CharacterSpec, CoreConfig, ItemId, TreasurePolicy, World,
};

use super::KindError;
use crate::config::MonsterTuning;

/// A hostile creature with a row of claws and a price it will stoop to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub name: String,
    pub max_hitpoints: u32,
    pub claws: usize,
    /// Overrides [`MonsterTuning::default_greed`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub greed: Option<i64>,
}

impl Monster {
    pub fn new(name: impl Into<String>, max_hitpoints: u32, claws: usize) -> Self {
        Self {
            name: name.into(),
            max_hitpoints,
            claws,
            greed: None,
        }
    }

    pub fn with_greed(mut self, greed: i64) -> Self {
        self.greed = Some(greed);
        self
    }

    pub fn character_spec(&self, tuning: &MonsterTuning) -> Result<CharacterSpec, KindError> {
        if self.claws == 0 || self.claws > CoreConfig::MAX_ANCHORS {
            return Err(KindError::AnchorCount {
                count: self.claws,
                max: CoreConfig::MAX_ANCHORS,
            });
        }
        let anchors = (1..=self.claws).map(|n| AnchorSpec::gear(format!("claw {n}")));
        let mut spec = CharacterSpec::new(self.name.clone(), self.max_hitpoints, tuning.capacity);
        spec.anchors.extend(anchors);
        Ok(spec)
    }

    pub fn policy(&self, tuning: &MonsterTuning) -> MonsterPolicy {
        MonsterPolicy {
            greed: self.greed.unwrap_or(tuning.default_greed),
        }
    }

    pub fn spawn(&self, world: &mut World, tuning: &MonsterTuning) -> Result<CharacterId, KindError> {
        let spec = self.character_spec(tuning)?;
        let id = world.spawn_character(spec)?;
        tracing::debug!(character = %id, name = %self.name, claws = self.claws, "monster spawned");
        Ok(id)
    }
}

/// Monsters take anything worth at least their greed, counting what is packed inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterPolicy {
    pub greed: i64,
}

impl TreasurePolicy for MonsterPolicy {
    fn wants_to_take(&self, world: &World, _collector: CharacterId, item: ItemId) -> bool {
        world.total_value(item).is_ok_and(|value| value >= self.greed)
    }
}

#[cfg(test)]
mod tests {
    use satchel_core::{ItemSpec, OwnershipError, SlotId};

    use super::*;

    #[test]
    fn claw_count_is_bounded() {
        let tuning = MonsterTuning::default();
        assert!(matches!(
            Monster::new("Orc", 10, 0).character_spec(&tuning),
            Err(KindError::AnchorCount { count: 0, .. })
        ));
        let spec = Monster::new("Orc", 10, 3).character_spec(&tuning).unwrap();
        assert_eq!(spec.anchors.len(), 3);
        assert_eq!(spec.anchors[2].name, "claw 3");
    }

    #[test]
    fn world_rules_still_apply() {
        let mut world = World::default();
        let err = Monster::new("  ", 10, 2)
            .spawn(&mut world, &MonsterTuning::default())
            .unwrap_err();
        assert!(matches!(
            err,
            KindError::Ownership(OwnershipError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn greed_counts_packed_value() {
        let mut world = World::default();
        let orc = Monster::new("Orc", 10, 2)
            .with_greed(30)
            .spawn(&mut world, &MonsterTuning::default())
            .unwrap();
        let policy = Monster::new("Orc", 10, 2).with_greed(30).policy(&MonsterTuning::default());

        let trinket = world.create_item(ItemSpec::weapon(1).with_value(20)).unwrap();
        let sack = world.create_item(ItemSpec::backpack(10.0).with_value(15)).unwrap();
        assert!(!policy.wants_to_take(&world, orc, trinket));
        assert!(!policy.wants_to_take(&world, orc, sack));

        world.move_to(trinket, sack).unwrap();
        assert!(policy.wants_to_take(&world, orc, sack));
        assert!(world.can_place_at(orc, SlotId(0), sack));
    }
}
