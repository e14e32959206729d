//! Scenario loader.
//!
//! A scenario names a set of items and characters and lists where each item
//! starts out. Building one runs every placement through the core, so a file
//! describing an impossible layout fails to load instead of producing a broken
//! world.

use std::collections::BTreeMap;
use std::path::Path;

use satchel_core::{CharacterId, ItemId, ItemSpec, SlotId, World};
use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;
use crate::formulas::ItemForge;
use crate::ids::default_registry;
use crate::kinds::{Hero, Monster};
use crate::loaders::{LoadResult, read_file};

/// Item parameters before value formulas are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemDef {
    Weapon {
        damage: u32,
        weight: f32,
    },
    Armor {
        protection: u32,
        max_protection: u32,
        weight: f32,
    },
    Backpack {
        capacity: f32,
        weight: f32,
    },
    Purse {
        capacity: u32,
        ducats: u32,
        #[serde(default)]
        weight: f32,
    },
}

impl ItemDef {
    pub fn forge(&self, forge: &ItemForge) -> ItemSpec {
        match *self {
            Self::Weapon { damage, weight } => forge.weapon(damage, weight),
            Self::Armor {
                protection,
                max_protection,
                weight,
            } => forge.armor(protection, max_protection, weight),
            Self::Backpack { capacity, weight } => forge.backpack(capacity, weight),
            Self::Purse {
                capacity,
                ducats,
                weight,
            } => forge.purse(capacity, ducats, weight),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
    /// Requested identification number; generated when absent.
    #[serde(default)]
    pub id: Option<u64>,
    pub item: ItemDef,
}

/// Starting position of a named item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementDef {
    Equip {
        character: String,
        slot: u8,
        item: String,
    },
    Pack {
        item: String,
        backpack: String,
    },
}

/// Scenario file structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDef {
    #[serde(default)]
    pub items: Vec<NamedItem>,
    #[serde(default)]
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    /// Applied in order; items not mentioned start on the ground.
    #[serde(default)]
    pub placements: Vec<PlacementDef>,
}

/// A populated world plus the names its nodes were declared under.
#[derive(Debug)]
pub struct Scenario {
    pub world: World,
    pub items: BTreeMap<String, ItemId>,
    pub characters: BTreeMap<String, CharacterId>,
}

impl Scenario {
    pub fn item(&self, name: &str) -> Option<ItemId> {
        self.items.get(name).copied()
    }

    pub fn character(&self, name: &str) -> Option<CharacterId> {
        self.characters.get(name).copied()
    }
}

impl ScenarioDef {
    /// Creates the world and applies every placement.
    pub fn build(&self, config: &ContentConfig) -> LoadResult<Scenario> {
        let mut world = World::new(default_registry());
        let forge = ItemForge::new(config.values);

        let mut items = BTreeMap::new();
        for named in &self.items {
            let mut spec = named.item.forge(&forge);
            spec.id = named.id;
            let handle = world
                .create_item(spec)
                .map_err(|e| anyhow::anyhow!("Failed to create item '{}': {}", named.name, e))?;
            if items.insert(named.name.clone(), handle).is_some() {
                anyhow::bail!("duplicate item name '{}'", named.name);
            }
        }

        let mut characters = BTreeMap::new();
        for hero in &self.heroes {
            let handle = hero
                .spawn(&mut world, &config.hero)
                .map_err(|e| anyhow::anyhow!("Failed to spawn hero '{}': {}", hero.name, e))?;
            if characters.insert(hero.name.clone(), handle).is_some() {
                anyhow::bail!("duplicate character name '{}'", hero.name);
            }
        }
        for monster in &self.monsters {
            let handle = monster
                .spawn(&mut world, &config.monster)
                .map_err(|e| anyhow::anyhow!("Failed to spawn monster '{}': {}", monster.name, e))?;
            if characters.insert(monster.name.clone(), handle).is_some() {
                anyhow::bail!("duplicate character name '{}'", monster.name);
            }
        }

        let lookup_item = |name: &str| {
            items
                .get(name)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown item '{}'", name))
        };
        for placement in &self.placements {
            match placement {
                PlacementDef::Equip {
                    character,
                    slot,
                    item,
                } => {
                    let owner = characters
                        .get(character.as_str())
                        .copied()
                        .ok_or_else(|| anyhow::anyhow!("unknown character '{}'", character))?;
                    let equipped = world
                        .equip(owner, SlotId(*slot), lookup_item(item)?)
                        .map_err(|e| anyhow::anyhow!("Failed to equip '{}': {}", item, e))?;
                    if !equipped {
                        anyhow::bail!("'{}' does not fit slot {} of '{}'", item, slot, character);
                    }
                }
                PlacementDef::Pack { item, backpack } => {
                    world
                        .move_to(lookup_item(item)?, lookup_item(backpack)?)
                        .map_err(|e| {
                            anyhow::anyhow!("Failed to pack '{}' into '{}': {}", item, backpack, e)
                        })?;
                }
            }
        }

        tracing::debug!(
            items = items.len(),
            characters = characters.len(),
            placements = self.placements.len(),
            "scenario built"
        );
        Ok(Scenario {
            world,
            items,
            characters,
        })
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario definition from a RON file.
    pub fn load(path: &Path) -> LoadResult<ScenarioDef> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioDef> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use satchel_core::{ItemCategory, OwnerRef};

    use super::*;

    const CAMP: &str = r#"
ScenarioDef(
    items: [
        (name: "blade", item: Weapon(damage: 7, weight: 2.0)),
        (name: "mail", id: Some(11), item: Armor(protection: 4, max_protection: 6, weight: 6.0)),
        (name: "pack", item: Backpack(capacity: 15.0, weight: 1.0)),
        (name: "rope", item: Weapon(damage: 1, weight: 1.5)),
        (name: "pouch", item: Purse(capacity: 100, ducats: 12)),
    ],
    heroes: [
        (name: "Frodo", max_hitpoints: 13, strength: 2),
    ],
    monsters: [
        (name: "Orc", max_hitpoints: 8, claws: 2, greed: Some(25)),
    ],
    placements: [
        Equip(character: "Frodo", slot: 3, item: "pack"),
        Pack(item: "rope", backpack: "pack"),
        Equip(character: "Frodo", slot: 4, item: "pouch"),
        Equip(character: "Orc", slot: 0, item: "blade"),
    ],
)
"#;

    #[test]
    fn builds_a_populated_world() {
        let scenario = ScenarioLoader::parse(CAMP)
            .unwrap()
            .build(&ContentConfig::default())
            .unwrap();
        let world = &scenario.world;
        let frodo = scenario.character("Frodo").unwrap();
        let orc = scenario.character("Orc").unwrap();

        assert_eq!(world.holder(scenario.item("rope").unwrap()), Some(frodo));
        assert_eq!(world.holder(scenario.item("blade").unwrap()), Some(orc));
        assert_eq!(
            world.item(scenario.item("mail").unwrap()).unwrap().owner(),
            OwnerRef::None
        );
        assert_eq!(world.item(scenario.item("mail").unwrap()).unwrap().id(), 11);
        assert_eq!(world.item(scenario.item("blade").unwrap()).unwrap().value(), 35);
        assert_eq!(world.ducats(scenario.item("pouch").unwrap()), Ok(12));
        assert_eq!(world.registry().issued_count(ItemCategory::Weapon), 2);
        assert_eq!(world.check_invariants(), Ok(()));
    }

    #[test]
    fn impossible_layouts_fail_to_load() {
        let mut def = ScenarioLoader::parse(CAMP).unwrap();
        def.placements.push(PlacementDef::Pack {
            item: "pouch".into(),
            backpack: "pack".into(),
        });
        let err = def.build(&ContentConfig::default()).unwrap_err();
        assert!(err.to_string().contains("pouch"));

        let mut def = ScenarioLoader::parse(CAMP).unwrap();
        def.items[1].id = Some(12);
        assert!(def.build(&ContentConfig::default()).is_err());

        let mut def = ScenarioLoader::parse(CAMP).unwrap();
        def.heroes[0].name = "frodo".into();
        assert!(def.build(&ContentConfig::default()).is_err());
    }
}
