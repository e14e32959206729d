//! Tunable numbers for the concrete character kinds and value formulas.
//!
//! Loaded from `config.toml` by [`ConfigLoader`](crate::loaders::ConfigLoader);
//! every section is optional in the file and falls back to the defaults below.

/// Hero carrying capacity is derived from strength.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroTuning {
    pub capacity_per_strength: f32,
    pub max_strength: u32,
}

impl HeroTuning {
    pub const DEFAULT_CAPACITY_PER_STRENGTH: f32 = 12.5;
    pub const DEFAULT_MAX_STRENGTH: u32 = 10;
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            capacity_per_strength: Self::DEFAULT_CAPACITY_PER_STRENGTH,
            max_strength: Self::DEFAULT_MAX_STRENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonsterTuning {
    pub capacity: f32,
    /// Minimum total value an item needs before a monster bothers looting it.
    pub default_greed: i64,
}

impl MonsterTuning {
    pub const DEFAULT_CAPACITY: f32 = 60.0;
    pub const DEFAULT_GREED: i64 = 10;
}

impl Default for MonsterTuning {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            default_greed: Self::DEFAULT_GREED,
        }
    }
}

/// Linear value formulas per item kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValueFormulas {
    pub value_per_damage: i32,
    pub value_per_protection: i32,
    pub value_per_capacity: f32,
}

impl Default for ValueFormulas {
    fn default() -> Self {
        Self {
            value_per_damage: 5,
            value_per_protection: 8,
            value_per_capacity: 0.5,
        }
    }
}

/// Content-side configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentConfig {
    pub hero: HeroTuning,
    pub monster: MonsterTuning,
    pub values: ValueFormulas,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = ContentConfig::default();
        assert!(config.hero.capacity_per_strength > 0.0);
        assert!(config.hero.max_strength >= 1);
        assert!(config.monster.capacity > 0.0);
        assert_eq!(config.values, ValueFormulas::default());
    }
}
