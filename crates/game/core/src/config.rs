use crate::state::ItemCategory;

/// Inclusive bounds a kind's value is clamped into at every write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range. A degenerate range (`min > max`) collapses to `min`.
    pub fn clamp(&self, value: i32) -> i32 {
        if self.min > self.max {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Per-kind tunables: value bounds and the fallback weight used when a
/// constructor receives a negative or non-finite weight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindTuning {
    pub value_range: ValueRange,
    pub default_weight: f32,
}

impl KindTuning {
    pub const fn new(value_range: ValueRange, default_weight: f32) -> Self {
        Self {
            value_range,
            default_weight,
        }
    }
}

/// Ownership graph configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreConfig {
    pub weapon: KindTuning,
    pub armor: KindTuning,
    pub backpack: KindTuning,
    pub purse: KindTuning,
}

impl CoreConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on anchor slots any character kind may declare.
    pub const MAX_ANCHORS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WEAPON: KindTuning = KindTuning::new(ValueRange::new(1, 200), 1.0);
    pub const DEFAULT_ARMOR: KindTuning = KindTuning::new(ValueRange::new(1, 1000), 5.0);
    pub const DEFAULT_BACKPACK: KindTuning = KindTuning::new(ValueRange::new(0, 500), 1.0);
    pub const DEFAULT_PURSE: KindTuning = KindTuning::new(ValueRange::new(0, i32::MAX), 0.1);

    pub fn new() -> Self {
        Self {
            weapon: Self::DEFAULT_WEAPON,
            armor: Self::DEFAULT_ARMOR,
            backpack: Self::DEFAULT_BACKPACK,
            purse: Self::DEFAULT_PURSE,
        }
    }

    /// Returns the tuning that applies to items of `category`.
    pub fn tuning(&self, category: ItemCategory) -> &KindTuning {
        match category {
            ItemCategory::Weapon => &self.weapon,
            ItemCategory::Armor => &self.armor,
            ItemCategory::Backpack => &self.backpack,
            ItemCategory::Purse => &self.purse,
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
