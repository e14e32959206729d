//! Item value formulas.
//!
//! The core stores whatever value it is handed; these formulas are the
//! standard way of computing it from an item's combat numbers.

use satchel_core::{ItemKind, ItemSpec};

use crate::config::ValueFormulas;

/// Builds [`ItemSpec`]s with computed values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemForge {
    formulas: ValueFormulas,
}

impl ItemForge {
    pub fn new(formulas: ValueFormulas) -> Self {
        Self { formulas }
    }

    pub fn formulas(&self) -> &ValueFormulas {
        &self.formulas
    }

    pub fn weapon(&self, damage: u32, weight: f32) -> ItemSpec {
        ItemSpec::weapon(damage)
            .with_weight(weight)
            .with_value(scale(damage, self.formulas.value_per_damage))
    }

    pub fn armor(&self, protection: u32, max_protection: u32, weight: f32) -> ItemSpec {
        let spec = ItemSpec::armor(protection, max_protection).with_weight(weight);
        // `ItemSpec::armor` already capped protection at its maximum
        let protection = match &spec.kind {
            ItemKind::Armor(armor) => armor.protection,
            _ => protection,
        };
        spec.with_value(scale(protection, self.formulas.value_per_protection))
    }

    pub fn backpack(&self, capacity: f32, weight: f32) -> ItemSpec {
        // float casts saturate and map NaN to zero
        let value = (capacity.max(0.0) * self.formulas.value_per_capacity).round() as i32;
        ItemSpec::backpack(capacity).with_weight(weight).with_value(value)
    }

    /// Purses are valued by their ducats, which the core derives itself.
    pub fn purse(&self, capacity: u32, ducats: u32, weight: f32) -> ItemSpec {
        ItemSpec::purse(capacity, ducats).with_weight(weight)
    }
}

fn scale(amount: u32, per_unit: i32) -> i32 {
    let product = i64::from(amount) * i64::from(per_unit);
    product.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
