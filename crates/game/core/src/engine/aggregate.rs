//! Recursive weight/value aggregation and best-item queries.

use std::cmp::Ordering;

use crate::engine::OwnershipError;
use crate::state::{GraphNode, ItemCategory, ItemId, World};

impl World {
    /// Own weight plus everything carried inside, recursively.
    ///
    /// For a character this is the sum over its anchored items.
    pub fn total_weight(&self, node: impl Into<GraphNode>) -> Result<f32, OwnershipError> {
        match node.into() {
            GraphNode::Item(item) => {
                self.item(item)?;
                Ok(self.subtree(item).map(|(_, node)| node.weight()).sum())
            }
            GraphNode::Character(character) => Ok(self
                .character(character)?
                .anchored_items()
                .flat_map(|(_, root)| self.subtree(root))
                .map(|(_, node)| node.weight())
                .sum()),
        }
    }

    /// Own value plus everything carried inside, recursively.
    pub fn total_value(&self, node: impl Into<GraphNode>) -> Result<i64, OwnershipError> {
        match node.into() {
            GraphNode::Item(item) => {
                self.item(item)?;
                Ok(self
                    .subtree(item)
                    .map(|(_, node)| i64::from(node.value()))
                    .sum())
            }
            GraphNode::Character(character) => Ok(self
                .character(character)?
                .anchored_items()
                .flat_map(|(_, root)| self.subtree(root))
                .map(|(_, node)| i64::from(node.value()))
                .sum()),
        }
    }

    /// Weight of everything inside `backpack`, excluding the backpack itself.
    pub fn content_weight(&self, backpack: ItemId) -> Result<f32, OwnershipError> {
        Ok(self.total_weight(backpack)? - self.item(backpack)?.weight())
    }

    /// Strongest weapon anywhere inside `backpack`.
    pub fn best_weapon(&self, backpack: ItemId) -> Option<ItemId> {
        self.best_in(backpack, ItemCategory::Weapon)
    }

    /// Most protective armor anywhere inside `backpack`.
    pub fn best_armor(&self, backpack: ItemId) -> Option<ItemId> {
        self.best_in(backpack, ItemCategory::Armor)
    }

    /// Roomiest backpack anywhere inside `backpack`.
    pub fn best_container(&self, backpack: ItemId) -> Option<ItemId> {
        self.best_in(backpack, ItemCategory::Backpack)
    }

    /// Best item of `category` inside `backpack` at any depth, by the category's
    /// ranking key. Ties keep the first match in depth-first order.
    pub fn best_in(&self, backpack: ItemId, category: ItemCategory) -> Option<ItemId> {
        let content = self.items.get(&backpack)?.as_backpack()?.content();
        self.best_among(content, category)
    }

    /// Best item of `category` carried by `character`, anchored or packed.
    pub fn best_carried(
        &self,
        character: crate::state::CharacterId,
        category: ItemCategory,
    ) -> Option<ItemId> {
        let anchored = self.characters.get(&character)?.anchored_items().map(|(_, item)| item);
        self.best_among(anchored, category)
    }

    fn best_among(
        &self,
        roots: impl Iterator<Item = ItemId>,
        category: ItemCategory,
    ) -> Option<ItemId> {
        let mut best: Option<(ItemId, f64)> = None;
        for (id, item) in roots.flat_map(|root| self.subtree(root)) {
            if item.category() != category {
                continue;
            }
            let key = item.kind().ranking_key();
            let better = match best {
                None => true,
                Some((_, current)) => key.partial_cmp(&current) == Some(Ordering::Greater),
            };
            if better {
                best = Some((id, key));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Depth-first pre-order walk over `root` and everything inside it.
    ///
    /// Each node is visited at most once, so a corrupted cycle cannot loop.
    pub(crate) fn subtree(&self, root: ItemId) -> impl Iterator<Item = (ItemId, &crate::state::Item)> {
        let mut stack = vec![root];
        let mut seen = std::collections::BTreeSet::new();
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                if !seen.insert(id) {
                    continue;
                }
                let Some(item) = self.items.get(&id) else {
                    continue;
                };
                if let Some(backpack) = item.as_backpack() {
                    // reversed so the smallest handle is visited first
                    stack.extend(backpack.content.iter().rev().copied());
                }
                return Some((id, item));
            }
            None
        })
    }
}
