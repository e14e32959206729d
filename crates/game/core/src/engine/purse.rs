//! Ducat handling for purses.
//!
//! A purse's value is its ducat content. Overfilling a purse tears it: the
//! purse is terminated and its ducats are lost.

use crate::engine::OwnershipError;
use crate::state::{ItemId, World};

/// Result of putting ducats into a purse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurseOutcome {
    /// The ducats were added; carries the new content.
    Stored(u32),
    /// The purse overflowed and tore.
    Torn,
}

impl World {
    /// Ducats currently in `purse`.
    pub fn ducats(&self, purse: ItemId) -> Result<u32, OwnershipError> {
        self.item(purse)?
            .as_purse()
            .map(|data| data.ducats)
            .ok_or(OwnershipError::NotAPurse { item: purse })
    }

    /// Adds `amount` ducats to `purse`, tearing it when its capacity is exceeded.
    pub fn deposit(&mut self, purse: ItemId, amount: u32) -> Result<PurseOutcome, OwnershipError> {
        let (capacity, ducats) = self.open_purse(purse)?;
        match ducats.checked_add(amount).filter(|total| *total <= capacity) {
            Some(total) => {
                self.store_ducats(purse, total)?;
                Ok(PurseOutcome::Stored(total))
            }
            None => {
                self.store_ducats(purse, 0)?;
                self.terminate(purse)?;
                tracing::debug!(purse = %purse, capacity, attempted = amount, "purse torn");
                Ok(PurseOutcome::Torn)
            }
        }
    }

    /// Takes `amount` ducats out of `purse`. Returns what is left.
    pub fn withdraw(&mut self, purse: ItemId, amount: u32) -> Result<u32, OwnershipError> {
        let (_, ducats) = self.open_purse(purse)?;
        if amount > ducats {
            return Err(OwnershipError::InsufficientDucats {
                purse,
                available: ducats,
                requested: amount,
            });
        }
        self.store_ducats(purse, ducats - amount)?;
        Ok(ducats - amount)
    }

    /// Moves `amount` ducats from one purse to another.
    ///
    /// Both purses are validated before anything moves; the receiving purse may
    /// still tear, in which case the ducats are lost with it.
    pub fn transfer_ducats(
        &mut self,
        from: ItemId,
        to: ItemId,
        amount: u32,
    ) -> Result<PurseOutcome, OwnershipError> {
        let (_, available) = self.open_purse(from)?;
        self.open_purse(to)?;
        if from == to {
            return Ok(PurseOutcome::Stored(available));
        }
        if amount > available {
            return Err(OwnershipError::InsufficientDucats {
                purse: from,
                available,
                requested: amount,
            });
        }
        self.withdraw(from, amount)?;
        self.deposit(to, amount)
    }

    fn open_purse(&self, purse: ItemId) -> Result<(u32, u32), OwnershipError> {
        let node = self.item(purse)?;
        let data = node
            .as_purse()
            .ok_or(OwnershipError::NotAPurse { item: purse })?;
        if node.is_terminated() {
            return Err(OwnershipError::Terminated { item: purse });
        }
        Ok((data.capacity, data.ducats))
    }

    fn store_ducats(&mut self, purse: ItemId, ducats: u32) -> Result<(), OwnershipError> {
        let node = self.item_mut(purse)?;
        if let Some(data) = node.purse_mut() {
            data.ducats = ducats;
        }
        node.set_value(ducats.min(i32::MAX as u32) as i32);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemSpec;

    #[test]
    fn deposit_and_withdraw_track_value() {
        let mut world = World::default();
        let purse = world.create_item(ItemSpec::purse(100, 20)).unwrap();
        assert_eq!(world.deposit(purse, 30), Ok(PurseOutcome::Stored(50)));
        assert_eq!(world.withdraw(purse, 15), Ok(35));
        assert_eq!(world.item(purse).unwrap().value(), 35);
        assert_eq!(
            world.withdraw(purse, 40),
            Err(OwnershipError::InsufficientDucats {
                purse,
                available: 35,
                requested: 40
            })
        );
    }

    #[test]
    fn overfilled_purse_tears() {
        let mut world = World::default();
        let purse = world.create_item(ItemSpec::purse(10, 8)).unwrap();
        assert_eq!(world.deposit(purse, 3), Ok(PurseOutcome::Torn));
        assert!(world.item(purse).unwrap().is_terminated());
        assert_eq!(world.ducats(purse), Ok(0));
        assert_eq!(
            world.deposit(purse, 1),
            Err(OwnershipError::Terminated { item: purse })
        );
    }

    #[test]
    fn transfer_between_purses() {
        let mut world = World::default();
        let rich = world.create_item(ItemSpec::purse(100, 60)).unwrap();
        let poor = world.create_item(ItemSpec::purse(50, 0)).unwrap();
        assert_eq!(world.transfer_ducats(rich, poor, 25), Ok(PurseOutcome::Stored(25)));
        assert_eq!(world.ducats(rich), Ok(35));
        assert_eq!(world.transfer_ducats(rich, poor, 30), Ok(PurseOutcome::Torn));
        assert_eq!(world.ducats(rich), Ok(5));
    }

    #[test]
    fn ducat_operations_need_a_purse() {
        let mut world = World::default();
        let sword = world.create_item(ItemSpec::weapon(3)).unwrap();
        assert_eq!(world.ducats(sword), Err(OwnershipError::NotAPurse { item: sword }));
    }
}
