//! Thread-shared access to a [`World`].
//!
//! Every mutation runs under the single graph-wide writer lock, so a transfer
//! touching several nodes is observed atomically by readers.
use std::sync::{Arc, RwLock};

use crate::state::World;

/// Cloneable handle to a world guarded by one reader/writer lock.
#[derive(Clone, Debug)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Runs `f` with shared read access.
    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        // Operations never leave the graph half-updated, so a poisoned lock
        // still guards a consistent world.
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Runs `f` with exclusive write access.
    pub fn write<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Returns the world if this is the last handle.
    pub fn try_unwrap(self) -> Result<World, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(|e| e.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl From<World> for SharedWorld {
    fn from(world: World) -> Self {
        Self::new(world)
    }
}
