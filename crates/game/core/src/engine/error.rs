//! Ownership operation errors.
//!
//! Every variant is a contract violation detected before any mutation; a caller
//! receiving one can rely on the graph being exactly as it was.

use crate::error::{DomainError, ErrorSeverity};
use crate::registry::RegistryError;
use crate::state::{CharacterId, ItemId, SlotId};

/// Why a backpack refused an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ContainmentRejection {
    /// The target is not a backpack.
    NotAContainer,
    /// An item cannot go inside itself.
    SelfContainment,
    /// The item's kind is excluded from backpacks (purses).
    ExcludedKind,
    /// The item belongs to a living character other than the backpack's holder.
    HeldByOther,
    /// The item is a backpack enclosing the target.
    Cycle,
    /// The backpack, an enclosing backpack or the holder would be overloaded.
    CapacityExceeded,
}

/// Errors raised by ownership graph operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OwnershipError {
    /// The item (or the target backpack) is terminated.
    #[error("{item} is terminated")]
    Terminated { item: ItemId },

    /// A backpack's admission control rejected the item.
    #[error("{backpack} cannot contain {item}: {reason}")]
    InvalidContainment {
        item: ItemId,
        backpack: ItemId,
        reason: ContainmentRejection,
    },

    /// The acting character has zero hit points.
    #[error("{character} is dead")]
    DeadCharacter { character: CharacterId },

    /// Treasure can only be collected from a dead character.
    #[error("{character} is still alive")]
    NotACorpse { character: CharacterId },

    /// An item could not be placed on the requested anchor during construction.
    #[error("{item} does not fit {slot} of {character}")]
    InvalidPlacement {
        item: ItemId,
        character: CharacterId,
        slot: SlotId,
    },

    /// A ducat operation targeted an item that is not a purse.
    #[error("{item} is not a purse")]
    NotAPurse { item: ItemId },

    /// Withdrawal larger than the purse content.
    #[error("{purse} holds {available} ducats, {requested} requested")]
    InsufficientDucats {
        purse: ItemId,
        available: u32,
        requested: u32,
    },

    #[error("unknown item {item}")]
    UnknownItem { item: ItemId },

    #[error("unknown character {character}")]
    UnknownCharacter { character: CharacterId },

    /// Structural character validation failed.
    #[error("invalid character '{name}': {reason}")]
    InvalidCharacter { name: String, reason: &'static str },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl OwnershipError {
    /// Creates an InvalidContainment error.
    pub fn containment(item: ItemId, backpack: ItemId, reason: ContainmentRejection) -> Self {
        Self::InvalidContainment {
            item,
            backpack,
            reason,
        }
    }

    /// Returns true for the weight-driven sub-case of [`OwnershipError::InvalidContainment`].
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(
            self,
            Self::InvalidContainment {
                reason: ContainmentRejection::CapacityExceeded,
                ..
            }
        )
    }
}

impl DomainError for OwnershipError {
    fn severity(&self) -> ErrorSeverity {
        use OwnershipError::*;
        match self {
            InvalidContainment { reason, .. } => match reason {
                ContainmentRejection::CapacityExceeded | ContainmentRejection::HeldByOther => {
                    ErrorSeverity::Recoverable
                }
                _ => ErrorSeverity::Validation,
            },
            InsufficientDucats { .. } => ErrorSeverity::Recoverable,
            Terminated { .. } | DeadCharacter { .. } | NotACorpse { .. } => {
                ErrorSeverity::Validation
            }
            InvalidPlacement { .. } | NotAPurse { .. } | InvalidCharacter { .. } => {
                ErrorSeverity::Validation
            }
            UnknownItem { .. } | UnknownCharacter { .. } => ErrorSeverity::Validation,
            Registry(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use OwnershipError::*;
        match self {
            Terminated { .. } => "OWNERSHIP_TERMINATED",
            InvalidContainment {
                reason: ContainmentRejection::CapacityExceeded,
                ..
            } => "OWNERSHIP_CAPACITY_EXCEEDED",
            InvalidContainment { .. } => "OWNERSHIP_INVALID_CONTAINMENT",
            DeadCharacter { .. } => "OWNERSHIP_DEAD_CHARACTER",
            NotACorpse { .. } => "OWNERSHIP_NOT_A_CORPSE",
            InvalidPlacement { .. } => "OWNERSHIP_INVALID_PLACEMENT",
            NotAPurse { .. } => "OWNERSHIP_NOT_A_PURSE",
            InsufficientDucats { .. } => "OWNERSHIP_INSUFFICIENT_DUCATS",
            UnknownItem { .. } => "OWNERSHIP_UNKNOWN_ITEM",
            UnknownCharacter { .. } => "OWNERSHIP_UNKNOWN_CHARACTER",
            InvalidCharacter { .. } => "OWNERSHIP_INVALID_CHARACTER",
            Registry(err) => err.error_code(),
        }
    }
}
