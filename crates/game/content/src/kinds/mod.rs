//! Concrete character kinds.
//!
//! A kind fixes the anchor layout and the validity rules of a character, and
//! decides what it loots through [`TreasurePolicy`](satchel_core::TreasurePolicy).
//! Kinds validate their own rules, then hand a plain
//! [`CharacterSpec`](satchel_core::CharacterSpec) to the world.

mod hero;
mod monster;

pub use hero::{Hero, HeroPolicy};
pub use monster::{Monster, MonsterPolicy};

use satchel_core::{DomainError, ErrorSeverity, OwnershipError};

/// Rejection of a character kind's own validity rules.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum KindError {
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("maximum hit points {max_hitpoints} must be prime")]
    HitpointsNotPrime { max_hitpoints: u32 },

    #[error("strength {strength} outside 1..={max}")]
    StrengthOutOfRange { strength: u32, max: u32 },

    #[error("{count} anchors requested, between 1 and {max} allowed")]
    AnchorCount { count: usize, max: usize },

    #[error(transparent)]
    Ownership(#[from] OwnershipError),
}

impl DomainError for KindError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ownership(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "KIND_INVALID_NAME",
            Self::HitpointsNotPrime { .. } => "KIND_HITPOINTS_NOT_PRIME",
            Self::StrengthOutOfRange { .. } => "KIND_STRENGTH_OUT_OF_RANGE",
            Self::AnchorCount { .. } => "KIND_ANCHOR_COUNT",
            Self::Ownership(err) => err.error_code(),
        }
    }
}
