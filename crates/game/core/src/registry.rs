//! Identification number registry.
//!
//! Every item kind has its own identification scheme (multiples of six, primes,
//! ...). The scheme is injected as an [`IdPolicy`]; the [`Registry`] tracks which
//! numbers have been issued per kind and rejects duplicates. A registry is an
//! ordinary value owned by one [`World`](crate::World), so the uniqueness scope is
//! exactly that world.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{DomainError, ErrorSeverity};
use crate::state::ItemCategory;

/// Identification scheme for one item kind.
pub trait IdPolicy: Send + Sync {
    /// Returns true if `id` is acceptable for this kind (ignoring uniqueness).
    fn is_valid_id(&self, id: u64) -> bool;

    /// Produces a valid id not contained in `issued`, or `None` when the scheme is exhausted.
    fn generate_id(&self, issued: &BTreeSet<u64>) -> Option<u64>;
}

/// Accepts any number; generates the successor of the largest issued one.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyId;

impl IdPolicy for AnyId {
    fn is_valid_id(&self, _id: u64) -> bool {
        true
    }

    fn generate_id(&self, issued: &BTreeSet<u64>) -> Option<u64> {
        match issued.last() {
            None => Some(0),
            // past the top: reuse the lowest gap among the issued numbers
            Some(&max) => max.checked_add(1).or_else(|| {
                (0u64..)
                    .zip(issued.iter())
                    .find(|(expected, id)| expected != *id)
                    .map(|(gap, _)| gap)
            }),
        }
    }
}

/// Errors raised while issuing identification numbers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// The requested number violates the kind's identification scheme.
    #[error("{id} is not a valid {category} identification number")]
    InvalidId { category: ItemCategory, id: u64 },

    /// The requested number was already issued for this kind.
    #[error("{category} identification number {id} is already in use")]
    DuplicateId { category: ItemCategory, id: u64 },

    /// The scheme cannot produce another unused number.
    #[error("no {category} identification numbers left")]
    Exhausted { category: ItemCategory },
}

impl DomainError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidId { .. } | Self::DuplicateId { .. } => ErrorSeverity::Validation,
            Self::Exhausted { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "REGISTRY_INVALID_ID",
            Self::DuplicateId { .. } => "REGISTRY_DUPLICATE_ID",
            Self::Exhausted { .. } => "REGISTRY_EXHAUSTED",
        }
    }
}

/// Per-kind identification policies plus the numbers issued so far.
pub struct Registry {
    policies: BTreeMap<ItemCategory, Box<dyn IdPolicy>>,
    issued: BTreeMap<ItemCategory, BTreeSet<u64>>,
}

impl Registry {
    /// Creates a registry where every kind uses [`AnyId`].
    pub fn new() -> Self {
        Self {
            policies: BTreeMap::new(),
            issued: BTreeMap::new(),
        }
    }

    /// Installs the identification scheme for `category` (builder pattern).
    pub fn with_policy(mut self, category: ItemCategory, policy: impl IdPolicy + 'static) -> Self {
        self.policies.insert(category, Box::new(policy));
        self
    }

    fn policy(&self, category: ItemCategory) -> &dyn IdPolicy {
        self.policies
            .get(&category)
            .map(|policy| policy.as_ref())
            .unwrap_or(&AnyId)
    }

    pub fn is_valid_id(&self, category: ItemCategory, id: u64) -> bool {
        self.policy(category).is_valid_id(id)
    }

    pub fn is_issued(&self, category: ItemCategory, id: u64) -> bool {
        self.issued
            .get(&category)
            .is_some_and(|issued| issued.contains(&id))
    }

    pub fn issued_count(&self, category: ItemCategory) -> usize {
        self.issued.get(&category).map_or(0, BTreeSet::len)
    }

    /// Checks whether `requested` (or a generated number) could be issued, without issuing it.
    pub fn preview(&self, category: ItemCategory, requested: Option<u64>) -> Result<u64, RegistryError> {
        let empty = BTreeSet::new();
        let issued = self.issued.get(&category).unwrap_or(&empty);
        let policy = self.policy(category);

        match requested {
            Some(id) if !policy.is_valid_id(id) => Err(RegistryError::InvalidId { category, id }),
            Some(id) if issued.contains(&id) => Err(RegistryError::DuplicateId { category, id }),
            Some(id) => Ok(id),
            None => policy
                .generate_id(issued)
                .filter(|id| policy.is_valid_id(*id) && !issued.contains(id))
                .ok_or(RegistryError::Exhausted { category }),
        }
    }

    /// Issues `requested`, or a freshly generated number when `None`.
    pub fn issue(&mut self, category: ItemCategory, requested: Option<u64>) -> Result<u64, RegistryError> {
        let id = self.preview(category, requested)?;
        self.issued.entry(category).or_default().insert(id);
        Ok(id)
    }

    /// Returns a number to the pool. Only used to roll back an aborted construction.
    pub(crate) fn release(&mut self, category: ItemCategory, id: u64) {
        if let Some(issued) = self.issued.get_mut(&category) {
            issued.remove(&id);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policies", &self.policies.keys().collect::<Vec<_>>())
            .field("issued", &self.issued)
            .finish()
    }
}
