//! Identification number schemes per item kind.
//!
//! Each scheme issues the smallest valid number above everything issued so far.

use std::collections::BTreeSet;

use satchel_core::{AnyId, IdPolicy, ItemCategory, Registry};

fn next_after(issued: &BTreeSet<u64>) -> Option<u64> {
    match issued.last() {
        None => Some(1),
        Some(&max) => max.checked_add(1),
    }
}

/// Positive multiples of a fixed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultipleOf(pub u64);

impl IdPolicy for MultipleOf {
    fn is_valid_id(&self, id: u64) -> bool {
        self.0 != 0 && id != 0 && id % self.0 == 0
    }

    fn generate_id(&self, issued: &BTreeSet<u64>) -> Option<u64> {
        if self.0 == 0 {
            return None;
        }
        let floor = next_after(issued)?;
        floor.div_ceil(self.0).checked_mul(self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Primes;

impl Primes {
    pub fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        if n < 4 {
            return true;
        }
        if n % 2 == 0 || n % 3 == 0 {
            return false;
        }
        let mut d = 5u64;
        while d.checked_mul(d).is_some_and(|sq| sq <= n) {
            if n % d == 0 || n % (d + 2) == 0 {
                return false;
            }
            d += 6;
        }
        true
    }
}

impl IdPolicy for Primes {
    fn is_valid_id(&self, id: u64) -> bool {
        Self::is_prime(id)
    }

    fn generate_id(&self, issued: &BTreeSet<u64>) -> Option<u64> {
        let mut candidate = next_after(issued)?;
        while !Self::is_prime(candidate) {
            candidate = candidate.checked_add(1)?;
        }
        Some(candidate)
    }
}

/// Fibonacci numbers starting at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fibonacci;

impl Fibonacci {
    /// The sequence up to the largest term representable in `u64`.
    fn sequence() -> impl Iterator<Item = u64> {
        std::iter::successors(Some((1u64, Some(2u64))), |&(current, next)| {
            next.map(|term| (term, current.checked_add(term)))
        })
        .map(|(term, _)| term)
    }
}

impl IdPolicy for Fibonacci {
    fn is_valid_id(&self, id: u64) -> bool {
        Self::sequence().take_while(|n| *n <= id).any(|n| n == id)
    }

    fn generate_id(&self, issued: &BTreeSet<u64>) -> Option<u64> {
        let floor = next_after(issued)?;
        Self::sequence().find(|n| *n >= floor)
    }
}

/// Registry with the standard scheme for every item kind.
pub fn default_registry() -> Registry {
    Registry::new()
        .with_policy(ItemCategory::Weapon, MultipleOf(6))
        .with_policy(ItemCategory::Armor, Primes)
        .with_policy(ItemCategory::Backpack, AnyId)
        .with_policy(ItemCategory::Purse, Fibonacci)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued(ids: &[u64]) -> BTreeSet<u64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn multiples_of_six() {
        let policy = MultipleOf(6);
        assert!(policy.is_valid_id(12));
        assert!(!policy.is_valid_id(0));
        assert!(!policy.is_valid_id(13));
        assert_eq!(policy.generate_id(&issued(&[])), Some(6));
        assert_eq!(policy.generate_id(&issued(&[6, 12])), Some(18));
        assert_eq!(policy.generate_id(&issued(&[7])), Some(12));
    }

    #[test]
    fn primes() {
        let primes: Vec<u64> = (0..30).filter(|n| Primes::is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(Primes.generate_id(&issued(&[])), Some(2));
        assert_eq!(Primes.generate_id(&issued(&[2, 3, 5, 7])), Some(11));
    }

    #[test]
    fn fibonacci() {
        let head: Vec<u64> = Fibonacci::sequence().take(8).collect();
        assert_eq!(head, vec![1, 2, 3, 5, 8, 13, 21, 34]);
        assert!(Fibonacci.is_valid_id(21));
        assert!(!Fibonacci.is_valid_id(4));
        assert_eq!(Fibonacci.generate_id(&issued(&[])), Some(1));
        assert_eq!(Fibonacci.generate_id(&issued(&[1, 2, 3])), Some(5));
        assert!(Fibonacci::sequence().last().is_some());
    }

    #[test]
    fn default_registry_issues_per_kind() {
        let mut registry = default_registry();
        assert_eq!(registry.issue(ItemCategory::Weapon, None), Ok(6));
        assert_eq!(registry.issue(ItemCategory::Armor, None), Ok(2));
        assert_eq!(registry.issue(ItemCategory::Purse, None), Ok(1));
        assert!(registry.issue(ItemCategory::Armor, Some(9)).is_err());
        assert_eq!(registry.issue(ItemCategory::Weapon, None), Ok(12));
    }
}
