//! Concrete content for the ownership graph.
//!
//! This crate houses the collaborators `satchel-core` only knows by interface:
//! - Identification schemes per item kind ([`ids`])
//! - Item value formulas ([`formulas`])
//! - Hero and monster character kinds with their looting policies ([`kinds`])
//! - Tunables for all of the above ([`config`])
//! - Loaders for TOML configuration and RON scenarios (feature `loaders`)

pub mod config;
pub mod formulas;
pub mod ids;
pub mod kinds;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use config::{ContentConfig, HeroTuning, MonsterTuning, ValueFormulas};
pub use formulas::ItemForge;
pub use ids::{Fibonacci, MultipleOf, Primes, default_registry};
pub use kinds::{Hero, HeroPolicy, KindError, Monster, MonsterPolicy};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Scenario, ScenarioDef, ScenarioLoader};
