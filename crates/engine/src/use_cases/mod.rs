//! Use cases - User story orchestration.
//!
//! - `dice` - parsing, rolling and ability checks
//! - `abilities` - rolling ability scores during character creation

pub mod abilities;
pub mod dice;

// Re-export main types
pub use abilities::{AbilityRollError, AbilityRollSession, RolledAbilities};
pub use dice::{DiceEngine, DiceError};
