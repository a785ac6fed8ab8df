//! Talemaster domain: dice notation, rolls, ability scores and ability checks.
//!
//! Everything here is pure. Randomness comes in as a `gen_range(min, max)`
//! closure so callers choose the source (seeded, scripted, or OS-backed).

pub mod error;
pub mod value_objects;

pub use error::DomainError;

pub use value_objects::{
    Ability, AbilityCheckResult, AbilityScores, CheckSuggestion, CustomSides, DiceExpression,
    DiceLimitError, DiceLimits, DiceParseError, KeyStatRole, ModifierPolicy, QuickDie,
    QuickDieError, RaceBonus, RollOutcome, ScoreTotalRating, StatTier,
};
