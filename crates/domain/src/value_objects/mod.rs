//! Value objects for dice rolling and ability checks

mod ability;
mod ability_check;
mod dice;
mod quick_die;

pub use ability::{Ability, AbilityScores, KeyStatRole, RaceBonus, ScoreTotalRating, StatTier};
pub use ability_check::{AbilityCheckResult, CheckSuggestion, ModifierPolicy};
pub use dice::{DiceExpression, DiceLimitError, DiceLimits, DiceParseError, RollOutcome};
pub use quick_die::{CustomSides, QuickDie, QuickDieError};
