//! Ability checks
//!
//! A check rolls a dice expression, adds the character's modifier, and succeeds
//! when the total meets or beats the difficulty. There is no critical
//! success or failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ability::Ability;
use super::dice::{DiceExpression, RollOutcome};
use crate::error::DomainError;

/// How an external (character) modifier combines with one embedded in the dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierPolicy {
    /// Both modifiers always apply
    #[default]
    Additive,
    /// The external modifier is dropped when the expression has a non-zero modifier.
    ///
    /// An explicit `+0` or `-0` segment parses to modifier 0 and does not suppress,
    /// so "1d20+0" behaves like "1d20".
    SuppressWhenEmbedded,
}

impl ModifierPolicy {
    /// The external modifier that actually applies to `expression`
    pub fn effective_external(&self, expression: &DiceExpression, external_modifier: i32) -> i32 {
        match self {
            Self::Additive => external_modifier,
            Self::SuppressWhenEmbedded if expression.has_modifier() => 0,
            Self::SuppressWhenEmbedded => external_modifier,
        }
    }
}

impl fmt::Display for ModifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Additive => f.write_str("additive"),
            Self::SuppressWhenEmbedded => f.write_str("suppress-when-embedded"),
        }
    }
}

impl FromStr for ModifierPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additive" => Ok(Self::Additive),
            "suppress-when-embedded" | "suppress_when_embedded" => Ok(Self::SuppressWhenEmbedded),
            _ => Err(DomainError::parse(format!("Unknown modifier policy: {}", s))),
        }
    }
}

/// Outcome of one ability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityCheckResult {
    outcome: RollOutcome,
    difficulty: i32,
    success: bool,
}

impl AbilityCheckResult {
    /// Compare a rolled outcome against a difficulty. Ties succeed.
    pub fn evaluate(outcome: RollOutcome, difficulty: i32) -> Self {
        let success = outcome.total() >= i64::from(difficulty);
        Self {
            outcome,
            difficulty,
            success,
        }
    }

    pub fn outcome(&self) -> &RollOutcome {
        &self.outcome
    }

    pub fn rolls(&self) -> &[u32] {
        self.outcome.individual_rolls()
    }

    /// Total modifier applied to the dice (embedded plus external)
    pub fn modifier_applied(&self) -> i64 {
        self.outcome.modifier()
    }

    pub fn total(&self) -> i64 {
        self.outcome.total()
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Format as "1d20(12) + 3 = 15 vs DC 15: success"
    pub fn summary(&self) -> String {
        format!(
            "{} vs DC {}: {}",
            self.outcome.breakdown(),
            self.difficulty,
            if self.success { "success" } else { "failure" }
        )
    }
}

fn default_ability_code() -> String {
    Ability::Strength.code().to_string()
}

fn default_difficulty() -> i32 {
    CheckSuggestion::DEFAULT_DIFFICULTY
}

fn default_reason() -> String {
    "This action requires ability.".to_string()
}

fn default_success_outcome() -> String {
    "The action succeeds.".to_string()
}

fn default_failure_outcome() -> String {
    "The action fails.".to_string()
}

fn default_recommended_dice() -> String {
    CheckSuggestion::DEFAULT_DICE.to_string()
}

/// A check proposed by the narrator for a player action.
///
/// Fields arrive as loosely structured JSON; any missing field falls back to
/// a default. `recommended_dice` is kept as text and parsed at resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuggestion {
    #[serde(default = "default_ability_code")]
    pub ability_code: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
    #[serde(default = "default_reason")]
    pub reason: String,
    #[serde(default = "default_success_outcome")]
    pub success_outcome: String,
    #[serde(default = "default_failure_outcome")]
    pub failure_outcome: String,
    #[serde(default = "default_recommended_dice")]
    pub recommended_dice: String,
}

impl CheckSuggestion {
    pub const DEFAULT_DIFFICULTY: i32 = 15;
    pub const DEFAULT_DICE: &'static str = "1d20";

    /// The suggested ability, falling back to STR for an unknown code
    pub fn ability(&self) -> Ability {
        self.ability_code.parse().unwrap_or(Ability::Strength)
    }

    /// Narrative text for the given result
    pub fn outcome_text(&self, success: bool) -> &str {
        if success {
            &self.success_outcome
        } else {
            &self.failure_outcome
        }
    }
}

impl Default for CheckSuggestion {
    fn default() -> Self {
        Self {
            ability_code: default_ability_code(),
            difficulty: default_difficulty(),
            reason: default_reason(),
            success_outcome: default_success_outcome(),
            failure_outcome: default_failure_outcome(),
            recommended_dice: default_recommended_dice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d20() -> DiceExpression {
        DiceExpression::new(1, 20, 0).unwrap()
    }

    #[test]
    fn test_meeting_difficulty_succeeds() {
        let outcome = RollOutcome::from_rolls(d20(), vec![12], 3);
        let result = AbilityCheckResult::evaluate(outcome, 15);
        assert_eq!(result.total(), 15);
        assert!(result.is_success());
    }

    #[test]
    fn test_below_difficulty_fails() {
        let outcome = RollOutcome::from_rolls(d20(), vec![10], 0);
        let result = AbilityCheckResult::evaluate(outcome, 15);
        assert_eq!(result.total(), 10);
        assert!(!result.is_success());
    }

    #[test]
    fn test_natural_twenty_is_not_special() {
        let outcome = RollOutcome::from_rolls(d20(), vec![20], -6);
        let result = AbilityCheckResult::evaluate(outcome, 15);
        assert!(!result.is_success());

        let outcome = RollOutcome::from_rolls(d20(), vec![1], 20);
        let result = AbilityCheckResult::evaluate(outcome, 15);
        assert!(result.is_success());
    }

    #[test]
    fn test_result_exposes_rolls_and_modifier() {
        let expr = DiceExpression::new(2, 6, 1).unwrap();
        let outcome = RollOutcome::from_rolls(expr, vec![3, 4], 3);
        let result = AbilityCheckResult::evaluate(outcome, 12);
        assert_eq!(result.rolls(), &[3, 4]);
        assert_eq!(result.modifier_applied(), 3);
        assert_eq!(result.difficulty(), 12);
        assert_eq!(result.summary(), "2d6[3, 4] + 3 = 10 vs DC 12: failure");
    }

    #[test]
    fn test_modifier_policy_additive() {
        let policy = ModifierPolicy::Additive;
        let embedded = DiceExpression::new(1, 20, 2).unwrap();
        assert_eq!(policy.effective_external(&embedded, 3), 3);
        assert_eq!(policy.effective_external(&d20(), 3), 3);
    }

    #[test]
    fn test_modifier_policy_suppress_when_embedded() {
        let policy = ModifierPolicy::SuppressWhenEmbedded;
        let embedded = DiceExpression::new(1, 20, -1).unwrap();
        assert_eq!(policy.effective_external(&embedded, 3), 0);
        assert_eq!(policy.effective_external(&d20(), 3), 3);
    }

    #[test]
    fn test_suppress_ignores_explicit_zero_modifier() {
        let policy = ModifierPolicy::SuppressWhenEmbedded;
        let plus_zero = DiceExpression::parse("1d20+0").unwrap();
        assert_eq!(plus_zero, d20());
        assert_eq!(policy.effective_external(&plus_zero, 4), 4);
        let minus_zero = DiceExpression::parse("1d20-0").unwrap();
        assert_eq!(policy.effective_external(&minus_zero, 4), 4);
    }

    #[test]
    fn test_modifier_policy_parse() {
        assert_eq!(
            "additive".parse::<ModifierPolicy>().unwrap(),
            ModifierPolicy::Additive
        );
        assert_eq!(
            "Suppress-When-Embedded".parse::<ModifierPolicy>().unwrap(),
            ModifierPolicy::SuppressWhenEmbedded
        );
        assert!("sometimes".parse::<ModifierPolicy>().is_err());
        assert_eq!(
            ModifierPolicy::SuppressWhenEmbedded.to_string(),
            "suppress-when-embedded"
        );
    }

    #[test]
    fn test_suggestion_defaults_for_missing_fields() {
        let suggestion: CheckSuggestion = serde_json::from_str("{}").unwrap();
        assert_eq!(suggestion, CheckSuggestion::default());
        assert_eq!(suggestion.ability(), Ability::Strength);
        assert_eq!(suggestion.difficulty, 15);
        assert_eq!(suggestion.recommended_dice, "1d20");
    }

    #[test]
    fn test_suggestion_from_full_payload() {
        let json = r#"{
            "ability_code": "dex",
            "difficulty": 12,
            "reason": "Balancing on the beam takes agility.",
            "success_outcome": "You cross safely.",
            "failure_outcome": "You fall into the river.",
            "recommended_dice": "1d20+1"
        }"#;
        let suggestion: CheckSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.ability(), Ability::Dexterity);
        assert_eq!(suggestion.difficulty, 12);
        assert_eq!(suggestion.outcome_text(true), "You cross safely.");
        assert_eq!(suggestion.outcome_text(false), "You fall into the river.");
    }

    #[test]
    fn test_suggestion_unknown_ability_falls_back_to_strength() {
        let suggestion = CheckSuggestion {
            ability_code: "LUCK".to_string(),
            ..CheckSuggestion::default()
        };
        assert_eq!(suggestion.ability(), Ability::Strength);
    }
}
