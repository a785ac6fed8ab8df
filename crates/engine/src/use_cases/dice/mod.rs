//! Dice use cases.
//!
//! Handles dice rolls and ability checks. The flow for a check is:
//! 1. Parse the expression (strict) and check it against the configured limits
//! 2. Roll it with the injected random source, adding the character's modifier
//! 3. Compare the total against the difficulty (ties succeed)

use std::sync::Arc;

use talemaster_domain::{
    AbilityCheckResult, AbilityScores, CheckSuggestion, DiceExpression, DiceLimitError,
    DiceParseError, QuickDie, RollOutcome,
};

use crate::infrastructure::config::DiceConfig;
use crate::infrastructure::ports::RandomPort;

/// Errors from parsing a caller-supplied expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error(transparent)]
    Parse(#[from] DiceParseError),
    #[error(transparent)]
    Range(#[from] DiceLimitError),
}

/// Parses, rolls and resolves dice against an injected random source.
pub struct DiceEngine {
    random: Arc<dyn RandomPort>,
    config: DiceConfig,
}

impl DiceEngine {
    pub fn new(random: Arc<dyn RandomPort>, config: DiceConfig) -> Self {
        Self { random, config }
    }

    pub fn config(&self) -> &DiceConfig {
        &self.config
    }

    /// Parse an expression and enforce the configured dice limits.
    pub fn parse(&self, input: &str) -> Result<DiceExpression, DiceError> {
        let expression = DiceExpression::parse(input)?;
        self.config.limits.check(&expression)?;
        Ok(expression)
    }

    /// Parse an expression, substituting the configured fallback on any error.
    ///
    /// The substitution is logged; `parse` itself never falls back.
    pub fn parse_or_fallback(&self, input: &str) -> DiceExpression {
        match self.parse(input) {
            Ok(expression) => expression,
            Err(e) => {
                let fallback = self.config.fallback_expression;
                tracing::warn!(
                    input = %input,
                    error = %e,
                    fallback = %fallback,
                    "Unusable dice expression, rolling fallback"
                );
                fallback
            }
        }
    }

    /// Roll an expression once, adding `external_modifier` to its own modifier.
    ///
    /// Limits are not re-checked here; they apply to parsed input.
    pub fn evaluate(&self, expression: &DiceExpression, external_modifier: i32) -> RollOutcome {
        let outcome = expression
            .roll_with_modifier(external_modifier, |min, max| self.random.gen_range(min, max));
        tracing::debug!(
            expression = %expression,
            external_modifier,
            rolls = ?outcome.individual_rolls(),
            total = outcome.total(),
            "Rolled dice"
        );
        outcome
    }

    /// Parse then roll.
    pub fn evaluate_str(
        &self,
        input: &str,
        external_modifier: i32,
    ) -> Result<RollOutcome, DiceError> {
        let expression = self.parse(input)?;
        Ok(self.evaluate(&expression, external_modifier))
    }

    /// Resolve an ability check: roll, add the external modifier, compare with `difficulty`.
    ///
    /// Whether the external modifier applies alongside an embedded one follows
    /// the configured `ModifierPolicy`.
    pub fn resolve(
        &self,
        expression: &DiceExpression,
        external_modifier: i32,
        difficulty: i32,
    ) -> AbilityCheckResult {
        let policy = self.config.modifier_policy;
        let applied = policy.effective_external(expression, external_modifier);
        if applied != external_modifier {
            tracing::info!(
                expression = %expression,
                external_modifier,
                %policy,
                "External modifier dropped: expression already has a modifier"
            );
        }

        let result = AbilityCheckResult::evaluate(self.evaluate(expression, applied), difficulty);
        tracing::info!(
            breakdown = %result.outcome().breakdown(),
            difficulty,
            success = result.is_success(),
            "Resolved ability check"
        );
        result
    }

    /// Parse then resolve.
    pub fn resolve_str(
        &self,
        input: &str,
        external_modifier: i32,
        difficulty: i32,
    ) -> Result<AbilityCheckResult, DiceError> {
        let expression = self.parse(input)?;
        Ok(self.resolve(&expression, external_modifier, difficulty))
    }

    /// Resolve a narrator-suggested check for a character.
    ///
    /// Uses the recommended dice (falling back if unusable) and the character's
    /// score in the suggested ability as the external modifier.
    pub fn resolve_suggestion(
        &self,
        suggestion: &CheckSuggestion,
        scores: &AbilityScores,
    ) -> AbilityCheckResult {
        let expression = self.parse_or_fallback(&suggestion.recommended_dice);
        let ability = suggestion.ability();
        tracing::debug!(%ability, reason = %suggestion.reason, "Resolving suggested check");
        self.resolve(&expression, scores.get(ability), suggestion.difficulty)
    }

    /// Roll a single die from the quick-roll tray.
    pub fn quick_roll(&self, die: QuickDie) -> u32 {
        let value = die.roll(|min, max| self.random.gen_range(min, max));
        tracing::debug!(%die, value, "Quick roll");
        value
    }
}
