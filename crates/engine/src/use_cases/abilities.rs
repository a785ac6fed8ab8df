//! Ability score rolling for character creation.
//!
//! Each ability gets 3d6, rolled in canonical order. The player may reroll
//! the whole set once, then accepts the result.

use talemaster_domain::{
    Ability, AbilityScores, DiceExpression, RollOutcome, ScoreTotalRating, StatTier,
};

use super::dice::DiceEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AbilityRollError {
    #[error("Ability scores have already been rolled")]
    AlreadyRolled,
    #[error("Ability scores have not been rolled yet")]
    NotRolled,
    #[error("The reroll has already been used")]
    RerollUsed,
}

/// One full set of rolled ability scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledAbilities {
    outcomes: Vec<(Ability, RollOutcome)>,
}

impl RolledAbilities {
    fn roll(engine: &DiceEngine) -> Self {
        let outcomes = Ability::ALL
            .into_iter()
            .map(|ability| (ability, engine.evaluate(&DiceExpression::THREE_D6, 0)))
            .collect();
        Self { outcomes }
    }

    /// Dice rolled for each ability, in canonical order
    pub fn outcomes(&self) -> &[(Ability, RollOutcome)] {
        &self.outcomes
    }

    pub fn scores(&self) -> AbilityScores {
        let mut scores = AbilityScores::default();
        for (ability, outcome) in &self.outcomes {
            // 3d6 totals are 3..=18
            scores.set(*ability, outcome.total() as i32);
        }
        scores
    }

    pub fn tier(&self, ability: Ability) -> StatTier {
        StatTier::from_score(self.scores().get(ability))
    }

    pub fn rating(&self) -> ScoreTotalRating {
        ScoreTotalRating::from_total(self.scores().total())
    }
}

/// Character-creation state for rolled ability scores.
#[derive(Debug, Clone, Default)]
pub struct AbilityRollSession {
    current: Option<RolledAbilities>,
    reroll_used: bool,
}

impl AbilityRollSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial roll. Only allowed once.
    pub fn roll(&mut self, engine: &DiceEngine) -> Result<&RolledAbilities, AbilityRollError> {
        if self.current.is_some() {
            return Err(AbilityRollError::AlreadyRolled);
        }
        let rolled = RolledAbilities::roll(engine);
        tracing::info!(total = rolled.scores().total(), "Rolled ability scores");
        Ok(&*self.current.insert(rolled))
    }

    /// Replace the whole set with a fresh roll. Only allowed once, after `roll`.
    pub fn reroll(&mut self, engine: &DiceEngine) -> Result<&RolledAbilities, AbilityRollError> {
        if self.current.is_none() {
            return Err(AbilityRollError::NotRolled);
        }
        if self.reroll_used {
            return Err(AbilityRollError::RerollUsed);
        }
        self.reroll_used = true;
        let rolled = RolledAbilities::roll(engine);
        tracing::info!(total = rolled.scores().total(), "Rerolled ability scores");
        Ok(&*self.current.insert(rolled))
    }

    pub fn current(&self) -> Option<&RolledAbilities> {
        self.current.as_ref()
    }

    pub fn can_reroll(&self) -> bool {
        self.current.is_some() && !self.reroll_used
    }

    /// Keep the current scores.
    pub fn accept(self) -> Result<AbilityScores, AbilityRollError> {
        self.current
            .map(|rolled| rolled.scores())
            .ok_or(AbilityRollError::NotRolled)
    }
}
