//! Ability scores
//!
//! The six classic abilities, the default score layout used when a player skips
//! rolling, and the interpretation bands shown next to each score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six character abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    /// All abilities in canonical (roll and display) order
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Intelligence,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Three-letter code, e.g. "STR"
    pub fn code(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Intelligence => "INT",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Intelligence => "Intelligence",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Intelligence => 1,
            Self::Dexterity => 2,
            Self::Constitution => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Ability::ALL
            .into_iter()
            .find(|a| a.code() == code)
            .ok_or_else(|| DomainError::parse(format!("Unknown ability code: {}", s)))
    }
}

/// A race's ability bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RaceBonus {
    /// Bonus to a single ability
    Ability(Ability, i32),
    /// Bonus to every ability
    AllAbilities(i32),
}

/// One score per ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbilityScores {
    scores: [i32; 6],
}

impl AbilityScores {
    /// Score every ability gets before profession and race adjustments
    pub const BASE_SCORE: i32 = 10;
    /// Score given to a profession's key abilities
    pub const KEY_ABILITY_SCORE: i32 = 14;

    /// Every ability at the same score
    pub fn uniform(score: i32) -> Self {
        Self { scores: [score; 6] }
    }

    /// Default scores when the player does not roll.
    ///
    /// Everything starts at 10, key abilities are raised to 14, then race
    /// bonuses are added.
    pub fn defaults(key_abilities: &[Ability], race_bonuses: &[RaceBonus]) -> Self {
        let mut scores = Self::uniform(Self::BASE_SCORE);
        for ability in key_abilities {
            scores.set(*ability, Self::KEY_ABILITY_SCORE);
        }
        for bonus in race_bonuses {
            match *bonus {
                RaceBonus::Ability(ability, value) => {
                    scores.set(ability, scores.get(ability) + value);
                }
                RaceBonus::AllAbilities(value) => {
                    for ability in Ability::ALL {
                        scores.set(ability, scores.get(ability) + value);
                    }
                }
            }
        }
        scores
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.scores[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        self.scores[ability.index()] = score;
    }

    /// Sum of all six scores
    pub fn total(&self) -> i32 {
        self.scores.iter().sum()
    }

    /// Scores in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

// Serialized as a map keyed by ability code
impl Serialize for AbilityScores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Ability::ALL.len()))?;
        for (ability, score) in self.iter() {
            map.serialize_entry(ability.code(), &score)?;
        }
        map.end()
    }
}

/// Interpretation band for a single score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatTier {
    Low,
    Average,
    High,
    VeryHigh,
}

impl StatTier {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s < 8 => Self::Low,
            s if s < 12 => Self::Average,
            s if s < 16 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

/// How an ability relates to a profession's key abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyStatRole {
    /// The profession's first key ability
    Primary,
    /// Any other key ability
    Secondary,
}

impl KeyStatRole {
    pub fn for_ability(ability: Ability, key_abilities: &[Ability]) -> Option<Self> {
        match key_abilities.iter().position(|a| *a == ability)? {
            0 => Some(Self::Primary),
            _ => Some(Self::Secondary),
        }
    }
}

/// Rating of a six-score total against the 6 x 3d6 mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreTotalRating {
    BelowAverage,
    Average,
    AboveAverage,
}

impl ScoreTotalRating {
    /// Mean of six 3d6 rolls
    pub const MEAN_TOTAL: i32 = 63;
    /// Distance from the mean still counted as average
    pub const TOLERANCE: i32 = 5;

    pub fn from_total(total: i32) -> Self {
        if total < Self::MEAN_TOTAL - Self::TOLERANCE {
            Self::BelowAverage
        } else if total > Self::MEAN_TOTAL + Self::TOLERANCE {
            Self::AboveAverage
        } else {
            Self::Average
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_codes_parse_case_insensitively() {
        assert_eq!("str".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!(" Cha ".parse::<Ability>().unwrap(), Ability::Charisma);
        assert!(matches!(
            "LUK".parse::<Ability>(),
            Err(DomainError::Parse(_))
        ));
    }

    #[test]
    fn test_ability_serde_uses_code() {
        let json = serde_json::to_string(&Ability::Wisdom).unwrap();
        assert_eq!(json, "\"WIS\"");
        let parsed: Ability = serde_json::from_str("\"DEX\"").unwrap();
        assert_eq!(parsed, Ability::Dexterity);
    }

    #[test]
    fn test_default_scores_without_profession_or_race() {
        let scores = AbilityScores::defaults(&[], &[]);
        assert!(scores.iter().all(|(_, s)| s == 10));
        assert_eq!(scores.total(), 60);
    }

    #[test]
    fn test_default_scores_apply_key_abilities_then_race_bonuses() {
        let scores = AbilityScores::defaults(
            &[Ability::Strength, Ability::Constitution],
            &[
                RaceBonus::Ability(Ability::Strength, 2),
                RaceBonus::AllAbilities(1),
            ],
        );
        assert_eq!(scores.get(Ability::Strength), 17);
        assert_eq!(scores.get(Ability::Constitution), 15);
        assert_eq!(scores.get(Ability::Intelligence), 11);
        assert_eq!(scores.get(Ability::Charisma), 11);
    }

    #[test]
    fn test_scores_serialize_as_code_map() {
        let mut scores = AbilityScores::uniform(10);
        scores.set(Ability::Dexterity, 16);
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(value["DEX"], 16);
        assert_eq!(value["STR"], 10);
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_stat_tier_bands() {
        assert_eq!(StatTier::from_score(3), StatTier::Low);
        assert_eq!(StatTier::from_score(7), StatTier::Low);
        assert_eq!(StatTier::from_score(8), StatTier::Average);
        assert_eq!(StatTier::from_score(11), StatTier::Average);
        assert_eq!(StatTier::from_score(12), StatTier::High);
        assert_eq!(StatTier::from_score(15), StatTier::High);
        assert_eq!(StatTier::from_score(16), StatTier::VeryHigh);
        assert_eq!(StatTier::from_score(18), StatTier::VeryHigh);
    }

    #[test]
    fn test_key_stat_role() {
        let keys = [Ability::Intelligence, Ability::Wisdom];
        assert_eq!(
            KeyStatRole::for_ability(Ability::Intelligence, &keys),
            Some(KeyStatRole::Primary)
        );
        assert_eq!(
            KeyStatRole::for_ability(Ability::Wisdom, &keys),
            Some(KeyStatRole::Secondary)
        );
        assert_eq!(KeyStatRole::for_ability(Ability::Strength, &keys), None);
    }

    #[test]
    fn test_total_rating() {
        assert_eq!(ScoreTotalRating::from_total(57), ScoreTotalRating::BelowAverage);
        assert_eq!(ScoreTotalRating::from_total(58), ScoreTotalRating::Average);
        assert_eq!(ScoreTotalRating::from_total(63), ScoreTotalRating::Average);
        assert_eq!(ScoreTotalRating::from_total(68), ScoreTotalRating::Average);
        assert_eq!(ScoreTotalRating::from_total(69), ScoreTotalRating::AboveAverage);
    }
}
