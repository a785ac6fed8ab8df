//! Single dice for the quick-roll tray

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuickDieError {
    #[error("Unsupported custom die: d{0} (choose from d4, d8, d10, d12, d100)")]
    UnsupportedSides(u32),
    #[error("Invalid die: '{0}'")]
    Invalid(String),
}

/// Die size accepted by [`QuickDie::custom`]. Only built through that check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomSides(u32);

impl CustomSides {
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// A single die rolled outside any check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickDie {
    D6,
    D20,
    /// One of [`QuickDie::CUSTOM_SIDES`]
    Custom(CustomSides),
}

impl QuickDie {
    /// Die sizes offered besides d6 and d20
    pub const CUSTOM_SIDES: [u32; 5] = [4, 8, 10, 12, 100];

    pub fn custom(sides: u32) -> Result<Self, QuickDieError> {
        if Self::CUSTOM_SIDES.contains(&sides) {
            Ok(Self::Custom(CustomSides(sides)))
        } else {
            Err(QuickDieError::UnsupportedSides(sides))
        }
    }

    pub fn sides(&self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D20 => 20,
            Self::Custom(sides) => sides.get(),
        }
    }

    /// Roll once, drawing from `gen_range(1, sides)`
    pub fn roll<R>(&self, mut gen_range: R) -> u32
    where
        R: FnMut(u32, u32) -> u32,
    {
        gen_range(1, self.sides())
    }
}

impl fmt::Display for QuickDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for QuickDie {
    type Err = QuickDieError;

    /// Accepts "d6", "D20", "d100" or bare sizes like "12"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_prefix('d').unwrap_or(trimmed.as_str());
        let sides: u32 = digits
            .parse()
            .map_err(|_| QuickDieError::Invalid(s.to_string()))?;
        match sides {
            6 => Ok(Self::D6),
            20 => Ok(Self::D20),
            other => Self::custom(other),
        }
    }
}
