//! Dice rolling value objects and parsing
//!
//! Supports dice expressions like "3d6", "1d20+5", "2d8-3".
//! Parsing is strict: anything that does not match `<count>d<sides>[+-<modifier>]`
//! is rejected, and callers decide whether to substitute a default.
//!
//! Rolling never touches a global RNG. The caller injects a `gen_range(min, max)`
//! closure that returns a value in the inclusive range `[min, max]`.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static DICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)d(\d+)([+-]\d+)?$").expect("valid regex"));

/// Error when parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// Input does not match `<count>d<sides>[+-<modifier>]`
    #[error("Invalid dice expression: '{input}'")]
    InvalidExpression { input: String },
    /// Dice count must be at least 1
    #[error("Invalid dice expression: '{input}' (dice count must be at least 1)")]
    ZeroDice { input: String },
    /// Die must have at least one side
    #[error("Invalid dice expression: '{input}' (die must have at least 1 side)")]
    ZeroSides { input: String },
}

impl DiceParseError {
    /// The input that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidExpression { input }
            | Self::ZeroDice { input }
            | Self::ZeroSides { input } => input,
        }
    }

    fn invalid(input: &str) -> Self {
        Self::InvalidExpression {
            input: input.to_string(),
        }
    }
}

/// A parsed dice expression like "2d6+3"
///
/// Immutable once built. Serializes as its canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpression {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceExpression {
    /// A single d20, the default check die
    pub const D20: DiceExpression = DiceExpression {
        count: 1,
        sides: 20,
        modifier: 0,
    };

    /// Three six-sided dice, used for rolling ability scores
    pub const THREE_D6: DiceExpression = DiceExpression {
        count: 3,
        sides: 6,
        modifier: 0,
    };

    /// Create a new dice expression
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceParseError> {
        let canonical = || Self::format_parts(count, sides, modifier);
        if count == 0 {
            return Err(DiceParseError::ZeroDice { input: canonical() });
        }
        if sides == 0 {
            return Err(DiceParseError::ZeroSides { input: canonical() });
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Parse a dice expression string like "1d20+5", "2d8-3", "3d6"
    ///
    /// Case-insensitive; whitespace anywhere in the input is ignored.
    /// The count is required ("d20" is rejected).
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        let caps = DICE_RE
            .captures(&normalized)
            .ok_or_else(|| DiceParseError::invalid(input))?;

        // Digit runs that overflow the field types are malformed input
        let count: u32 = caps[1].parse().map_err(|_| DiceParseError::invalid(input))?;
        let sides: u32 = caps[2].parse().map_err(|_| DiceParseError::invalid(input))?;
        let modifier: i32 = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| DiceParseError::invalid(input))?,
            None => 0,
        };

        if count == 0 {
            return Err(DiceParseError::ZeroDice {
                input: input.to_string(),
            });
        }
        if sides == 0 {
            return Err(DiceParseError::ZeroSides {
                input: input.to_string(),
            });
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Number of dice rolled (N in NdS)
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Faces per die (S in NdS)
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Modifier embedded in the expression (M in NdS+M)
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Whether the expression carries its own `+M` / `-M` segment
    pub fn has_modifier(&self) -> bool {
        self.modifier != 0
    }

    /// Get the minimum possible total
    pub fn min_total(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    /// Get the maximum possible total
    pub fn max_total(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }

    /// Roll the dice, drawing each die from `gen_range(1, sides)`
    pub fn roll_with<R>(&self, gen_range: R) -> RollOutcome
    where
        R: FnMut(u32, u32) -> u32,
    {
        self.roll_with_modifier(0, gen_range)
    }

    /// Roll the dice and add an external modifier on top of the embedded one
    pub fn roll_with_modifier<R>(&self, external_modifier: i32, mut gen_range: R) -> RollOutcome
    where
        R: FnMut(u32, u32) -> u32,
    {
        let individual_rolls: Vec<u32> = (0..self.count)
            .map(|_| {
                let roll = gen_range(1, self.sides);
                debug_assert!(
                    (1..=self.sides).contains(&roll),
                    "random source returned {roll} for a d{}",
                    self.sides
                );
                roll
            })
            .collect();

        let modifier = i64::from(self.modifier) + i64::from(external_modifier);
        RollOutcome::from_rolls(*self, individual_rolls, modifier)
    }

    fn format_parts(count: u32, sides: u32, modifier: i32) -> String {
        match modifier {
            0 => format!("{}d{}", count, sides),
            m if m > 0 => format!("{}d{}+{}", count, sides, m),
            m => format!("{}d{}{}", count, sides, m),
        }
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::format_parts(self.count, self.sides, self.modifier))
    }
}

impl FromStr for DiceExpression {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceExpression {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceExpression> for String {
    fn from(value: DiceExpression) -> Self {
        value.to_string()
    }
}

/// A dice limit was exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiceLimitError {
    #[error("Too many dice: {count} (limit is {max})")]
    TooManyDice { count: u32, max: u32 },
    #[error("Too many sides: d{sides} (limit is d{max})")]
    TooManySides { sides: u32, max: u32 },
}

/// Sanity ceiling on dice count and die size.
///
/// The parser accepts any count/sides; limits are a caller policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceLimits {
    pub max_count: u32,
    pub max_sides: u32,
}

impl DiceLimits {
    pub const DEFAULT_MAX_COUNT: u32 = 100;
    pub const DEFAULT_MAX_SIDES: u32 = 1000;

    pub fn new(max_count: u32, max_sides: u32) -> Self {
        Self {
            max_count,
            max_sides,
        }
    }

    /// Check an expression against the limits
    pub fn check(&self, expression: &DiceExpression) -> Result<(), DiceLimitError> {
        if expression.count() > self.max_count {
            return Err(DiceLimitError::TooManyDice {
                count: expression.count(),
                max: self.max_count,
            });
        }
        if expression.sides() > self.max_sides {
            return Err(DiceLimitError::TooManySides {
                sides: expression.sides(),
                max: self.max_sides,
            });
        }
        Ok(())
    }
}

impl Default for DiceLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_COUNT, Self::DEFAULT_MAX_SIDES)
    }
}

/// Result of rolling dice once
///
/// `total` is always `dice_total + modifier`, with no clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    expression: DiceExpression,
    individual_rolls: Vec<u32>,
    dice_total: i64,
    modifier: i64,
    total: i64,
}

impl RollOutcome {
    /// Build an outcome from already-rolled dice
    pub fn from_rolls(
        expression: DiceExpression,
        individual_rolls: Vec<u32>,
        modifier: i64,
    ) -> Self {
        let dice_total: i64 = individual_rolls.iter().copied().map(i64::from).sum();
        Self {
            expression,
            individual_rolls,
            dice_total,
            modifier,
            total: dice_total + modifier,
        }
    }

    /// The expression that was rolled
    pub fn expression(&self) -> &DiceExpression {
        &self.expression
    }

    /// Individual die results, in roll order
    pub fn individual_rolls(&self) -> &[u32] {
        &self.individual_rolls
    }

    /// Sum of dice before modifier
    pub fn dice_total(&self) -> i64 {
        self.dice_total
    }

    /// Modifier that was applied (embedded plus external)
    pub fn modifier(&self) -> i64 {
        self.modifier
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Format as a breakdown string (e.g., "1d20(14) + 5 = 19" or "2d6[4, 5] - 1 = 8")
    pub fn breakdown(&self) -> String {
        let dice = format!("{}d{}", self.expression.count(), self.expression.sides());
        let rolls = if self.individual_rolls.len() == 1 {
            format!("({})", self.individual_rolls[0])
        } else {
            let rolls_str: Vec<String> = self
                .individual_rolls
                .iter()
                .map(|r| r.to_string())
                .collect();
            format!("[{}]", rolls_str.join(", "))
        };

        match self.modifier {
            0 => format!("{}{} = {}", dice, rolls, self.total),
            m if m > 0 => format!("{}{} + {} = {}", dice, rolls, m, self.total),
            m => format!("{}{} - {} = {}", dice, rolls, -m, self.total),
        }
    }
}
