//! Dice engine configuration.
//!
//! Defaults can be overridden by environment variables (a `.env` file is
//! loaded by the binary before this runs):
//! - `TALEMASTER_MAX_DICE`: dice count ceiling (default 100)
//! - `TALEMASTER_MAX_SIDES`: die size ceiling (default 1000)
//! - `TALEMASTER_MODIFIER_POLICY`: `additive` or `suppress-when-embedded`
//! - `TALEMASTER_FALLBACK_DICE`: expression used when a caller asks for a fallback (default `1d20`,
//!   must fit the limits)
//! - `TALEMASTER_SEED`: optional u64 seed for reproducible rolls
//!
//! Invalid values are logged and ignored.

use std::str::FromStr;

use talemaster_domain::{DiceExpression, DiceLimits, ModifierPolicy};

pub const ENV_MAX_DICE: &str = "TALEMASTER_MAX_DICE";
pub const ENV_MAX_SIDES: &str = "TALEMASTER_MAX_SIDES";
pub const ENV_MODIFIER_POLICY: &str = "TALEMASTER_MODIFIER_POLICY";
pub const ENV_FALLBACK_DICE: &str = "TALEMASTER_FALLBACK_DICE";
pub const ENV_SEED: &str = "TALEMASTER_SEED";

/// Runtime configuration for the dice engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceConfig {
    pub limits: DiceLimits,
    pub modifier_policy: ModifierPolicy,
    pub fallback_expression: DiceExpression,
    pub seed: Option<u64>,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            limits: DiceLimits::default(),
            modifier_policy: ModifierPolicy::default(),
            fallback_expression: DiceExpression::D20,
            seed: None,
        }
    }
}

impl DiceConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(max) = parse_var::<u32, _>(&lookup, ENV_MAX_DICE) {
            if max >= 1 {
                config.limits.max_count = max;
                tracing::info!(max, "Applied {} environment variable", ENV_MAX_DICE);
            } else {
                tracing::warn!(max, "{} must be at least 1, ignoring", ENV_MAX_DICE);
            }
        }

        if let Some(max) = parse_var::<u32, _>(&lookup, ENV_MAX_SIDES) {
            if max >= 1 {
                config.limits.max_sides = max;
                tracing::info!(max, "Applied {} environment variable", ENV_MAX_SIDES);
            } else {
                tracing::warn!(max, "{} must be at least 1, ignoring", ENV_MAX_SIDES);
            }
        }

        if let Some(policy) = parse_var::<ModifierPolicy, _>(&lookup, ENV_MODIFIER_POLICY) {
            config.modifier_policy = policy;
            tracing::info!(%policy, "Applied {} environment variable", ENV_MODIFIER_POLICY);
        }

        if let Some(expr) = parse_var::<DiceExpression, _>(&lookup, ENV_FALLBACK_DICE) {
            match config.limits.check(&expr) {
                Ok(()) => {
                    config.fallback_expression = expr;
                    tracing::info!(%expr, "Applied {} environment variable", ENV_FALLBACK_DICE);
                }
                Err(e) => {
                    tracing::warn!(
                        %expr,
                        error = %e,
                        "{} exceeds the dice limits, ignoring",
                        ENV_FALLBACK_DICE
                    );
                }
            }
        }

        // The default 1d20 itself can exceed a small side limit
        if config.limits.check(&config.fallback_expression).is_err() {
            if let Ok(largest) = DiceExpression::new(1, config.limits.max_sides, 0) {
                tracing::warn!(
                    fallback = %config.fallback_expression,
                    replacement = %largest,
                    "Fallback dice exceed the dice limits"
                );
                config.fallback_expression = largest;
            }
        }

        if let Some(seed) = parse_var::<u64, _>(&lookup, ENV_SEED) {
            config.seed = Some(seed);
            tracing::info!(seed, "Applied {} environment variable", ENV_SEED);
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(key)?;
    match val.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(val = %val, error = %e, "{} is not valid, ignoring", key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = DiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DiceConfig::default());
        assert_eq!(config.limits.max_count, 100);
        assert_eq!(config.limits.max_sides, 1000);
        assert_eq!(config.modifier_policy, ModifierPolicy::Additive);
        assert_eq!(config.fallback_expression.to_string(), "1d20");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn applies_valid_overrides() {
        let config = DiceConfig::from_lookup(lookup(&[
            (ENV_MAX_DICE, "20"),
            (ENV_MAX_SIDES, "100"),
            (ENV_MODIFIER_POLICY, "suppress-when-embedded"),
            (ENV_FALLBACK_DICE, "2d6"),
            (ENV_SEED, "1234"),
        ]));
        assert_eq!(config.limits, DiceLimits::new(20, 100));
        assert_eq!(config.modifier_policy, ModifierPolicy::SuppressWhenEmbedded);
        assert_eq!(config.fallback_expression, DiceExpression::new(2, 6, 0).unwrap());
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn ignores_invalid_overrides() {
        let config = DiceConfig::from_lookup(lookup(&[
            (ENV_MAX_DICE, "lots"),
            (ENV_MAX_SIDES, "0"),
            (ENV_MODIFIER_POLICY, "sometimes"),
            (ENV_FALLBACK_DICE, "d20"),
            (ENV_SEED, "-1"),
        ]));
        assert_eq!(config, DiceConfig::default());
    }

    #[test]
    fn rejects_fallback_beyond_configured_limits() {
        let config = DiceConfig::from_lookup(lookup(&[
            (ENV_MAX_DICE, "10"),
            (ENV_FALLBACK_DICE, "5000d6"),
        ]));
        assert_eq!(config.limits.max_count, 10);
        assert_eq!(config.fallback_expression, DiceExpression::D20);
        assert!(config.limits.check(&config.fallback_expression).is_ok());
    }

    #[test]
    fn shrinks_default_fallback_to_small_side_limit() {
        let config = DiceConfig::from_lookup(lookup(&[(ENV_MAX_SIDES, "12")]));
        assert_eq!(
            config.fallback_expression,
            DiceExpression::new(1, 12, 0).unwrap()
        );
        assert!(config.limits.check(&config.fallback_expression).is_ok());
    }
}
