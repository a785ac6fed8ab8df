//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::DiceConfig,
    ports::RandomPort,
    random::{SeededRandom, SystemRandom},
};
use crate::use_cases::DiceEngine;

/// Main application state.
///
/// Holds the configuration and the dice engine built from it.
pub struct App {
    pub config: DiceConfig,
    pub dice: Arc<DiceEngine>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// A configured seed selects `SeededRandom`; otherwise rolls use `SystemRandom`.
    pub fn new(config: DiceConfig) -> Self {
        let random_port: Arc<dyn RandomPort> = match config.seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random source");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(SystemRandom::new()),
        };
        Self::with_random(config, random_port)
    }

    /// Create an App around an explicit random source.
    pub fn with_random(config: DiceConfig, random: Arc<dyn RandomPort>) -> Self {
        let dice = Arc::new(DiceEngine::new(random, config.clone()));
        Self { config, dice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talemaster_domain::DiceExpression;

    #[test]
    fn seeded_apps_roll_identically() {
        let config = DiceConfig {
            seed: Some(31337),
            ..DiceConfig::default()
        };
        let a = App::new(config.clone());
        let b = App::new(config);
        let expr = DiceExpression::new(4, 6, 0).unwrap();
        assert_eq!(a.dice.evaluate(&expr, 0), b.dice.evaluate(&expr, 0));
    }

    #[test]
    fn engine_shares_app_config() {
        let app = App::new(DiceConfig::default());
        assert_eq!(app.dice.config(), &app.config);
    }
}
