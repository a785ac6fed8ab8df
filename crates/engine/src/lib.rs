//! Talemaster Engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - Dice rolls, ability checks and ability-score rolling
//! - `infrastructure/` - Random sources (ports + adapters) and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
