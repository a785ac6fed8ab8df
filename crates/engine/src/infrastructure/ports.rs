//! Port traits for infrastructure boundaries.
//!
//! The random source is the only port: the dice engine is otherwise pure.

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of uniformly distributed dice values.
///
/// Implementations must be shareable across threads; see `SeededRandom` for
/// a mutex-guarded generator.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform value in the inclusive range `[min, max]`.
    fn gen_range(&self, min: u32, max: u32) -> u32;
}
