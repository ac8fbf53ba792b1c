use crate::unit::SplitUnit;
use crate::window::SplitWindow;

/// Scoring strategy for choosing a forced break position.
///
/// Consulted only when no naturally breakable unit exists before the limit.
/// Lower is better; on equal cost the earliest index wins. Implementations
/// must be side-effect-free so the candidate scan stays deterministic.
pub trait SplitCost<T>: Send + Sync {
    /// Cost of breaking after the unit at `index`, given that `breakpoint`
    /// is the last index that still fits.
    fn cost(&self, window: &SplitWindow<T>, index: usize, breakpoint: usize) -> f64;
}

impl<T, F> SplitCost<T> for F
where
    F: Fn(&SplitWindow<T>, usize, usize) -> f64 + Send + Sync,
{
    fn cost(&self, window: &SplitWindow<T>, index: usize, breakpoint: usize) -> f64 {
        self(window, index, breakpoint)
    }
}

/// Default cost: prefer breakable units, then maximal fill.
///
/// `(breakable ? 1 : 2) * breakpoint - index`: a breakable candidate always
/// scores strictly below a non-breakable one at the same breakpoint, and
/// within a class the candidate closest to the limit wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCost;

impl<T: SplitUnit> SplitCost<T> for DefaultCost {
    fn cost(&self, window: &SplitWindow<T>, index: usize, breakpoint: usize) -> f64 {
        let weight = if window.get(index).is_some_and(|unit| unit.is_breakable()) {
            1.0
        } else {
            2.0
        };
        weight * breakpoint as f64 - index as f64
    }
}
