use std::fmt;
use std::sync::Arc;

use crate::collapse::{self, SizeStep, TrimStep};
use crate::cost::{DefaultCost, SplitCost};
use crate::error::SplitError;
use crate::point::{SplitPoint, SplitSpecification};
use crate::unit::SplitUnit;
use crate::window::SplitWindow;

/// Marker for engine options.
///
/// The engine recognizes only [`StandardSplitOption`]s; any option that does
/// not map to one is rejected when the engine is configured. The trait is
/// open so callers can thread their own option values through shared plumbing
/// and still get a loud failure if one reaches this engine.
pub trait SplitOption: fmt::Debug {
    /// The standard interpretation of this option, if it has one.
    fn as_standard(&self) -> Option<StandardSplitOption>;
}

/// Options understood by [`SplitEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StandardSplitOption {
    /// Allow a forced break through a non-breakable unit when no legal
    /// break point exists before the limit.
    AllowForce,
    /// Keep trailing skippable units in the head instead of trimming them.
    RetainTrailing,
}

impl SplitOption for StandardSplitOption {
    fn as_standard(&self) -> Option<StandardSplitOption> {
        Some(*self)
    }
}

/// Break-point search and materialization engine.
///
/// Holds the split options and an optional cost-function override; the
/// algorithms themselves are stateless, so one engine can serve any number
/// of windows, including concurrently.
///
/// The usual loop: [`find`](Self::find) a [`SplitSpecification`] for the
/// current window and capacity, [`split`](Self::split) to materialize it,
/// then continue with the result's tail until it is empty.
/// [`split_at`](Self::split_at) does one find+split round in a single call.
pub struct SplitEngine<T> {
    use_force: bool,
    trim_trailing: bool,
    cost: Option<Arc<dyn SplitCost<T>>>,
}

impl<T> Clone for SplitEngine<T> {
    fn clone(&self) -> Self {
        Self {
            use_force: self.use_force,
            trim_trailing: self.trim_trailing,
            cost: self.cost.clone(),
        }
    }
}

impl<T> fmt::Debug for SplitEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitEngine")
            .field("use_force", &self.use_force)
            .field("trim_trailing", &self.trim_trailing)
            .field("has_cost_override", &self.cost.is_some())
            .finish()
    }
}

impl<T> Default for SplitEngine<T>
where
    T: SplitUnit + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SplitEngine<T>
where
    T: SplitUnit + Clone,
{
    /// Engine with default behavior: no forced breaks, trailing skippable
    /// units trimmed, default cost function.
    pub fn new() -> Self {
        Self {
            use_force: false,
            trim_trailing: true,
            cost: None,
        }
    }

    /// Engine configured from a list of options.
    ///
    /// Fails with [`SplitError::UnrecognizedOption`] for any option without
    /// a standard interpretation; unknown options never silently degrade to
    /// a default.
    pub fn with_options(options: &[&dyn SplitOption]) -> Result<Self, SplitError> {
        let mut engine = Self::new();
        for option in options {
            match option.as_standard() {
                Some(StandardSplitOption::AllowForce) => engine.use_force = true,
                Some(StandardSplitOption::RetainTrailing) => engine.trim_trailing = false,
                None => {
                    return Err(SplitError::UnrecognizedOption(format!("{option:?}")));
                }
            }
        }
        Ok(engine)
    }

    /// Enable or disable the forced-break fallback.
    pub fn allow_force(mut self, allow: bool) -> Self {
        self.use_force = allow;
        self
    }

    /// Keep trailing skippable units in the head instead of trimming them.
    pub fn retain_trailing(mut self, retain: bool) -> Self {
        self.trim_trailing = !retain;
        self
    }

    /// Override the cost function used to place forced breaks.
    pub fn with_cost(mut self, cost: Arc<dyn SplitCost<T>>) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Find where to cut `window` so the head fits within `capacity`.
    ///
    /// Pure and O(n) in the window length: one size-bounded collapse scan
    /// plus one cost scan bounded by the same prefix.
    pub fn find(&self, capacity: f64, window: &SplitWindow<T>) -> SplitSpecification {
        if window.is_empty() {
            return SplitSpecification::Empty;
        }
        if capacity <= 0.0 {
            return SplitSpecification::None;
        }
        if fits(capacity, window) {
            return SplitSpecification::All;
        }
        let units = window.remaining();
        let mut step = SizeStep::new(capacity, window.supplements(), units.len() - 1);
        match collapse::scan(units, &mut step) {
            // Even the first unit alone exceeds the capacity. With force, the
            // minimal non-empty head is the only possible progress; the break
            // counts as hard when that unit is not itself breakable.
            None if self.use_force => {
                let hard = !units[0].is_breakable();
                log::debug!(
                    "first unit exceeds capacity {capacity}; forcing a break after it (hard: {hard})"
                );
                SplitSpecification::At {
                    index: 1,
                    hard,
                    trim_trailing: self.trim_trailing,
                }
            }
            None => SplitSpecification::None,
            Some(start_pos) => self.find_breakpoint(window, start_pos),
        }
    }

    /// Materialize a specification produced by [`find`](Self::find) against
    /// the same window.
    pub fn split(&self, spec: SplitSpecification, window: &SplitWindow<T>) -> SplitPoint<T> {
        match spec {
            SplitSpecification::Empty => SplitPoint {
                head: Vec::new(),
                supplements: Vec::new(),
                tail: window.clone(),
                discarded: Vec::new(),
                hard: false,
            },
            SplitSpecification::None => finalize(Vec::new(), Vec::new(), window.clone(), false),
            SplitSpecification::All => finalize(
                window.remaining().to_vec(),
                Vec::new(),
                window.tail(window.len()),
                false,
            ),
            SplitSpecification::At {
                index,
                hard,
                trim_trailing,
            } => {
                let (head, tail) = split_range(window, index);
                let (head, trailing) = if trim_trailing {
                    trim_trailing_units(head)
                } else {
                    (head, Vec::new())
                };
                finalize(head, trailing, tail, hard)
            }
        }
    }

    /// Find and materialize in one call.
    pub fn split_at(&self, capacity: f64, window: &SplitWindow<T>) -> SplitPoint<T> {
        let spec = self.find(capacity, window);
        self.split(spec, window)
    }

    fn find_breakpoint(&self, window: &SplitWindow<T>, start_pos: usize) -> SplitSpecification {
        let adjusted = forward_skippable(window, start_pos);
        if !window.has_element_at(adjusted + 1) {
            // The adjusted position is the window's last unit.
            return SplitSpecification::All;
        }

        let cost = self.cost.as_deref().unwrap_or(&DefaultCost);
        let units = window.remaining();
        let mut best_any = adjusted;
        let mut best_any_cost = f64::MAX;
        let mut best_breakable: Option<usize> = None;
        let mut best_breakable_cost = f64::MAX;
        for index in 0..=adjusted {
            let c = cost.cost(window, index, adjusted);
            if c < best_any_cost {
                best_any = index;
                best_any_cost = c;
            }
            if c < best_breakable_cost && units[index].is_breakable() {
                best_breakable = Some(index);
                best_breakable_cost = c;
            }
        }

        match best_breakable {
            Some(index) => SplitSpecification::At {
                index: index + 1,
                hard: false,
                trim_trailing: self.trim_trailing,
            },
            None if self.use_force => {
                log::debug!(
                    "no breakable unit at or before {adjusted}; forcing a hard break after {best_any}"
                );
                SplitSpecification::At {
                    index: best_any + 1,
                    hard: true,
                    trim_trailing: self.trim_trailing,
                }
            }
            // Without force this degenerates to an empty head; trimming
            // options still apply uniformly during materialization.
            None => SplitSpecification::At {
                index: 0,
                hard: false,
                trim_trailing: self.trim_trailing,
            },
        }
    }
}

/// Whether the whole window's collapsed, supplement-deduped size fits
/// within `capacity`.
fn fits<T: SplitUnit>(capacity: f64, window: &SplitWindow<T>) -> bool {
    let units = window.remaining();
    if units.is_empty() {
        return true;
    }
    let mut step = SizeStep::new(capacity, window.supplements(), units.len() - 1);
    match collapse::scan(units, &mut step) {
        Some(consumed) if consumed + 1 == units.len() => step.total() <= capacity,
        _ => false,
    }
}

/// Walk forward from a non-breakable unit through skippable ones, looking
/// for a break opportunity. Trailing discardable filler should not force an
/// early hard break.
fn forward_skippable<T: SplitUnit>(window: &SplitWindow<T>, pos: usize) -> usize {
    match window.get(pos) {
        Some(unit) if !unit.is_breakable() => {}
        _ => return pos,
    }
    let mut index = pos + 1;
    while let Some(unit) = window.get(index) {
        if !unit.is_skippable() {
            // A non-skippable blocker: stay where the size scan stopped.
            return pos;
        }
        if unit.is_breakable() {
            return index;
        }
        index += 1;
    }
    // Walked off the end: clamp to the last existing index.
    index - 1
}

/// Split `window` so the tail starts at `tail_start`, tolerating positions
/// at or past the end of the remaining units.
fn split_range<T: SplitUnit + Clone>(
    window: &SplitWindow<T>,
    tail_start: usize,
) -> (Vec<T>, SplitWindow<T>) {
    if tail_start == 0 {
        (Vec::new(), window.clone())
    } else if window.has_element_at(tail_start - 1) {
        window.split(tail_start)
    } else {
        (window.remaining().to_vec(), window.tail(window.len()))
    }
}

/// Move a trailing run of skippable units out of `head`.
fn trim_trailing_units<T: SplitUnit>(mut head: Vec<T>) -> (Vec<T>, Vec<T>) {
    let keep = head
        .iter()
        .rposition(|unit| !unit.is_skippable())
        .map_or(0, |index| index + 1);
    let trailing = head.split_off(keep);
    (head, trailing)
}

/// Run the unbounded collapse pass over `head` and assemble the result.
///
/// The collapse pass' discards come first in `discarded`, followed by any
/// trailing-trim bucket; supplements are restricted to ids referenced by the
/// final head.
fn finalize<T: SplitUnit + Clone>(
    head: Vec<T>,
    trailing: Vec<T>,
    tail: SplitWindow<T>,
    hard: bool,
) -> SplitPoint<T> {
    let (head, supplements, mut discarded) = {
        let mut step = TrimStep::new(tail.supplements());
        collapse::scan(&head, &mut step);
        step.into_parts()
    };
    discarded.extend(trailing);
    SplitPoint {
        head,
        supplements,
        tail,
        discarded,
        hard,
    }
}

/// Split a plain slice into its leading skippable prefix and the remainder.
///
/// Both halves share the input's storage.
pub fn trim_leading_slice<T: SplitUnit>(units: &[T]) -> (&[T], &[T]) {
    let first_kept = units
        .iter()
        .position(|unit| !unit.is_skippable())
        .unwrap_or(units.len());
    units.split_at(first_kept)
}

/// Index of the first non-skippable unit in `window`.
pub fn find_leading<T: SplitUnit>(window: &SplitWindow<T>) -> usize {
    let mut index = 0;
    while let Some(unit) = window.get(index) {
        if !unit.is_skippable() {
            break;
        }
        index += 1;
    }
    index
}

/// Skip the first `index` units of `window`.
///
/// The skipped prefix lands in the result's `discarded`; the remainder
/// becomes the `tail`. Head and supplements are empty.
pub fn skip_leading<T: SplitUnit + Clone>(window: &SplitWindow<T>, index: usize) -> SplitPoint<T> {
    let (discarded, tail) = window.split(index);
    SplitPoint {
        head: Vec::new(),
        supplements: Vec::new(),
        tail,
        discarded,
        hard: false,
    }
}

/// Drop the leading skippable run of `window`.
///
/// Equivalent to [`skip_leading`] at [`find_leading`]'s position.
pub fn trim_leading<T: SplitUnit + Clone>(window: &SplitWindow<T>) -> SplitPoint<T> {
    skip_leading(window, find_leading(window))
}
