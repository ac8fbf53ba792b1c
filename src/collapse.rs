//! Shared run-collapsing scanner.
//!
//! One forward pass drives both the size-bounded break search and the
//! unbounded head finalization. The scanner owns the collapsing protocol
//! (at most one pending accumulator); the [`StepForward`] impl decides what
//! to do with accepted and discarded units and when to stop.

use smallvec::SmallVec;

use crate::unit::{SplitUnit, Supplements};

/// Sink for the collapse scanner.
///
/// `index` arguments are positions within the scanned slice. The pending
/// accumulator handed to [`overflows`](Self::overflows) has been neither
/// accepted nor discarded yet.
pub(crate) trait StepForward<'a, T> {
    fn add_unit(&mut self, index: usize, unit: &'a T);

    fn add_discarded(&mut self, unit: &'a T);

    fn overflows(&self, pending: Option<(usize, &'a T)>) -> bool;
}

/// Scan `units` left to right, merging mutually collapsible runs.
///
/// Within a compatible run the larger unit survives; on equal size the later
/// one is kept. Returns the index of the last unit fully accepted before the
/// one that triggered overflow, `None` if the very first unit already
/// overflows. When the sink never overflows, the whole slice is consumed and
/// the last index is returned (`None` for an empty slice).
pub(crate) fn scan<'a, T, S>(units: &'a [T], step: &mut S) -> Option<usize>
where
    T: SplitUnit,
    S: StepForward<'a, T>,
{
    let mut pending: Option<(usize, &'a T)> = None;
    for (index, unit) in units.iter().enumerate() {
        if unit.is_collapsible() {
            match pending {
                Some((_, held)) if held.collapses_with(unit) => {
                    if unit.size() >= held.size() {
                        step.add_discarded(held);
                        pending = Some((index, unit));
                    } else {
                        step.add_discarded(unit);
                    }
                }
                Some((held_index, held)) => {
                    step.add_unit(held_index, held);
                    pending = Some((index, unit));
                }
                None => pending = Some((index, unit)),
            }
        } else {
            if let Some((held_index, held)) = pending.take() {
                step.add_unit(held_index, held);
            }
            step.add_unit(index, unit);
        }
        if step.overflows(pending) {
            return index.checked_sub(1);
        }
    }
    if let Some((held_index, held)) = pending.take() {
        step.add_unit(held_index, held);
    }
    units.len().checked_sub(1)
}

/// Size-bounded mode: accumulate sizes until the capacity is exceeded.
///
/// Supplement sizes are charged once per distinct id seen during the scan;
/// the final unit of the backing sequence is charged at its
/// [`last_size`](SplitUnit::last_size). The scanned slice is always a suffix
/// of the backing, so `last_index` is simply the slice's last position.
pub(crate) struct SizeStep<'a, T> {
    capacity: f64,
    total: f64,
    seen_ids: SmallVec<[&'a str; 8]>,
    supplements: &'a dyn Supplements<T>,
    last_index: usize,
}

impl<'a, T: SplitUnit> SizeStep<'a, T> {
    pub(crate) fn new(
        capacity: f64,
        supplements: &'a dyn Supplements<T>,
        last_index: usize,
    ) -> Self {
        Self {
            capacity,
            total: 0.0,
            seen_ids: SmallVec::new(),
            supplements,
            last_index,
        }
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    fn unit_size(&self, index: usize, unit: &T) -> f64 {
        if index == self.last_index {
            unit.last_size()
        } else {
            unit.size()
        }
    }
}

impl<'a, T: SplitUnit> StepForward<'a, T> for SizeStep<'a, T> {
    fn add_unit(&mut self, index: usize, unit: &'a T) {
        for id in unit.supplement_ids() {
            if !self.seen_ids.iter().any(|seen| *seen == id) {
                self.seen_ids.push(id.as_str());
                if let Some(item) = self.supplements.get(id) {
                    self.total += item.size();
                }
            }
        }
        self.total += self.unit_size(index, unit);
    }

    fn add_discarded(&mut self, _unit: &'a T) {}

    fn overflows(&self, pending: Option<(usize, &'a T)>) -> bool {
        // The pending accumulator is charged at its own size only; its
        // supplements are charged when (and if) it is actually accepted, so a
        // later, larger replacement cannot leave phantom supplement costs in
        // the total.
        let pending_size = pending.map_or(0.0, |(index, unit)| self.unit_size(index, unit));
        self.total + pending_size > self.capacity
    }
}

/// Unbounded mode: finalize a chosen head.
///
/// Consumes everything, collecting the collapsed head, the collapse losers,
/// and the supplement units referenced by the surviving head in
/// first-reference order.
pub(crate) struct TrimStep<'a, T> {
    result: Vec<T>,
    discarded: Vec<T>,
    supplements: Vec<T>,
    seen_ids: SmallVec<[&'a str; 8]>,
    map: &'a dyn Supplements<T>,
}

impl<'a, T> TrimStep<'a, T> {
    pub(crate) fn new(map: &'a dyn Supplements<T>) -> Self {
        Self {
            result: Vec::new(),
            discarded: Vec::new(),
            supplements: Vec::new(),
            seen_ids: SmallVec::new(),
            map,
        }
    }

    /// Collapsed head, charged supplements, and discarded units, in that order.
    pub(crate) fn into_parts(self) -> (Vec<T>, Vec<T>, Vec<T>) {
        (self.result, self.supplements, self.discarded)
    }
}

impl<'a, T: SplitUnit + Clone> StepForward<'a, T> for TrimStep<'a, T> {
    fn add_unit(&mut self, _index: usize, unit: &'a T) {
        for id in unit.supplement_ids() {
            if !self.seen_ids.iter().any(|seen| *seen == id) {
                self.seen_ids.push(id.as_str());
                if let Some(item) = self.map.get(id) {
                    self.supplements.push(item.clone());
                }
            }
        }
        self.result.push(unit.clone());
    }

    fn add_discarded(&mut self, unit: &'a T) {
        self.discarded.push(unit.clone());
    }

    fn overflows(&self, _pending: Option<(usize, &'a T)>) -> bool {
        false
    }
}
