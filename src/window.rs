use std::fmt;
use std::sync::Arc;

use crate::unit::{EmptySupplements, Supplements};

/// Immutable, offset-based view over a shared backing sequence of units.
///
/// A window is always a suffix of its backing storage: narrowing with
/// [`tail`](Self::tail) advances the offset and copies nothing, so repeated
/// head/tail splitting stays O(1) per step. The supplement table rides along
/// with every derived window.
///
/// Independent windows over the same backing may be used from separate
/// threads as long as the backing units and supplements stay read-only.
pub struct SplitWindow<T> {
    units: Arc<[T]>,
    supplements: Arc<dyn Supplements<T>>,
    offset: usize,
}

impl<T> Clone for SplitWindow<T> {
    fn clone(&self) -> Self {
        Self {
            units: Arc::clone(&self.units),
            supplements: Arc::clone(&self.supplements),
            offset: self.offset,
        }
    }
}

impl<T> fmt::Debug for SplitWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitWindow")
            .field("backing_len", &self.units.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T> SplitWindow<T> {
    /// Create a window over `units` with the given supplement table.
    pub fn new(units: impl Into<Arc<[T]>>, supplements: Arc<dyn Supplements<T>>) -> Self {
        Self {
            units: units.into(),
            supplements,
            offset: 0,
        }
    }

    /// Create a window over `units` with no supplements.
    pub fn from_units(units: impl Into<Arc<[T]>>) -> Self {
        Self::new(units, Arc::new(EmptySupplements))
    }

    /// Create a window with no units and no supplements.
    pub fn empty() -> Self {
        Self::from_units(Vec::new())
    }

    /// Whether no units remain in view.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.units.len()
    }

    /// Number of units remaining in view.
    pub fn len(&self) -> usize {
        self.units.len() - self.offset
    }

    /// Whether a unit exists at window-relative index `index`.
    pub fn has_element_at(&self, index: usize) -> bool {
        self.offset + index < self.units.len()
    }

    /// Unit at window-relative index `index`, if present.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.units.get(self.offset + index)
    }

    /// The units remaining in view, as a slice of the backing storage.
    pub fn remaining(&self) -> &[T] {
        &self.units[self.offset..]
    }

    /// The supplement table attached to this window.
    pub fn supplements(&self) -> &dyn Supplements<T> {
        &*self.supplements
    }

    /// Window advanced past the first `n` remaining units.
    ///
    /// Shares backing and supplements with `self`; O(1), no copy. Advancing
    /// past the end yields an empty window.
    pub fn tail(&self, n: usize) -> Self {
        Self {
            units: Arc::clone(&self.units),
            supplements: Arc::clone(&self.supplements),
            offset: (self.offset + n).min(self.units.len()),
        }
    }

    /// Split the view into the first `n` units and the window past them.
    ///
    /// `n` is clamped to the remaining length. The head is cloned out of the
    /// backing; the tail window shares storage as with [`tail`](Self::tail).
    pub fn split(&self, n: usize) -> (Vec<T>, Self)
    where
        T: Clone,
    {
        let n = n.min(self.len());
        (self.remaining()[..n].to_vec(), self.tail(n))
    }
}
