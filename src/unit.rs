use std::collections::HashMap;

/// Capability surface for one atomic, pre-measured content unit.
///
/// Units arrive already measured: `size` is the cost charged when the unit is
/// followed by more content, `last_size` when it closes the whole sequence
/// (no trailing margin needed, for example). The flag accessors drive the
/// break search; none of them may depend on mutable state.
pub trait SplitUnit {
    /// Cost of this unit when it is not the final unit of the sequence.
    fn size(&self) -> f64;

    /// Cost of this unit when it is the absolute last unit of the sequence.
    ///
    /// Defaults to [`size`](Self::size).
    fn last_size(&self) -> f64 {
        self.size()
    }

    /// Whether a segment boundary may legally be placed after this unit.
    fn is_breakable(&self) -> bool;

    /// Whether this unit can be dropped without loss at a trimmed boundary.
    fn is_skippable(&self) -> bool;

    /// Whether this unit may merge with an adjacent compatible unit.
    fn is_collapsible(&self) -> bool;

    /// Symmetric compatibility test for collapsing.
    ///
    /// Consulted only when both sides report
    /// [`is_collapsible`](Self::is_collapsible); the larger of two compatible
    /// units survives.
    fn collapses_with(&self, _other: &Self) -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Ids of externally supplied supplements referenced by this unit.
    ///
    /// A supplement's size is charged at most once per result, no matter how
    /// many units reference it.
    fn supplement_ids(&self) -> &[String] {
        &[]
    }
}

/// Read-only id lookup for externally referenced supplement units.
///
/// Unknown ids resolve to `None` and contribute zero size. The engine never
/// mutates a supplement table; shared tables behind `Arc` are safe to reuse
/// across windows and threads.
pub trait Supplements<T>: Send + Sync {
    /// Look up the supplement unit registered under `id`.
    fn get(&self, id: &str) -> Option<&T>;
}

/// Supplement table with no entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySupplements;

impl<T> Supplements<T> for EmptySupplements {
    fn get(&self, _id: &str) -> Option<&T> {
        None
    }
}

/// Hash-map backed supplement table.
#[derive(Clone, Debug, Default)]
pub struct MapSupplements<T> {
    entries: HashMap<String, T>,
}

impl<T> MapSupplements<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `unit` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, unit: T) -> Option<T> {
        self.entries.insert(id.into(), unit)
    }

    /// Number of registered supplements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for MapSupplements<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Send + Sync> Supplements<T> for MapSupplements<T> {
    fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }
}
