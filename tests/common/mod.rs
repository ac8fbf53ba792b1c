//! Shared fixture unit type for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use splitpoint::{MapSupplements, SplitUnit, SplitWindow, Supplements};

/// Configurable content unit for exercising the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct TestUnit {
    pub name: String,
    pub size: f64,
    pub last_size: Option<f64>,
    pub breakable: bool,
    pub skippable: bool,
    pub collapse_group: Option<u32>,
    pub supplement_ids: Vec<String>,
}

impl TestUnit {
    pub fn new(name: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            size,
            last_size: None,
            breakable: true,
            skippable: false,
            collapse_group: None,
            supplement_ids: Vec::new(),
        }
    }

    pub fn breakable(mut self, breakable: bool) -> Self {
        self.breakable = breakable;
        self
    }

    pub fn skippable(mut self, skippable: bool) -> Self {
        self.skippable = skippable;
        self
    }

    pub fn last_size(mut self, last_size: f64) -> Self {
        self.last_size = Some(last_size);
        self
    }

    pub fn collapse_group(mut self, group: u32) -> Self {
        self.collapse_group = Some(group);
        self
    }

    pub fn supplement(mut self, id: &str) -> Self {
        self.supplement_ids.push(id.to_string());
        self
    }
}

impl SplitUnit for TestUnit {
    fn size(&self) -> f64 {
        self.size
    }

    fn last_size(&self) -> f64 {
        self.last_size.unwrap_or(self.size)
    }

    fn is_breakable(&self) -> bool {
        self.breakable
    }

    fn is_skippable(&self) -> bool {
        self.skippable
    }

    fn is_collapsible(&self) -> bool {
        self.collapse_group.is_some()
    }

    fn collapses_with(&self, other: &Self) -> bool {
        match (self.collapse_group, other.collapse_group) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn supplement_ids(&self) -> &[String] {
        &self.supplement_ids
    }
}

/// Window over `units` with no supplements.
pub fn window(units: Vec<TestUnit>) -> SplitWindow<TestUnit> {
    SplitWindow::from_units(units)
}

/// Window over `units` with the given supplement entries.
pub fn window_with_supplements(
    units: Vec<TestUnit>,
    supplements: Vec<(&str, TestUnit)>,
) -> SplitWindow<TestUnit> {
    let table: MapSupplements<TestUnit> = supplements
        .into_iter()
        .map(|(id, unit)| (id.to_string(), unit))
        .collect();
    let table: Arc<dyn Supplements<TestUnit>> = Arc::new(table);
    SplitWindow::new(units, table)
}

/// Names of the units in `units`, for compact assertions.
pub fn names(units: &[TestUnit]) -> Vec<&str> {
    units.iter().map(|unit| unit.name.as_str()).collect()
}
