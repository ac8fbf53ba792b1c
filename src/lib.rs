//! Break-point search and materialization over sized content units.
//!
//! `splitpoint` decides where to cut a linear sequence of pre-measured,
//! flagged units (formatted lines, rows, braille cells) so that a head fits
//! within a given capacity. Per-unit rules (breakability, skippability,
//! collapsibility, shared supplement charging) are honored during the
//! search, with an optional forced ("hard") break fallback when no legal
//! break point exists.
//!
//! The crate does not measure anything: sizes arrive as plain numbers in the
//! caller's own unit system. It produces exactly one head/tail cut per call;
//! callers assemble pages or segments by repeating
//! [`SplitEngine::find`]/[`SplitEngine::split`] on each result's tail until
//! it is empty.
//!
//! ```
//! use splitpoint::{SplitEngine, SplitUnit, SplitWindow};
//!
//! #[derive(Clone)]
//! struct Line {
//!     width: f64,
//! }
//!
//! impl SplitUnit for Line {
//!     fn size(&self) -> f64 {
//!         self.width
//!     }
//!     fn is_breakable(&self) -> bool {
//!         true
//!     }
//!     fn is_skippable(&self) -> bool {
//!         false
//!     }
//!     fn is_collapsible(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let engine = SplitEngine::new();
//! let window = SplitWindow::from_units(vec![
//!     Line { width: 4.0 },
//!     Line { width: 4.0 },
//!     Line { width: 4.0 },
//! ]);
//! let result = engine.split_at(9.0, &window);
//! assert_eq!(result.head.len(), 2);
//! assert_eq!(result.tail.len(), 1);
//! assert!(!result.hard);
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod collapse;
mod cost;
mod engine;
mod error;
mod point;
mod unit;
mod window;

pub use cost::{DefaultCost, SplitCost};
pub use engine::{
    find_leading, skip_leading, trim_leading, trim_leading_slice, SplitEngine, SplitOption,
    StandardSplitOption,
};
pub use error::SplitError;
pub use point::{SplitPoint, SplitSpecification};
pub use unit::{EmptySupplements, MapSupplements, SplitUnit, Supplements};
pub use window::SplitWindow;
