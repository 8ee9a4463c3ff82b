//! Analytics over the normalized message sequence.
//!
//! Two stages, strictly ordered:
//! - [`aggregate`] folds the messages once, in export order, into running
//!   per-sender and global counters;
//! - [`report`] derives rankings, averages and day-level statistics from the
//!   finished aggregates and assembles the immutable [`ChatReport`].

pub mod aggregate;
pub mod report;

pub use aggregate::{Aggregates, SenderStats};
pub use report::{ChatReport, SenderReport};
