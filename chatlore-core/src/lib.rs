//! # chatlore-core
//!
//! Core library for chatlore - descriptive statistics over an exported
//! conversation log.
//!
//! This library provides:
//! - Ingestion of Telegram-style JSON exports with resilient normalization
//! - A single-pass streaming aggregator over the message sequence
//! - Derived metrics (rankings, averages, day-level statistics)
//! - Configuration and logging infrastructure
//!
//! ## Pipeline
//!
//! Normalizer → Aggregator (one forward pass) → Derived metrics →
//! [`ChatReport`]. No stage re-reads the raw export after aggregation; the
//! only lookback is the previous valid message, which is O(1) state, so the
//! whole run is a synchronous fold bounded by input size.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatlore_core::analyze_file;
//! use std::path::Path;
//!
//! let report = analyze_file(Path::new("result.json")).expect("failed to analyze export");
//! println!("{} valid messages over {} days", report.valid_messages, report.total_days);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{Aggregates, ChatReport, SenderReport};
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{normalize, Message, RawExport, RawRecord};

// Public modules
pub mod analytics;
pub mod config;
pub mod emoji;
pub mod error;
pub mod ingest;
pub mod logging;

use std::path::Path;

/// Run the whole pipeline over one export file.
///
/// Fatal only when the file is unreadable or not valid JSON; malformed
/// records inside a valid file are skipped, and an export with no valid
/// message yields an all-zero report.
pub fn analyze_file(path: &Path) -> Result<ChatReport> {
    let export = ingest::load_export(path)?;
    tracing::info!(
        path = %path.display(),
        records = export.messages.len(),
        "Loaded export"
    );
    let messages = ingest::normalize_export(&export);
    let aggregates = Aggregates::collect(&messages);
    Ok(ChatReport::from_aggregates(&aggregates))
}
