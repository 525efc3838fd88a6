// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Date heat highlighting.
//!
//! Scans a document for `yyyy-MM-dd` dates, measures how far each one is from
//! today, buckets the distance into a small set of categories and paints every
//! category with its own color. The crate provides:
//! - Date extraction and calendar validation ([`dates`])
//! - Distance bucketing, color mapping and the style cache ([`highlight`])
//! - A debounced update scheduler ([`scheduler`])
//! - Activation / deactivation against an editor host ([`extension`], [`host`])
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use date_heat::{Classifier, HighlightConfig};
//!
//! let classifier = Classifier::new(&HighlightConfig::default());
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let groups = classifier.range_group("due 2024-06-20 shipped 2024-06-01", today);
//!
//! assert_eq!(groups.total_ranges(), 2);
//! ```

pub mod buffer;
pub mod config;
pub mod dates;
pub mod error;
pub mod extension;
pub mod highlight;
pub mod host;
pub mod scheduler;

// Re-export commonly used items
pub use buffer::{DocumentId, HostEvent, Position, TextRange, Topic};
pub use config::HighlightConfig;
pub use dates::{BoundaryPolicy, DateExtractor, DistanceMode, ValidatedDate};
pub use error::{Error, Result};
pub use extension::DateHighlighter;
pub use highlight::{
    BucketPolicy, Category, Classifier, ColorMapper, ColorScheme, DecorationStyle,
    HighlightEngine, RangeGroup, Rgb,
};
pub use host::EditorHost;
pub use scheduler::{SchedulerState, UpdateScheduler};
