// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Date classification and styling.
//!
//! This module turns extracted dates into categories, derives a color for every
//! category, caches one host style per category and applies the ranges.

pub mod bucket;
pub mod color_mapper;
pub mod engine;
pub mod performance;
pub mod registry;

pub use bucket::{BucketPolicy, Category, DEFAULT_LINEAR_CAP, FIBONACCI_THRESHOLDS};
pub use color_mapper::{ColorMapper, ColorScheme, DecorationStyle, Rgb};
pub use engine::{Classification, Classifier, HighlightEngine, RangeGroup};
pub use performance::PipelineMetrics;
pub use registry::StyleRegistry;
