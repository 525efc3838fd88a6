// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Classification of dates and application of their styles.
//!
//! [`Classifier`] is the pure part: text and a reference day in, a
//! [`RangeGroup`] out. [`HighlightEngine`] wraps it with the style cache and
//! pushes the result to an [`EditorHost`].

use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Instant;

use chrono::NaiveDate;

use crate::buffer::TextRange;
use crate::config::HighlightConfig;
use crate::dates::{DateExtractor, DistanceMode, ValidatedDate, local_today};
use crate::error::Result;
use crate::highlight::bucket::{BucketPolicy, Category};
use crate::highlight::color_mapper::{ColorMapper, DecorationStyle};
use crate::highlight::performance::PipelineMetrics;
use crate::highlight::registry::StyleRegistry;
use crate::host::EditorHost;

/// A date together with its distance and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The date and its byte span
    pub date: ValidatedDate,
    /// Signed days from the reference date; negative for past dates
    pub distance: i64,
    /// Bucket the distance falls into
    pub category: Category,
}

/// Byte ranges to style, grouped by category.
///
/// Rebuilt from scratch on every run; ranges within a group are in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeGroup {
    groups: BTreeMap<Category, Vec<Range<usize>>>,
}

impl RangeGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a range to a category.
    pub fn push(&mut self, category: Category, range: Range<usize>) {
        self.groups.entry(category).or_default().push(range);
    }

    /// Returns the ranges of a category.
    pub fn get(&self, category: Category) -> Option<&[Range<usize>]> {
        self.groups.get(&category).map(Vec::as_slice)
    }

    /// Iterates over categories and their ranges, nearest category first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Range<usize>])> {
        self.groups.iter().map(|(category, ranges)| (*category, ranges.as_slice()))
    }

    /// Returns the categories present.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.groups.keys().copied()
    }

    /// Returns the number of categories present.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no date was found.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the number of ranges over all categories.
    pub fn total_ranges(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Extracts dates and assigns categories. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Classifier {
    extractor: DateExtractor,
    distance: DistanceMode,
    bucketing: BucketPolicy,
}

impl Classifier {
    /// Creates a classifier from the extraction, distance and bucketing policies of `config`.
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            extractor: DateExtractor::new(config.boundary),
            distance: config.distance,
            bucketing: config.bucketing.clone(),
        }
    }

    /// Returns the bucketing policy.
    pub fn bucketing(&self) -> &BucketPolicy {
        &self.bucketing
    }

    /// Classifies every valid date in `text` against `today`, left to right.
    pub fn classify<'t>(&'t self, text: &'t str, today: NaiveDate) -> impl Iterator<Item = Classification> + 't {
        self.extractor.extract(text).map(move |date| {
            let distance = self.distance.distance(today, date.date);
            Classification {
                date,
                distance,
                category: self.bucketing.categorize(distance),
            }
        })
    }

    /// Groups the spans of every valid date in `text` by category.
    pub fn range_group(&self, text: &str, today: NaiveDate) -> RangeGroup {
        let mut group = RangeGroup::new();
        for classification in self.classify(text, today) {
            group.push(classification.category, classification.date.span());
        }
        group
    }
}

/// Classifier plus the per-category style cache.
///
/// The engine is the only owner of the style handles it creates. They stay
/// cached across runs and are handed back to the host by [`HighlightEngine::release_all`].
#[derive(Debug)]
pub struct HighlightEngine<S> {
    classifier: Classifier,
    colors: ColorMapper,
    registry: StyleRegistry<S>,
    reference_date: Option<NaiveDate>,
    clock: fn() -> NaiveDate,
    metrics: PipelineMetrics,
}

impl<S> HighlightEngine<S> {
    /// Creates an engine for `config`. Call [`HighlightConfig::validate`] first.
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            classifier: Classifier::new(config),
            colors: ColorMapper::new(config.colors.clone()),
            registry: StyleRegistry::new(),
            reference_date: config.reference_date,
            clock: local_today,
            metrics: PipelineMetrics::default(),
        }
    }

    /// Replaces the local clock consulted when no reference date is pinned.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the day distances are measured from: the pinned reference date,
    /// or the clock's date at the time of the call.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(self.clock)
    }

    /// Returns the pure classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Returns the style cache.
    pub fn registry(&self) -> &StyleRegistry<S> {
        &self.registry
    }

    /// Returns the collected metrics.
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Returns the decoration style of a category.
    pub fn style_for(&self, category: Category) -> DecorationStyle {
        self.colors.get_style(self.classifier.bucketing(), category)
    }

    /// Re-highlights the host's active document.
    ///
    /// Every cached handle is cleared before the new ranges are applied, so a
    /// date that moved to another category or disappeared leaves nothing behind.
    /// Returns `None` without touching the host when no document is active.
    pub fn run<H>(&mut self, host: &mut H) -> Result<Option<RangeGroup>>
    where
        H: EditorHost<Style = S>,
    {
        let started = Instant::now();
        let today = self.reference_date();

        let Some(text) = host.document_text() else {
            self.metrics.record_skipped_run();
            tracing::trace!("no active document, skipping date highlighting");
            return Ok(None);
        };
        let group = self.classifier.range_group(text, today);

        for category in group.categories() {
            self.ensure_style(host, category)?;
        }

        for (_, handle) in self.registry.iter() {
            host.apply_style(handle, &[]);
        }
        for (category, spans) in group.iter() {
            let Some(handle) = self.registry.get(category) else {
                continue;
            };
            let ranges: Vec<TextRange> = spans
                .iter()
                .map(|span| TextRange::new(host.offset_to_position(span.start), host.offset_to_position(span.end)))
                .collect();
            host.apply_style(handle, &ranges);
        }

        let elapsed = started.elapsed();
        let dates = group.total_ranges();
        self.metrics.record_run(elapsed, dates);
        tracing::debug!(
            %today,
            dates,
            categories = group.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "highlighted dates"
        );
        Ok(Some(group))
    }

    /// Releases every style handle to the host and empties the cache.
    pub fn release_all<H>(&mut self, host: &mut H)
    where
        H: EditorHost<Style = S>,
    {
        let mut released = 0;
        for (category, handle) in self.registry.drain() {
            host.release_style(handle);
            self.metrics.record_style_released();
            released += 1;
            tracing::trace!(%category, "released style");
        }
        tracing::debug!(released, "released date styles");
    }

    fn ensure_style<H>(&mut self, host: &mut H, category: Category) -> Result<()>
    where
        H: EditorHost<Style = S>,
    {
        if self.registry.contains(category) {
            return Ok(());
        }
        let style = self.style_for(category);
        self.registry.get_or_create(category, || host.create_style(&style))?;
        self.metrics.record_style_created();
        tracing::trace!(%category, background = %style.background, "created style");
        Ok(())
    }
}
