// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance and resource accounting for the highlighting pipeline.

use std::fmt;
use std::time::Duration;

/// Counters collected over one activation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineMetrics {
    /// Number of completed pipeline runs
    pub runs: usize,
    /// Runs skipped because no document was active
    pub skipped_runs: usize,
    /// Dates classified over all runs
    pub dates_classified: usize,
    /// Dates classified by the most recent run
    pub last_dates: usize,
    /// Style handles allocated from the host
    pub styles_created: usize,
    /// Style handles handed back to the host
    pub styles_released: usize,
    /// Total time spent in pipeline runs
    pub total_time: Duration,
    /// Duration of the most recent run
    pub last_run_time: Duration,
    /// Longest single run
    pub max_run_time: Duration,
}

impl PipelineMetrics {
    /// Records a completed pipeline run.
    pub fn record_run(&mut self, duration: Duration, dates: usize) {
        self.runs += 1;
        self.dates_classified += dates;
        self.last_dates = dates;
        self.total_time += duration;
        self.last_run_time = duration;
        if duration > self.max_run_time {
            self.max_run_time = duration;
        }
    }

    /// Records a run that found no active document.
    pub fn record_skipped_run(&mut self) {
        self.skipped_runs += 1;
    }

    /// Records a style handle allocation.
    pub fn record_style_created(&mut self) {
        self.styles_created += 1;
    }

    /// Records a style handle release.
    pub fn record_style_released(&mut self) {
        self.styles_released += 1;
    }

    /// Handles currently held by the engine.
    pub fn live_styles(&self) -> usize {
        self.styles_created.saturating_sub(self.styles_released)
    }

    /// Average duration of a run.
    pub fn avg_run_time(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.runs as u32
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

impl fmt::Display for PipelineMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "runs:              {} ({} skipped)", self.runs, self.skipped_runs)?;
        writeln!(f, "dates classified:  {} ({} last run)", self.dates_classified, self.last_dates)?;
        writeln!(f, "styles:            {} created, {} released", self.styles_created, self.styles_released)?;
        writeln!(f, "avg run time:      {}us", self.avg_run_time().as_micros())?;
        write!(f, "max run time:      {}us", self.max_run_time.as_micros())
    }
}
