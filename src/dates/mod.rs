// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Date extraction and distance measurement.
//!
//! This module finds `yyyy-MM-dd` tokens in raw text, drops the ones that are
//! not real calendar dates and measures how far the rest lie from a reference day.

pub mod distance;
pub mod extractor;

pub use distance::{DistanceMode, business_days_between, calendar_days_between, local_today};
pub use extractor::{BoundaryPolicy, CandidateMatch, Candidates, DateExtractor, DateMatches, ValidatedDate, parse_date};
