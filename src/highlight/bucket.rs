// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bucketing of day distances into a bounded set of categories.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Fibonacci thresholds used by the default boundary policy.
pub const FIBONACCI_THRESHOLDS: [u32; 10] = [1, 2, 3, 5, 8, 13, 21, 34, 55, 89];

/// Cap used by [`BucketPolicy::linear`] when none is configured.
pub const DEFAULT_LINEAR_CAP: u32 = 50;

/// A visual bucket. Category 0 holds past dates and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Category(u32);

impl Category {
    /// Past dates and today.
    pub const PAST: Category = Category(0);

    /// Creates a category from its raw key.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw key.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true for the past/today bucket.
    pub const fn is_past(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a signed day distance to a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum BucketPolicy {
    /// One category per day up to `cap`; everything further out shares `cap`.
    Linear {
        /// Highest category
        #[serde(default = "default_linear_cap")]
        cap: u32,
    },
    /// A category per threshold; a distance falls into the largest threshold not
    /// exceeding it, and everything past the last threshold shares that one.
    Thresholds {
        /// Strictly ascending, positive
        #[serde(default = "default_thresholds")]
        thresholds: Vec<u32>,
    },
}

fn default_linear_cap() -> u32 {
    DEFAULT_LINEAR_CAP
}

fn default_thresholds() -> Vec<u32> {
    FIBONACCI_THRESHOLDS.to_vec()
}

impl Default for BucketPolicy {
    fn default() -> Self {
        Self::fibonacci()
    }
}

impl BucketPolicy {
    /// Linear bucketing with the default cap.
    pub fn linear() -> Self {
        Self::Linear { cap: default_linear_cap() }
    }

    /// Boundary bucketing on the Fibonacci sequence 1, 2, 3, 5 ... 89.
    pub fn fibonacci() -> Self {
        Self::Thresholds {
            thresholds: default_thresholds(),
        }
    }

    /// Returns the category for a distance in days.
    ///
    /// Zero and negative distances always land in [`Category::PAST`].
    pub fn categorize(&self, distance: i64) -> Category {
        if distance <= 0 {
            return Category::PAST;
        }
        match self {
            BucketPolicy::Linear { cap } => {
                let cap = i64::from(*cap);
                Category(distance.min(cap) as u32)
            }
            BucketPolicy::Thresholds { thresholds } => {
                // Distances closer than the first threshold still count as future.
                let first = thresholds.first().copied().unwrap_or(0);
                let bucket = thresholds
                    .iter()
                    .rev()
                    .find(|&&threshold| i64::from(threshold) <= distance)
                    .copied()
                    .unwrap_or(first);
                Category(bucket)
            }
        }
    }

    /// Returns the farthest category this policy produces.
    pub fn max_category(&self) -> Category {
        match self {
            BucketPolicy::Linear { cap } => Category(*cap),
            BucketPolicy::Thresholds { thresholds } => Category(thresholds.last().copied().unwrap_or(0)),
        }
    }

    /// Returns every category this policy can produce, nearest first.
    pub fn categories(&self) -> Vec<Category> {
        let future: Vec<Category> = match self {
            BucketPolicy::Linear { cap } => (1..=*cap).map(Category).collect(),
            BucketPolicy::Thresholds { thresholds } => thresholds.iter().copied().map(Category).collect(),
        };
        std::iter::once(Category::PAST).chain(future).collect()
    }

    /// Position of a category between past (0.0) and the farthest category (1.0).
    ///
    /// Monotonic in the category. Threshold policies spread their buckets evenly
    /// by rank rather than by value, so near buckets stay distinguishable.
    pub fn intensity(&self, category: Category) -> f64 {
        if category.is_past() {
            return 0.0;
        }
        match self {
            BucketPolicy::Linear { cap } => {
                if *cap == 0 {
                    return 1.0;
                }
                f64::from(category.0.min(*cap)) / f64::from(*cap)
            }
            BucketPolicy::Thresholds { thresholds } => {
                if thresholds.is_empty() {
                    return 1.0;
                }
                let rank = thresholds.partition_point(|&threshold| threshold <= category.0);
                rank as f64 / thresholds.len() as f64
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            BucketPolicy::Linear { cap } => {
                if *cap == 0 {
                    return Err(Error::Config("linear cap must be at least 1".into()));
                }
            }
            BucketPolicy::Thresholds { thresholds } => {
                if thresholds.is_empty() {
                    return Err(Error::Config("thresholds must not be empty".into()));
                }
                if thresholds[0] == 0 {
                    return Err(Error::Config("thresholds must be positive".into()));
                }
                if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(Error::Config(format!(
                        "thresholds must be strictly ascending: {thresholds:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_bucketing() {
        let policy = BucketPolicy::linear();
        assert_eq!(policy.categorize(-30), Category::PAST);
        assert_eq!(policy.categorize(0), Category::PAST);
        assert_eq!(policy.categorize(1), Category::new(1));
        assert_eq!(policy.categorize(49), Category::new(49));
        assert_eq!(policy.categorize(50), Category::new(50));
        assert_eq!(policy.categorize(10_000), Category::new(50));
        assert_eq!(policy.max_category(), Category::new(50));
    }

    #[test]
    fn test_linear_cap_applies_below_distance() {
        let policy = BucketPolicy::Linear { cap: 30 };
        assert_eq!(policy.categorize(49), Category::new(30));
    }

    #[test]
    fn test_fibonacci_bucketing() {
        let policy = BucketPolicy::fibonacci();
        assert_eq!(policy.categorize(-1), Category::PAST);
        assert_eq!(policy.categorize(0), Category::PAST);
        assert_eq!(policy.categorize(1), Category::new(1));
        assert_eq!(policy.categorize(4), Category::new(3));
        assert_eq!(policy.categorize(5), Category::new(5));
        assert_eq!(policy.categorize(20), Category::new(13));
        assert_eq!(policy.categorize(49), Category::new(34));
        assert_eq!(policy.categorize(89), Category::new(89));
        assert_eq!(policy.categorize(365), Category::new(89));
    }

    #[test]
    fn test_distance_below_first_threshold() {
        let policy = BucketPolicy::Thresholds { thresholds: vec![7, 30] };
        assert_eq!(policy.categorize(3), Category::new(7));
        assert_eq!(policy.categorize(7), Category::new(7));
        assert_eq!(policy.categorize(29), Category::new(7));
        assert_eq!(policy.categorize(31), Category::new(30));
    }

    #[test]
    fn test_categories() {
        assert_eq!(BucketPolicy::fibonacci().categories().len(), 11);
        assert_eq!(BucketPolicy::Linear { cap: 3 }.categories(), vec![
            Category::new(0),
            Category::new(1),
            Category::new(2),
            Category::new(3)
        ]);
    }

    #[test]
    fn test_intensity_is_monotonic() {
        for policy in [BucketPolicy::linear(), BucketPolicy::fibonacci()] {
            let categories = policy.categories();
            assert_eq!(policy.intensity(Category::PAST), 0.0);
            assert_eq!(policy.intensity(policy.max_category()), 1.0);
            for pair in categories.windows(2) {
                assert!(policy.intensity(pair[0]) < policy.intensity(pair[1]), "{policy:?} {pair:?}");
            }
        }
    }

    #[test]
    fn test_validation() {
        assert!(BucketPolicy::linear().validate().is_ok());
        assert!(BucketPolicy::fibonacci().validate().is_ok());
        assert!(BucketPolicy::Linear { cap: 0 }.validate().is_err());
        assert!(BucketPolicy::Thresholds { thresholds: vec![] }.validate().is_err());
        assert!(BucketPolicy::Thresholds { thresholds: vec![0, 1] }.validate().is_err());
        assert!(BucketPolicy::Thresholds { thresholds: vec![1, 1] }.validate().is_err());
        assert!(BucketPolicy::Thresholds { thresholds: vec![2, 1] }.validate().is_err());
    }
}
