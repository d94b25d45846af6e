//! Font-size histogram and body-size estimation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A font size quantized to hundredths of a point.
///
/// Effective sizes come out of matrix arithmetic, so a nominal 12pt run can
/// arrive as `11.9999`. Quantizing keeps those in one histogram bucket and
/// gives sizes a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SizeKey(i32);

impl SizeKey {
    /// Quantize a size in points.
    pub fn from_points(size: f32) -> Self {
        SizeKey((size * 100.0).round() as i32)
    }

    /// The size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.points())
    }
}

/// Occurrence count per font size, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontHistogram {
    counts: IndexMap<SizeKey, usize>,
}

impl FontHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one span of the given size.
    pub fn add(&mut self, size: SizeKey) {
        *self.counts.entry(size).or_insert(0) += 1;
    }

    /// Record one span, quantizing its size.
    pub fn add_points(&mut self, size: f32) {
        self.add(SizeKey::from_points(size));
    }

    /// Occurrences of a size.
    pub fn count(&self, size: SizeKey) -> usize {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no span has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of recorded spans.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Sizes and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (SizeKey, usize)> + '_ {
        self.counts.iter().map(|(size, count)| (*size, *count))
    }

    /// The most frequent size, taken to be body text.
    ///
    /// When several sizes share the highest count, the one seen first in the
    /// document wins. Returns `None` for an empty histogram.
    pub fn body_size(&self) -> Option<SizeKey> {
        let mut best: Option<(SizeKey, usize)> = None;
        for (size, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((size, count)),
            }
        }
        best.map(|(size, _)| size)
    }
}
