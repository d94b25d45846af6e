//! Heading classification by font-size rank.

use crate::model::{HeadingLevel, OutlineEntry};

use super::collector::HeadingCandidate;
use super::histogram::SizeKey;

/// Font size to heading level, for at most three sizes, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    levels: Vec<(SizeKey, HeadingLevel)>,
}

impl LevelAssignment {
    /// Rank the distinct candidate sizes above `body_size` and map the top
    /// three to H1, H2 and H3.
    pub fn from_candidates(body_size: SizeKey, candidates: &[HeadingCandidate]) -> Self {
        let mut sizes: Vec<SizeKey> = candidates
            .iter()
            .map(|c| c.size)
            .filter(|size| *size > body_size)
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();

        let levels = sizes
            .into_iter()
            .enumerate()
            .map_while(|(rank, size)| HeadingLevel::from_rank(rank).map(|level| (size, level)))
            .collect();

        Self { levels }
    }

    /// Level assigned to a size, if any.
    pub fn level_of(&self, size: SizeKey) -> Option<HeadingLevel> {
        self.levels
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, level)| *level)
    }

    /// The size mapped to H1.
    pub fn h1_size(&self) -> Option<SizeKey> {
        self.levels.first().map(|(size, _)| *size)
    }

    /// Assigned (size, level) pairs, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (SizeKey, HeadingLevel)> + '_ {
        self.levels.iter().copied()
    }

    /// Number of levels in use.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if no size qualified as a heading.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// A candidate that survived classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedHeading {
    /// Assigned level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Quantized font size
    pub size: SizeKey,
    /// Candidate index, i.e. position in document order
    pub index: usize,
}

impl From<&ClassifiedHeading> for OutlineEntry {
    fn from(heading: &ClassifiedHeading) -> Self {
        OutlineEntry::new(heading.level, heading.text.clone(), heading.page)
    }
}

/// Keeps candidates strictly larger than body text and assigns levels.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier {
    body_size: SizeKey,
}

impl HeadingClassifier {
    /// Create a classifier for a document whose body text has `body_size`.
    pub fn new(body_size: SizeKey) -> Self {
        Self { body_size }
    }

    /// The body-size threshold.
    pub fn body_size(&self) -> SizeKey {
        self.body_size
    }

    /// Classify candidates.
    ///
    /// Candidates at or below body size, and those whose size ranks below
    /// the third heading size, are dropped. The result is ordered by page,
    /// then by document order within a page.
    pub fn classify(
        &self,
        candidates: &[HeadingCandidate],
    ) -> (LevelAssignment, Vec<ClassifiedHeading>) {
        let levels = LevelAssignment::from_candidates(self.body_size, candidates);

        let mut headings: Vec<ClassifiedHeading> = candidates
            .iter()
            .filter_map(|candidate| {
                levels.level_of(candidate.size).map(|level| ClassifiedHeading {
                    level,
                    text: candidate.text.clone(),
                    page: candidate.page,
                    size: candidate.size,
                    index: candidate.index,
                })
            })
            .collect();
        headings.sort_by_key(|h| (h.page, h.index));

        (levels, headings)
    }
}
