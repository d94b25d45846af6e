//! Title resolution.

use super::classifier::LevelAssignment;
use super::collector::HeadingCandidate;

/// Where the title came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSource {
    /// The candidate with this index (an H1 on page 1)
    Heading(usize),
    /// The first line of page 1's raw text
    FirstLine,
    /// Nothing usable was found
    None,
}

/// A resolved title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    /// Title text
    pub text: String,
    /// Origin of the text
    pub source: TitleSource,
}

impl ResolvedTitle {
    fn none() -> Self {
        Self {
            text: String::new(),
            source: TitleSource::None,
        }
    }

    /// Index of the candidate used as title, if the title is a heading.
    pub fn candidate_index(&self) -> Option<usize> {
        match self.source {
            TitleSource::Heading(index) => Some(index),
            _ => None,
        }
    }
}

/// Picks the document title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleResolver;

impl TitleResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the title.
    ///
    /// The first candidate (in document order) at the H1 size on page 1 with
    /// non-blank text wins. Otherwise the first non-blank line of `first_page_text` is used,
    /// trimmed. `first_page_text` is `None` when the document has no pages.
    pub fn resolve(
        &self,
        levels: &LevelAssignment,
        candidates: &[HeadingCandidate],
        first_page_text: Option<&str>,
    ) -> ResolvedTitle {
        if let Some(h1) = levels.h1_size() {
            if let Some(candidate) = candidates
                .iter()
                .find(|c| c.size == h1 && c.page == 1 && !c.text.trim().is_empty())
            {
                return ResolvedTitle {
                    text: candidate.text.clone(),
                    source: TitleSource::Heading(candidate.index),
                };
            }
        }

        first_page_text
            .and_then(|text| text.lines().map(str::trim).find(|line| !line.is_empty()))
            .map(|line| ResolvedTitle {
                text: line.to_string(),
                source: TitleSource::FirstLine,
            })
            .unwrap_or_else(ResolvedTitle::none)
    }
}
