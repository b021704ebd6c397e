//! Per-category clip selection with repeat avoidance

use super::Clip;
use crate::cues::CueCategory;
use crate::random::RandomSource;

/// Picks the clip to play when a category fires
///
/// Holds the category's full candidate set and the user's allowed subset.
/// Draws are uniform over the allowed clips, with one redraw when the first
/// draw repeats the previous pick.
#[derive(Debug, Clone)]
pub struct ClipSelector {
    category: CueCategory,
    candidates: Vec<Clip>,
    allowed: Vec<Clip>,
    last_pick: Option<Clip>,
}

impl ClipSelector {
    /// Create a selector with every candidate allowed
    pub fn new(category: CueCategory, candidates: Vec<Clip>) -> Self {
        Self {
            category,
            allowed: candidates.clone(),
            candidates,
            last_pick: None,
        }
    }

    /// Category this selector serves
    pub fn category(&self) -> CueCategory {
        self.category
    }

    /// Full candidate set
    pub fn candidates(&self) -> &[Clip] {
        &self.candidates
    }

    /// Currently allowed clips, in candidate order
    pub fn allowed(&self) -> &[Clip] {
        &self.allowed
    }

    /// Previous pick, if any
    pub fn last_pick(&self) -> Option<&Clip> {
        self.last_pick.as_ref()
    }

    /// Replace the allowed subset
    ///
    /// Clips outside the candidate set are discarded and returned. An empty
    /// result silences the category.
    pub fn set_allowed<'a>(&mut self, allowed: impl IntoIterator<Item = &'a Clip>) -> Vec<Clip> {
        let requested: Vec<&Clip> = allowed.into_iter().collect();

        let rejected: Vec<Clip> = requested
            .iter()
            .filter(|clip| !self.candidates.contains(**clip))
            .map(|clip| (*clip).clone())
            .collect();

        self.allowed = self
            .candidates
            .iter()
            .filter(|candidate| requested.contains(candidate))
            .cloned()
            .collect();

        for clip in &rejected {
            log::warn!("Clip {} is not a candidate for {}, ignoring", clip, self.category);
        }
        rejected
    }

    /// Pick a clip, or `None` when the category is silenced
    pub fn select(&mut self, rng: &mut dyn RandomSource) -> Option<Clip> {
        if self.allowed.is_empty() {
            return None;
        }

        let mut pick = &self.allowed[rng.next_index(self.allowed.len())];
        if self.allowed.len() > 1 && Some(pick) == self.last_pick.as_ref() {
            // One retry only; a second repeat is accepted
            pick = &self.allowed[rng.next_index(self.allowed.len())];
        }

        let pick = pick.clone();
        self.last_pick = Some(pick.clone());
        Some(pick)
    }
}
