//! Item cooldown rules

use super::{CueCategory, CueRule};
use crate::state::Transition;

/// Hand of Midas item identifier
pub const HAND_OF_MIDAS: &str = "item_hand_of_midas";

/// Fires when an item comes off cooldown
///
/// Slots are scanned independently on each side: the item only has to be
/// cooling down somewhere in the previous inventory and ready somewhere in
/// the current one. Moving the item between slots does not matter.
#[derive(Debug, Clone)]
pub struct ItemReadyRule {
    category: CueCategory,
    item: String,
}

impl ItemReadyRule {
    /// Create a rule for `item` reporting under `category`
    pub fn new(category: CueCategory, item: impl Into<String>) -> Self {
        Self {
            category,
            item: item.into(),
        }
    }

    /// Hand of Midas ready rule
    pub fn midas() -> Self {
        Self::new(CueCategory::MidasReady, HAND_OF_MIDAS)
    }

    /// Item identifier this rule watches
    pub fn item(&self) -> &str {
        &self.item
    }
}

impl CueRule for ItemReadyRule {
    fn category(&self) -> CueCategory {
        self.category
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        match transition.pair() {
            Some((previous, current)) => {
                previous.has_item_on_cooldown(&self.item) && current.has_item_ready(&self.item)
            }
            None => false,
        }
    }
}
