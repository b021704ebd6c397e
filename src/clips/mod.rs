//! Audio clips
//!
//! - `ClipCatalog` - Candidate clips of every cue category
//! - `ClipSelector` - Allowed subset and anti-repeat selection for one category

mod catalog;
mod selector;

pub use catalog::{Clip, ClipCatalog};
pub use selector::ClipSelector;
