//! Clip catalog: the candidate clips of every cue category
//!
//! The built-in catalog ships with the crate. The clip sync pipeline may
//! write a TOML catalog that overrides individual categories:
//!
//! ```toml
//! [clips]
//! bounty_runes = ["ROONS"]
//! ambient = ["ADMIRALC", "BRUH", "WATCHDOTA"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::cues::CueCategory;
use crate::{CueError, Result};

/// One playable audio asset, identified by a stable name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clip(String);

impl Clip {
    /// Create a clip reference
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Clip name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Clip {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

const BOUNTY_RUNES: &[&str] = &["ROONS", "ROONS_ALERT"];
const HERO_DIED: &[&str] = &["BRUH", "AYAWUTFACE", "HISHEAD", "SMART"];
const MATCH_LOST: &[&str] = &["PLEBSAREDISGUSTING", "PERMABAN", "SLOWDOWN"];
const HERO_HEALED: &[&str] = &["FOOD", "SAUSAGE"];
const HERO_KILLED: &[&str] = &["FEELSGOODMAN", "NUTS", "PRAISE", "EXPECT"];
const MATCH_STARTED: &[&str] = &["WATCHDOTA", "ALLIANCE", "TEAMPEPEGA"];
const MIDAS_READY: &[&str] = &["MIDAS", "HABIBI"];
const HERO_RESPAWNED: &[&str] = &["MOTHERCOMES", "RONNIE", "CEB"];
const HERO_SMOKED: &[&str] = &["PSST", "LIPS"];
const MATCH_WON: &[&str] = &["ADMIRALC", "FEELSGOODMAN", "CEB"];
const AMBIENT: &[&str] = &[
    "ADMIRALC",
    "ALLIANCE",
    "AYAWUTFACE",
    "BRUH",
    "CEB",
    "EXPECT",
    "FEELSGOODMAN",
    "FOOD",
    "HABIBI",
    "HISHEAD",
    "LIPS",
    "MOTHERCOMES",
    "NUTS",
    "PERMABAN",
    "PLEBSAREDISGUSTING",
    "PRAISE",
    "PSST",
    "RONNIE",
    "SAUSAGE",
    "SLOWDOWN",
    "SMART",
    "STOP",
    "TEAMPEPEGA",
    "WATCHDOTA",
];

fn builtin_names(category: CueCategory) -> &'static [&'static str] {
    match category {
        CueCategory::BountyRunes => BOUNTY_RUNES,
        CueCategory::HeroDied => HERO_DIED,
        CueCategory::MatchLost => MATCH_LOST,
        CueCategory::HeroHealed => HERO_HEALED,
        CueCategory::HeroKilled => HERO_KILLED,
        CueCategory::MatchStarted => MATCH_STARTED,
        CueCategory::MidasReady => MIDAS_READY,
        CueCategory::HeroRespawned => HERO_RESPAWNED,
        CueCategory::HeroSmoked => HERO_SMOKED,
        CueCategory::MatchWon => MATCH_WON,
        CueCategory::Ambient => AMBIENT,
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    clips: BTreeMap<String, Vec<Clip>>,
}

/// Candidate clip sets per category
#[derive(Debug, Clone)]
pub struct ClipCatalog {
    categories: HashMap<CueCategory, Vec<Clip>>,
}

impl ClipCatalog {
    /// Catalog shipped with the crate
    pub fn builtin() -> Self {
        let categories = CueCategory::ALL
            .iter()
            .map(|&category| {
                let clips = builtin_names(category).iter().map(|&name| Clip::new(name)).collect();
                (category, clips)
            })
            .collect();
        Self { categories }
    }

    /// Parse a TOML catalog; categories it does not list keep their built-in clips
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut catalog = Self::builtin();

        for (id, clips) in file.clips {
            let category: CueCategory = id.parse()?;
            catalog.set_candidates(category, clips)?;
        }
        Ok(catalog)
    }

    /// Load a TOML catalog from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!("Loaded clip catalog from {}", path.display());
        Ok(catalog)
    }

    /// Replace the candidates of one category. Duplicates are dropped.
    pub fn set_candidates(&mut self, category: CueCategory, clips: Vec<Clip>) -> Result<()> {
        let mut unique: Vec<Clip> = Vec::with_capacity(clips.len());
        for clip in clips {
            if !unique.contains(&clip) {
                unique.push(clip);
            }
        }
        if unique.is_empty() {
            return Err(CueError::InvalidConfig(format!(
                "cue category {} has no candidate clips",
                category
            )));
        }
        self.categories.insert(category, unique);
        Ok(())
    }

    /// Candidate clips for a category, in catalog order
    pub fn candidates(&self, category: CueCategory) -> &[Clip] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `clip` belongs to the category's candidate set
    pub fn contains(&self, category: CueCategory, clip: &Clip) -> bool {
        self.candidates(category).contains(clip)
    }
}

impl Default for ClipCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
