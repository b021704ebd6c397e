//! Engine configuration
//!
//! The configuration is owned by the host application and stored by it. The
//! engine only reads it, through a `ConfigHandle` that swaps whole
//! configurations atomically.
//!
//! ```toml
//! volume = 0.8
//!
//! [categories.ambient]
//! enabled = false
//!
//! [categories.hero_died]
//! clips = ["BRUH", "SMART"]
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::clips::{Clip, ClipCatalog};
use crate::cues::CueCategory;
use crate::{CueError, Result};

/// Volume used when the configuration does not set one
pub const DEFAULT_VOLUME: f32 = 1.0;

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_true() -> bool {
    true
}

/// Settings for one cue category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Whether the category may produce playback
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Allowed clips; `None` allows every candidate, an empty list silences
    /// the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<Clip>>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            clips: None,
        }
    }
}

impl CategoryConfig {
    /// Enabled category restricted to the given clips
    pub fn with_clips(clips: impl IntoIterator<Item = Clip>) -> Self {
        Self {
            enabled: true,
            clips: Some(clips.into_iter().collect()),
        }
    }

    /// Disabled category
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            clips: None,
        }
    }
}

/// On-disk configuration layout
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_volume")]
    volume: f32,
    #[serde(default)]
    categories: BTreeMap<String, CategoryConfig>,
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    volume: f32,
    categories: HashMap<CueCategory, CategoryConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            categories: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Create a default configuration: every category enabled with every clip
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;

        let mut config = Self::new().with_volume(file.volume)?;
        for (id, category_config) in file.categories {
            let category: CueCategory = id.parse()?;
            config.categories.insert(category, category_config);
        }
        Ok(config)
    }

    /// Load a TOML configuration from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded cue configuration from {}", path.display());
        Ok(config)
    }

    /// Set the global volume, clamped to `[0, 1]`
    pub fn with_volume(mut self, volume: f32) -> Result<Self> {
        if !volume.is_finite() {
            return Err(CueError::InvalidConfig(format!(
                "volume must be a number, got {}",
                volume
            )));
        }
        self.volume = volume.clamp(0.0, 1.0);
        Ok(self)
    }

    /// Set the settings for one category
    pub fn with_category(mut self, category: CueCategory, config: CategoryConfig) -> Self {
        self.categories.insert(category, config);
        self
    }

    /// Global playback volume in `[0, 1]`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Settings for a category; unlisted categories use the defaults
    pub fn category(&self, category: CueCategory) -> CategoryConfig {
        self.categories.get(&category).cloned().unwrap_or_default()
    }

    /// Whether a category may produce playback
    pub fn is_enabled(&self, category: CueCategory) -> bool {
        self.categories
            .get(&category)
            .map(|c| c.enabled)
            .unwrap_or(true)
    }

    /// Allowed clips for a category given its candidates
    pub fn allowed_clips<'a>(
        &'a self,
        category: CueCategory,
        candidates: &'a [Clip],
    ) -> Vec<&'a Clip> {
        match self.categories.get(&category).and_then(|c| c.clips.as_ref()) {
            Some(clips) => clips.iter().collect(),
            None => candidates.iter().collect(),
        }
    }

    /// Drop configured clips the catalog no longer offers
    ///
    /// Returns the removed clips so the host can tell the user.
    pub fn retain_known(&mut self, catalog: &ClipCatalog) -> Vec<(CueCategory, Clip)> {
        let mut removed = Vec::new();

        for (&category, config) in self.categories.iter_mut() {
            if let Some(clips) = config.clips.as_mut() {
                clips.retain(|clip| {
                    let known = catalog.contains(category, clip);
                    if !known {
                        removed.push((category, clip.clone()));
                    }
                    known
                });
            }
        }

        removed.sort();
        removed
    }
}

struct ConfigSlot {
    generation: u64,
    config: Arc<EngineConfig>,
}

/// Shared, atomically replaceable configuration
///
/// Cloning the handle shares the same slot. Readers always see one complete
/// configuration; the generation counter tells them when it changed.
#[derive(Clone)]
pub struct ConfigHandle {
    slot: Arc<RwLock<ConfigSlot>>,
}

impl ConfigHandle {
    /// Create a handle holding `config` as generation 0
    pub fn new(config: EngineConfig) -> Self {
        Self {
            slot: Arc::new(RwLock::new(ConfigSlot {
                generation: 0,
                config: Arc::new(config),
            })),
        }
    }

    /// Swap in a new configuration, returning its generation
    pub fn replace(&self, config: EngineConfig) -> u64 {
        let mut slot = self.slot.write();
        slot.generation += 1;
        slot.config = Arc::new(config);
        log::info!("Cue configuration replaced (generation {})", slot.generation);
        slot.generation
    }

    /// Current configuration
    pub fn current(&self) -> Arc<EngineConfig> {
        self.slot.read().config.clone()
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Current configuration together with its generation
    pub fn snapshot(&self) -> (u64, Arc<EngineConfig>) {
        let slot = self.slot.read();
        (slot.generation, slot.config.clone())
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for ConfigHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (generation, config) = self.snapshot();
        f.debug_struct("ConfigHandle")
            .field("generation", &generation)
            .field("config", &config)
            .finish()
    }
}
