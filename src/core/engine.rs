//! Event engine: turns rule firings into playback requests

use std::collections::HashMap;
use std::sync::Arc;

use super::events::{PlaybackRequest, PlaybackSink};
use crate::clips::{Clip, ClipCatalog, ClipSelector};
use crate::config::{ConfigHandle, EngineConfig};
use crate::cues::{CueCategory, CueRegistry};
use crate::random::{BoxedRandom, SeededRandom};
use crate::state::Transition;

/// Evaluates every cue rule on each transition and dispatches playback
///
/// Disabled categories are still evaluated so that stateful rules (the
/// ambient schedule) keep advancing; they just never reach the sink.
pub struct CueEngine {
    registry: CueRegistry,
    catalog: ClipCatalog,
    selectors: HashMap<CueCategory, ClipSelector>,
    config: ConfigHandle,
    /// Configuration currently applied to the selectors
    active: Arc<EngineConfig>,
    applied_generation: u64,
    sink: Arc<dyn PlaybackSink>,
    rng: BoxedRandom,
}

impl CueEngine {
    /// Create an engine from its parts
    ///
    /// `rng` drives clip selection; the registry's rules own their own sources.
    pub fn new(
        registry: CueRegistry,
        catalog: ClipCatalog,
        config: ConfigHandle,
        sink: Arc<dyn PlaybackSink>,
        rng: BoxedRandom,
    ) -> Self {
        let selectors = CueCategory::ALL
            .iter()
            .filter(|&&category| !catalog.candidates(category).is_empty())
            .map(|&category| {
                let candidates = catalog.candidates(category).to_vec();
                (category, ClipSelector::new(category, candidates))
            })
            .collect();

        let (generation, initial) = config.snapshot();
        let mut engine = Self {
            registry,
            catalog,
            selectors,
            config,
            active: initial.clone(),
            applied_generation: generation,
            sink,
            rng,
        };
        engine.apply_config(generation, initial);

        log::info!(
            "Cue engine ready with {} rules (config generation {})",
            engine.registry.len(),
            generation
        );
        engine
    }

    /// Engine with the built-in rules and catalog, seeded from the OS
    pub fn with_defaults(config: ConfigHandle, sink: impl PlaybackSink + 'static) -> Self {
        Self::new(
            CueRegistry::builtin(Box::new(SeededRandom::from_entropy())),
            ClipCatalog::builtin(),
            config,
            Arc::new(sink),
            Box::new(SeededRandom::from_entropy()),
        )
    }

    /// Evaluate a transition and dispatch playback for each firing cue
    ///
    /// Returns the requests handed to the sink, in rule order.
    pub fn on_transition(&mut self, transition: &Transition<'_>) -> Vec<PlaybackRequest> {
        self.refresh_config();

        let fired = self.registry.evaluate(transition);
        let mut requests = Vec::with_capacity(fired.len());

        for category in fired {
            if !self.active.is_enabled(category) {
                log::debug!("Cue {} fired but is disabled", category);
                continue;
            }

            let Some(selector) = self.selectors.get_mut(&category) else {
                log::warn!("Cue {} fired but has no clips in the catalog", category);
                continue;
            };

            let Some(clip) = selector.select(self.rng.as_mut()) else {
                log::debug!("Cue {} fired but no clips are allowed", category);
                continue;
            };

            log::info!("Cue {} fired, playing {}", category, clip);
            let request = PlaybackRequest::new(category, clip, self.active.volume());
            self.sink.play(request.clone());
            requests.push(request);
        }

        requests
    }

    /// Pick up a replaced configuration, if any
    fn refresh_config(&mut self) {
        let (generation, config) = self.config.snapshot();
        if generation != self.applied_generation {
            self.apply_config(generation, config);
        }
    }

    /// Push a configuration into every selector
    fn apply_config(&mut self, generation: u64, config: Arc<EngineConfig>) {
        let mut effective = (*config).clone();
        for (category, clip) in effective.retain_known(&self.catalog) {
            log::warn!("Configured clip {} is no longer available for {}", clip, category);
        }

        for (&category, selector) in self.selectors.iter_mut() {
            let allowed: Vec<Clip> = effective
                .allowed_clips(category, self.catalog.candidates(category))
                .into_iter()
                .cloned()
                .collect();
            selector.set_allowed(&allowed);
        }

        self.active = Arc::new(effective);
        self.applied_generation = generation;
        log::debug!("Applied cue configuration generation {}", generation);
    }

    /// Configuration the engine is currently using, after catalog filtering
    pub fn active_config(&self) -> &EngineConfig {
        &self.active
    }

    /// Handle the engine reads its configuration from
    pub fn config_handle(&self) -> &ConfigHandle {
        &self.config
    }

    /// Registered rules
    pub fn registry(&self) -> &CueRegistry {
        &self.registry
    }

    /// Clip catalog
    pub fn catalog(&self) -> &ClipCatalog {
        &self.catalog
    }

    /// Selector for a category
    pub fn selector(&self, category: CueCategory) -> Option<&ClipSelector> {
        self.selectors.get(&category)
    }
}
