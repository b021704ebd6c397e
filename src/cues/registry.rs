//! Registry holding the cue rules of one session

use super::{
    AmbientRule, BountyRunesRule, BoxedRule, CueCategory, HeroDiedRule, HeroHealedRule,
    HeroKilledRule, HeroRespawnedRule, HeroSmokedRule, ItemReadyRule, MatchLostRule,
    MatchStartedRule, MatchWonRule,
};
use crate::random::BoxedRandom;
use crate::state::Transition;

/// Ordered set of cue rules
///
/// Rules are evaluated in registration order. Registering a second rule for a
/// category that already has one replaces it in place.
pub struct CueRegistry {
    rules: Vec<BoxedRule>,
}

impl CueRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with every built-in rule
    pub fn builtin(ambient_rng: BoxedRandom) -> Self {
        let mut registry = Self::new();
        registry.register_builtin(ambient_rng);
        registry
    }

    /// Register a rule
    pub fn register(&mut self, rule: BoxedRule) {
        let category = rule.category();

        if let Some(existing) = self.rules.iter_mut().find(|r| r.category() == category) {
            log::warn!("Replacing existing rule for cue category {}", category);
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Register all built-in rules
    pub fn register_builtin(&mut self, ambient_rng: BoxedRandom) {
        log::info!("Registering built-in cue rules");

        self.register(Box::new(BountyRunesRule::default()));
        self.register(Box::new(HeroDiedRule));
        self.register(Box::new(MatchLostRule));
        self.register(Box::new(HeroHealedRule::default()));
        self.register(Box::new(HeroKilledRule));
        self.register(Box::new(MatchStartedRule));
        self.register(Box::new(ItemReadyRule::midas()));
        self.register(Box::new(HeroRespawnedRule));
        self.register(Box::new(HeroSmokedRule));
        self.register(Box::new(MatchWonRule));
        self.register(Box::new(AmbientRule::new(ambient_rng)));

        log::info!("Registered {} built-in cue rules", self.rules.len());
    }

    /// Check if a category has a rule
    pub fn has_rule(&self, category: CueCategory) -> bool {
        self.rules.iter().any(|r| r.category() == category)
    }

    /// Registered categories in evaluation order
    pub fn categories(&self) -> Vec<CueCategory> {
        self.rules.iter().map(|r| r.category()).collect()
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against the transition, in order
    ///
    /// Every rule runs regardless of earlier results so stateful rules keep
    /// advancing. Returns the categories that fired.
    pub fn evaluate(&mut self, transition: &Transition<'_>) -> Vec<CueCategory> {
        self.rules
            .iter_mut()
            .filter_map(|rule| rule.evaluate(transition).then(|| rule.category()))
            .collect()
    }
}

impl Default for CueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cues::CueRule;
    use crate::random::ScriptedRandom;
    use crate::state::StateSnapshot;

    // Fires on every transition that has a previous snapshot
    struct AlwaysRule(CueCategory);

    impl CueRule for AlwaysRule {
        fn category(&self) -> CueCategory {
            self.0
        }
        fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
            !transition.is_initial()
        }
    }

    #[test]
    fn test_builtin_registers_every_category_in_order() {
        let registry = CueRegistry::builtin(Box::new(ScriptedRandom::new()));

        assert_eq!(registry.len(), CueCategory::ALL.len());
        assert_eq!(registry.categories(), CueCategory::ALL.to_vec());
        for category in CueCategory::ALL {
            assert!(registry.has_rule(category));
        }
    }

    #[test]
    fn test_register_replaces_same_category() {
        let mut registry = CueRegistry::new();
        registry.register(Box::new(HeroDiedRule));
        registry.register(Box::new(MatchWonRule));
        registry.register(Box::new(AlwaysRule(CueCategory::HeroDied)));

        assert_eq!(registry.categories(), vec![CueCategory::HeroDied, CueCategory::MatchWon]);

        let snapshot = StateSnapshot::new();
        let fired = registry.evaluate(&Transition::new(Some(&snapshot), &snapshot));
        assert_eq!(fired, vec![CueCategory::HeroDied]);
    }

    #[test]
    fn test_evaluate_reports_all_firing_rules() {
        let mut registry = CueRegistry::new();
        registry.register(Box::new(HeroDiedRule));
        registry.register(Box::new(HeroKilledRule));
        registry.register(Box::new(MatchWonRule));

        let before = StateSnapshot::new().with_hero_alive(true).with_kills(1);
        let after = StateSnapshot::new().with_hero_alive(false).with_kills(2);
        let fired = registry.evaluate(&Transition::new(Some(&before), &after));

        assert_eq!(fired, vec![CueCategory::HeroDied, CueCategory::HeroKilled]);
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = CueRegistry::default();
        let snapshot = StateSnapshot::new();

        assert!(registry.is_empty());
        assert!(registry.evaluate(&Transition::initial(&snapshot)).is_empty());
    }
}
