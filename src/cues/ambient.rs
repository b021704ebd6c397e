//! Ambient cues scheduled on the in-game clock
//!
//! Unlike the other rules this one does not look for a state change. It
//! keeps the clock time of its next play and fires whenever the current
//! clock reaches it, then schedules the next play a random quiet period
//! later.

use super::{CueCategory, CueRule};
use crate::random::BoxedRandom;
use crate::state::Transition;

/// Shortest quiet period between ambient cues (5 minutes)
pub const MIN_QUIET_SECONDS: i64 = 5 * 60;

/// Longest quiet period between ambient cues (15 minutes)
pub const MAX_QUIET_SECONDS: i64 = 15 * 60;

/// Periodic cue driven by `clock_time`
pub struct AmbientRule {
    rng: BoxedRandom,
    min_quiet: i64,
    max_quiet: i64,
    next_trigger: Option<i64>,
}

impl AmbientRule {
    /// Create a rule with the default 5-15 minute quiet period
    pub fn new(rng: BoxedRandom) -> Self {
        Self::with_bounds(rng, MIN_QUIET_SECONDS, MAX_QUIET_SECONDS)
    }

    /// Create a rule with custom quiet period bounds (seconds, inclusive)
    pub fn with_bounds(rng: BoxedRandom, min_quiet: i64, max_quiet: i64) -> Self {
        let min_quiet = min_quiet.max(1);
        Self {
            rng,
            min_quiet,
            max_quiet: max_quiet.max(min_quiet),
            next_trigger: None,
        }
    }

    /// Clock time of the next play, `None` until the first clock is seen
    pub fn next_trigger(&self) -> Option<i64> {
        self.next_trigger
    }

    fn quiet_period(&mut self) -> i64 {
        self.rng.next_in_range(self.min_quiet, self.max_quiet)
    }
}

impl CueRule for AmbientRule {
    fn category(&self) -> CueCategory {
        CueCategory::Ambient
    }

    // The clock is compared as-is: a reset to an earlier time leaves the
    // pending target in place. A target past the end of the clock range is
    // never scheduled.
    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        let Some(clock) = transition.current.clock_time else {
            return false;
        };

        match self.next_trigger {
            None => {
                let Some(next) = clock.checked_add(self.quiet_period()) else {
                    log::warn!("Clock time {} out of range, ambient cue not primed", clock);
                    return false;
                };
                log::debug!("Ambient cue primed for clock time {}", next);
                self.next_trigger = Some(next);
                false
            }
            Some(next) if clock >= next => {
                let Some(following) = next.checked_add(self.quiet_period()) else {
                    log::warn!("Ambient cue target {} cannot advance, skipping", next);
                    return false;
                };
                log::debug!("Ambient cue due at {} (clock {}), next at {}", next, clock, following);
                self.next_trigger = Some(following);
                true
            }
            Some(_) => false,
        }
    }
}

impl std::fmt::Debug for AmbientRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientRule")
            .field("min_quiet", &self.min_quiet)
            .field("max_quiet", &self.max_quiet)
            .field("next_trigger", &self.next_trigger)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::state::StateSnapshot;

    fn clock(seconds: i64) -> StateSnapshot {
        StateSnapshot::new().with_clock_time(seconds)
    }

    fn evaluate(rule: &mut AmbientRule, seconds: i64) -> bool {
        let current = clock(seconds);
        rule.evaluate(&Transition::initial(&current))
    }

    #[test]
    fn test_first_call_primes_without_firing() {
        let mut rule = AmbientRule::new(Box::new(SeededRandom::from_seed(1)));
        let first = clock(100);

        assert!(!rule.evaluate(&Transition::initial(&first)));
        let next = rule.next_trigger().unwrap();
        assert!((400..=1000).contains(&next));
    }

    #[test]
    fn test_fires_when_clock_reaches_target() {
        let rng = ScriptedRandom::new().with_values([420, 600]);
        let mut rule = AmbientRule::new(Box::new(rng));

        assert!(!evaluate(&mut rule, 100));
        assert_eq!(rule.next_trigger(), Some(520));

        assert!(!evaluate(&mut rule, 519));
        assert!(evaluate(&mut rule, 520));
        assert_eq!(rule.next_trigger(), Some(1120));

        assert!(!evaluate(&mut rule, 521));
    }

    #[test]
    fn test_advance_stays_within_bounds() {
        let mut rule = AmbientRule::new(Box::new(SeededRandom::from_seed(99)));
        assert!(!evaluate(&mut rule, 100));

        for _ in 0..50 {
            let target = rule.next_trigger().unwrap();
            assert!(evaluate(&mut rule, target));
            let advanced = rule.next_trigger().unwrap() - target;
            assert!((MIN_QUIET_SECONDS..=MAX_QUIET_SECONDS).contains(&advanced));
        }
    }

    #[test]
    fn test_duplicate_clock_depends_only_on_current() {
        let rng = ScriptedRandom::new().with_values([300, 300]);
        let mut rule = AmbientRule::new(Box::new(rng));
        let snapshot = clock(0);

        assert!(!rule.evaluate(&Transition::initial(&snapshot)));
        assert!(!rule.evaluate(&Transition::new(Some(&snapshot), &snapshot)));

        let due = clock(300);
        assert!(rule.evaluate(&Transition::new(Some(&snapshot), &due)));
        // Same push again: target already moved to 600
        assert!(!rule.evaluate(&Transition::new(Some(&due), &due)));
    }

    #[test]
    fn test_clock_reset_keeps_pending_target() {
        let rng = ScriptedRandom::new().with_values([300]);
        let mut rule = AmbientRule::new(Box::new(rng));

        assert!(!evaluate(&mut rule, 2400));
        assert_eq!(rule.next_trigger(), Some(2700));

        assert!(!evaluate(&mut rule, 0));
        assert_eq!(rule.next_trigger(), Some(2700));
    }

    #[test]
    fn test_clock_near_range_end_does_not_prime() {
        let mut rule = AmbientRule::new(Box::new(ScriptedRandom::new()));

        assert!(!evaluate(&mut rule, i64::MAX - 7));
        assert!(rule.next_trigger().is_none());

        // A sane clock afterwards still primes normally
        assert!(!evaluate(&mut rule, 100));
        assert_eq!(rule.next_trigger(), Some(400));
    }

    #[test]
    fn test_target_that_cannot_advance_is_kept() {
        let rng = ScriptedRandom::new().with_values([300, 300, 300]);
        let mut rule = AmbientRule::new(Box::new(rng));
        let start = i64::MAX - 400;

        assert!(!evaluate(&mut rule, start));
        assert_eq!(rule.next_trigger(), Some(start + 300));

        assert!(!evaluate(&mut rule, i64::MAX));
        assert!(!evaluate(&mut rule, i64::MAX));
        assert_eq!(rule.next_trigger(), Some(start + 300));
    }

    #[test]
    fn test_missing_clock_neither_primes_nor_fires() {
        let mut rule = AmbientRule::new(Box::new(ScriptedRandom::new()));
        let unknown = StateSnapshot::new();

        assert!(!rule.evaluate(&Transition::initial(&unknown)));
        assert!(rule.next_trigger().is_none());
    }
}
