//! Animation lifecycle controller
//!
//! Reconciles a logical intent with the CSS animation that visualizes it.
//! The controller is a small state machine:
//!
//! ```text
//!            request(x != observable)
//!   Idle ─────────────────────────────────▶ Running(d)
//!    ▲                                        │  │
//!    │   end(d), no pending                   │  │ request(opposite) → pending
//!    └────────────────────────────────────────┘  │ request(target)   → pending cleared
//!                                                │
//!         end(d), pending != observable          ▼
//!                        Running(d') ◀──────── chained
//! ```
//!
//! Guarantees:
//!
//! - a running animation is never interrupted; an opposite request is only
//!   remembered as pending (last write wins)
//! - the observable state commits exactly once per cycle, to the cycle's
//!   target, and always equals the current or the previous intent
//! - signals that do not match the running direction are ignored
//!
//! The controller performs no I/O. Side effects (commit notifications,
//! animations to play, deferred commits to schedule) are queued as
//! [`Effect`]s and drained by the owner with [`take_effects`].
//!
//! [`take_effects`]: AnimationLifecycleController::take_effects

use std::fmt;
use std::sync::Arc;

use boo_animation::{AnimationNameRegistry, Direction};

use crate::domain::{BehaviorDomain, CommitPolicy};
use crate::emitter::NativeEvent;

/// Lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running(Direction),
}

impl Phase {
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Phase::Idle => None,
            Phase::Running(direction) => Some(direction),
        }
    }
}

/// Outcome of feeding one input into the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Input did not apply (unknown or stale signal, disposed controller)
    Ignored,
    /// Request matches what is already shown or running
    Redundant,
    /// Request recorded as pending behind the running animation
    Queued,
    /// A new cycle started from idle
    Started(Direction),
    /// Animation start confirmed for the running direction
    Confirmed,
    /// Observable state committed without starting or ending a cycle
    Committed,
    /// Running animation ended, controller is idle
    Settled,
    /// Running animation ended and the pending intent started a new cycle
    Chained(Direction),
}

/// Side effect requested by the controller
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<V> {
    /// The observable state changed
    Commit {
        value: V,
        event: Option<NativeEvent>,
    },
    /// The host should play this animation
    Play {
        direction: Direction,
        name: Arc<str>,
    },
    /// The host should call `flush_deferred(cycle)` on the next tick
    Defer { cycle: u64 },
}

/// An intent waiting for the running animation to end
#[derive(Clone, Debug)]
struct Pending<V> {
    value: V,
    policy: CommitPolicy,
    event: Option<NativeEvent>,
}

/// The cycle currently believed running
#[derive(Clone, Debug)]
struct Cycle<V> {
    id: u64,
    direction: Direction,
    target: V,
    confirmed: bool,
    /// Commit not yet applied (deferred policy); holds its originating event
    deferred: Option<Option<NativeEvent>>,
}

/// The animation-aware state machine shared by all behavior domains
pub struct AnimationLifecycleController<D: BehaviorDomain> {
    registry: AnimationNameRegistry,
    observable: D::Value,
    running: Option<Cycle<D::Value>>,
    pending: Option<Pending<D::Value>>,
    next_cycle: u64,
    effects: Vec<Effect<D::Value>>,
    disposed: bool,
}

impl<D: BehaviorDomain> AnimationLifecycleController<D> {
    /// Create an idle controller showing `initial` (no animation)
    pub fn new(initial: D::Value, registry: AnimationNameRegistry) -> Self {
        Self {
            registry,
            observable: initial,
            running: None,
            pending: None,
            next_cycle: 1,
            effects: Vec::new(),
            disposed: false,
        }
    }

    /// Feed a new intent
    pub fn request(
        &mut self,
        value: D::Value,
        policy: CommitPolicy,
        event: Option<NativeEvent>,
    ) -> Step {
        if self.disposed {
            return Step::Ignored;
        }

        let Some(cycle) = &self.running else {
            if D::same(value, self.observable) {
                return Step::Redundant;
            }
            return self.start_cycle(value, policy, event);
        };

        if D::same(value, cycle.target) {
            if self.pending.take().is_some() {
                tracing::debug!(
                    "{:?}: pending intent withdrawn, {} animation continues",
                    D::KIND,
                    cycle.direction
                );
            }
            return Step::Redundant;
        }

        tracing::debug!(
            "{:?}: {:?} queued behind running {} animation",
            D::KIND,
            value,
            cycle.direction
        );
        self.pending = Some(Pending {
            value,
            policy,
            event,
        });
        Step::Queued
    }

    /// Handle an `animationstart` signal
    pub fn animation_start(&mut self, name: &str) -> Step {
        if self.disposed {
            return Step::Ignored;
        }
        let Some(direction) = self.registry.classify(name) else {
            tracing::trace!("{:?}: ignoring unrelated animation start {}", D::KIND, name);
            return Step::Ignored;
        };

        let Some(cycle) = self.running.as_mut().filter(|c| c.direction == direction) else {
            tracing::trace!("{:?}: ignoring stale animation start {}", D::KIND, name);
            return Step::Ignored;
        };

        cycle.confirmed = true;
        let target = cycle.target;
        match cycle.deferred.take() {
            Some(event) => {
                self.commit(target, event);
                Step::Committed
            }
            None => Step::Confirmed,
        }
    }

    /// Handle an `animationend` signal
    pub fn animation_end(&mut self, name: &str) -> Step {
        if self.disposed {
            return Step::Ignored;
        }
        let Some(direction) = self.registry.classify(name) else {
            tracing::trace!("{:?}: ignoring unrelated animation end {}", D::KIND, name);
            return Step::Ignored;
        };

        let cycle = match self.running.take() {
            Some(cycle) if cycle.direction == direction => cycle,
            other => {
                self.running = other;
                tracing::trace!("{:?}: ignoring stale animation end {}", D::KIND, name);
                return Step::Ignored;
            }
        };

        if let Some(event) = cycle.deferred {
            self.commit(cycle.target, event);
        }

        if let Some(pending) = self.pending.take() {
            if !D::same(pending.value, self.observable) {
                tracing::debug!(
                    "{:?}: {} animation ended, chaining to {:?}",
                    D::KIND,
                    direction,
                    pending.value
                );
                return match self.start_cycle(pending.value, pending.policy, pending.event) {
                    Step::Started(next) => Step::Chained(next),
                    other => other,
                };
            }
        }

        tracing::debug!("{:?}: {} animation ended, idle", D::KIND, direction);
        Step::Settled
    }

    /// Apply the deferred commit of `cycle`, if it is still outstanding
    ///
    /// Stale cycle ids are ignored, so a tick scheduled for an earlier cycle
    /// can never commit a later one early.
    pub fn flush_deferred(&mut self, cycle: u64) -> Step {
        if self.disposed {
            return Step::Ignored;
        }
        let Some(running) = self.running.as_mut().filter(|c| c.id == cycle) else {
            return Step::Ignored;
        };
        let target = running.target;
        match running.deferred.take() {
            Some(event) => {
                self.commit(target, event);
                Step::Committed
            }
            None => Step::Ignored,
        }
    }

    /// Release all state; every later input is ignored
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.running = None;
        self.pending = None;
        self.effects.clear();
        tracing::trace!("{:?}: controller disposed", D::KIND);
    }

    /// Drain queued side effects
    pub fn take_effects(&mut self) -> Vec<Effect<D::Value>> {
        std::mem::take(&mut self.effects)
    }

    pub fn observable(&self) -> D::Value {
        self.observable
    }

    pub fn phase(&self) -> Phase {
        match &self.running {
            Some(cycle) => Phase::Running(cycle.direction),
            None => Phase::Idle,
        }
    }

    pub fn running_direction(&self) -> Option<Direction> {
        self.phase().direction()
    }

    /// Target of the running cycle
    pub fn target(&self) -> Option<D::Value> {
        self.running.as_ref().map(|c| c.target)
    }

    pub fn pending(&self) -> Option<D::Value> {
        self.pending.as_ref().map(|p| p.value)
    }

    /// Id of the running cycle
    pub fn cycle(&self) -> Option<u64> {
        self.running.as_ref().map(|c| c.id)
    }

    /// Whether the running animation's start has been observed
    pub fn is_confirmed(&self) -> bool {
        self.running.as_ref().is_some_and(|c| c.confirmed)
    }

    /// Whether the running cycle still owes its commit
    pub fn has_deferred_commit(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|c| c.deferred.is_some())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn registry(&self) -> &AnimationNameRegistry {
        &self.registry
    }

    fn start_cycle(
        &mut self,
        target: D::Value,
        policy: CommitPolicy,
        event: Option<NativeEvent>,
    ) -> Step {
        let target = D::rebase(target, self.observable);
        let direction = D::direction(target);
        let Some(name) = self.registry.primary(direction).cloned() else {
            // Nothing to animate: settle right away
            tracing::debug!(
                "{:?}: no {} animation registered, committing {:?} without animation",
                D::KIND,
                direction,
                target
            );
            self.commit(target, event);
            return Step::Committed;
        };

        let id = self.next_cycle;
        self.next_cycle += 1;

        let deferred = match policy {
            CommitPolicy::Immediate => {
                self.commit(target, event);
                None
            }
            CommitPolicy::Deferred => {
                self.effects.push(Effect::Defer { cycle: id });
                Some(event)
            }
        };

        tracing::debug!(
            "{:?}: cycle {} starts {} animation {} towards {:?}",
            D::KIND,
            id,
            direction,
            name,
            target
        );

        self.running = Some(Cycle {
            id,
            direction,
            target,
            confirmed: false,
            deferred,
        });
        self.effects.push(Effect::Play { direction, name });
        Step::Started(direction)
    }

    fn commit(&mut self, value: D::Value, event: Option<NativeEvent>) {
        self.observable = value;
        self.effects.push(Effect::Commit { value, event });
    }
}

impl<D: BehaviorDomain> fmt::Debug for AnimationLifecycleController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationLifecycleController")
            .field("domain", &D::KIND)
            .field("observable", &self.observable)
            .field("phase", &self.phase())
            .field("pending", &self.pending())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BehaviorConfig;
    use crate::domains::{Active, Disabled, Validation, Validity};

    const DISABLING: &str = "boo-test-disabling";
    const ENABLING: &str = "boo-test-enabling";

    fn disabled(initial: bool) -> AnimationLifecycleController<Disabled> {
        let config = BehaviorConfig::<Disabled>::with_prefix("boo-test").unwrap();
        AnimationLifecycleController::new(initial, config.registry)
    }

    fn plays<V>(effects: &[Effect<V>]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Play { name, .. } => Some(name.to_string()),
                _ => None,
            })
            .collect()
    }

    fn commits<V: Copy>(effects: &[Effect<V>]) -> Vec<V> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Commit { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_request_starts_cycle_and_commits() {
        let mut fsm = disabled(false);

        let step = fsm.request(true, CommitPolicy::Immediate, None);
        assert_eq!(step, Step::Started(Direction::Forward));
        assert_eq!(fsm.phase(), Phase::Running(Direction::Forward));
        assert!(fsm.observable());

        let effects = fsm.take_effects();
        assert_eq!(commits(&effects), vec![true]);
        assert_eq!(plays(&effects), vec![DISABLING]);
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_idle_same_value_is_redundant() {
        let mut fsm = disabled(false);
        assert_eq!(
            fsm.request(false, CommitPolicy::Immediate, None),
            Step::Redundant
        );
        assert!(fsm.phase().is_idle());
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_opposite_request_is_queued_not_interrupting() {
        let mut fsm = disabled(false);
        fsm.request(true, CommitPolicy::Immediate, None);
        fsm.take_effects();

        assert_eq!(
            fsm.request(false, CommitPolicy::Immediate, None),
            Step::Queued
        );
        assert_eq!(fsm.running_direction(), Some(Direction::Forward));
        assert_eq!(fsm.pending(), Some(false));
        assert!(fsm.observable());
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_request_matching_target_withdraws_pending() {
        let mut fsm = disabled(false);
        fsm.request(true, CommitPolicy::Immediate, None);
        fsm.request(false, CommitPolicy::Immediate, None);

        assert_eq!(
            fsm.request(true, CommitPolicy::Immediate, None),
            Step::Redundant
        );
        assert_eq!(fsm.pending(), None);

        fsm.take_effects();
        assert_eq!(fsm.animation_end(DISABLING), Step::Settled);
        assert!(fsm.phase().is_idle());
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_end_with_pending_chains() {
        let mut fsm = disabled(false);
        fsm.request(true, CommitPolicy::Immediate, None);
        fsm.request(false, CommitPolicy::Immediate, Some(NativeEvent::click()));
        fsm.take_effects();

        let step = fsm.animation_end(DISABLING);
        assert_eq!(step, Step::Chained(Direction::Reverse));
        assert!(!fsm.observable());

        let effects = fsm.take_effects();
        assert_eq!(
            effects,
            vec![
                Effect::Commit {
                    value: false,
                    event: Some(NativeEvent::click()),
                },
                Effect::Play {
                    direction: Direction::Reverse,
                    name: Arc::from(ENABLING),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_and_stale_signals_are_ignored() {
        let mut fsm = disabled(false);
        assert_eq!(fsm.animation_end(DISABLING), Step::Ignored);

        fsm.request(true, CommitPolicy::Immediate, None);
        assert_eq!(fsm.animation_end("ripple"), Step::Ignored);
        assert_eq!(fsm.animation_end(ENABLING), Step::Ignored);
        assert_eq!(fsm.animation_start(ENABLING), Step::Ignored);
        assert_eq!(fsm.running_direction(), Some(Direction::Forward));

        assert_eq!(fsm.animation_start(DISABLING), Step::Confirmed);
        assert!(fsm.is_confirmed());
    }

    #[test]
    fn test_deferred_commit_waits_for_tick() {
        let config = BehaviorConfig::<Active>::with_prefix("boo-test").unwrap();
        let mut fsm = AnimationLifecycleController::<Active>::new(false, config.registry);

        assert_eq!(
            fsm.request(true, CommitPolicy::Deferred, None),
            Step::Started(Direction::Forward)
        );
        assert!(!fsm.observable());
        assert!(fsm.has_deferred_commit());

        let effects = fsm.take_effects();
        assert!(commits(&effects).is_empty());
        let cycle = fsm.cycle().unwrap();
        assert!(effects.contains(&Effect::Defer { cycle }));

        // Stale ticks do nothing
        assert_eq!(fsm.flush_deferred(cycle + 7), Step::Ignored);
        assert!(!fsm.observable());

        assert_eq!(fsm.flush_deferred(cycle), Step::Committed);
        assert!(fsm.observable());
        assert_eq!(commits(&fsm.take_effects()), vec![true]);

        // Committed once only
        assert_eq!(fsm.flush_deferred(cycle), Step::Ignored);
        assert_eq!(fsm.animation_start("boo-test-activate"), Step::Confirmed);
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_deferred_commit_on_start_confirmation() {
        let config = BehaviorConfig::<Active>::with_prefix("boo-test").unwrap();
        let mut fsm = AnimationLifecycleController::<Active>::new(false, config.registry);
        fsm.request(true, CommitPolicy::Deferred, None);
        let cycle = fsm.cycle().unwrap();
        fsm.take_effects();

        assert_eq!(fsm.animation_start("boo-test-activate"), Step::Committed);
        assert!(fsm.observable());
        assert_eq!(fsm.flush_deferred(cycle), Step::Ignored);
        assert_eq!(commits(&fsm.take_effects()), vec![true]);
    }

    #[test]
    fn test_deferred_commit_flushed_by_end() {
        let config = BehaviorConfig::<Active>::with_prefix("boo-test").unwrap();
        let mut fsm = AnimationLifecycleController::<Active>::new(false, config.registry);
        fsm.request(true, CommitPolicy::Deferred, None);
        fsm.take_effects();

        assert_eq!(fsm.animation_end("boo-test-activate"), Step::Settled);
        assert!(fsm.observable());
        assert_eq!(commits(&fsm.take_effects()), vec![true]);
    }

    #[test]
    fn test_disposed_controller_ignores_everything() {
        let mut fsm = disabled(false);
        fsm.request(true, CommitPolicy::Immediate, None);
        fsm.dispose();

        assert!(fsm.is_disposed());
        assert!(fsm.phase().is_idle());
        assert!(fsm.take_effects().is_empty());
        assert_eq!(fsm.animation_end(DISABLING), Step::Ignored);
        assert_eq!(
            fsm.request(false, CommitPolicy::Immediate, None),
            Step::Ignored
        );
        assert!(fsm.take_effects().is_empty());
    }

    #[test]
    fn test_validity_neutral_cycle_keeps_side() {
        let config = BehaviorConfig::<Validation>::with_prefix("boo-test").unwrap();
        let mut fsm =
            AnimationLifecycleController::<Validation>::new(Validity::Valid, config.registry);

        assert_eq!(
            fsm.request(
                Validity::UnvalidatedFromValid,
                CommitPolicy::Immediate,
                None
            ),
            Step::Started(Direction::Neutral)
        );
        assert_eq!(fsm.observable(), Validity::UnvalidatedFromValid);

        // The other unvalidated side is the same target
        assert_eq!(
            fsm.request(
                Validity::UnvalidatedFromInvalid,
                CommitPolicy::Immediate,
                None
            ),
            Step::Redundant
        );
        assert_eq!(fsm.animation_end("boo-test-unvalidating"), Step::Settled);
        assert_eq!(fsm.observable(), Validity::UnvalidatedFromValid);
    }

    #[test]
    fn test_chained_clear_takes_side_of_observable() {
        let config = BehaviorConfig::<Validation>::with_prefix("boo-test").unwrap();
        let mut fsm =
            AnimationLifecycleController::<Validation>::new(Validity::Invalid, config.registry);

        fsm.request(Validity::Valid, CommitPolicy::Immediate, None);
        // Resolved after an invalid intent, but valid is what is shown
        assert_eq!(
            fsm.request(
                Validity::UnvalidatedFromInvalid,
                CommitPolicy::Immediate,
                None
            ),
            Step::Queued
        );
        fsm.take_effects();

        assert_eq!(
            fsm.animation_end("boo-test-validating"),
            Step::Chained(Direction::Neutral)
        );
        assert_eq!(fsm.observable(), Validity::UnvalidatedFromValid);
        assert_eq!(
            commits(&fsm.take_effects()),
            vec![Validity::UnvalidatedFromValid]
        );
    }

    #[test]
    fn test_missing_neutral_name_commits_without_animation() {
        let registry = AnimationNameRegistry::builder()
            .forward("v")
            .reverse("i")
            .build()
            .unwrap();
        let mut fsm = AnimationLifecycleController::<Validation>::new(Validity::Invalid, registry);

        assert_eq!(
            fsm.request(
                Validity::UnvalidatedFromInvalid,
                CommitPolicy::Immediate,
                None
            ),
            Step::Committed
        );
        assert!(fsm.phase().is_idle());
        assert_eq!(fsm.observable(), Validity::UnvalidatedFromInvalid);
    }
}
