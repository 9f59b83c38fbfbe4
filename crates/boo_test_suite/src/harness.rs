//! Test harness for timed behavior scenarios
//!
//! Provides a [`Stage`]: one mounted behavior state attached to a simulated
//! element. The element plays every animation the state asks for on an
//! [`AnimationTimeline`] and feeds the resulting `animationstart` /
//! `animationend` signals back, while the stage's clock drives both.
//!
//! Event-loop model:
//!
//! - `render` runs synchronously; deferred commits stay queued
//! - `advance(ms)` first flushes the microtask queue, then delivers due
//!   signals one at a time in firing order, flushing microtasks after each

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use boo_animation::{AnimationSignal, AnimationTimeline, DurationTable, SignalKind};
use boo_behavior::{
    BehaviorConfig, BehaviorDomain, BehaviorState, Direction, MicrotaskQueue, NativeEvent,
    Snapshot,
};

/// Prefix of the keyframe names used by every scenario
pub const TEST_PREFIX: &str = "boo-test";

/// Result of a scenario
#[derive(Debug)]
pub enum TestResult {
    /// Scenario passed
    Passed,
    /// Scenario returned an error or panicked
    Failed { reason: String },
}

impl TestResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestResult::Passed)
    }
}

/// A recorded change notification
#[derive(Clone, Debug, PartialEq)]
pub struct Change<V> {
    pub value: V,
    /// Type of the originating native event, `None` for prop-driven changes
    pub event: Option<String>,
    /// Stage time of the notification
    pub at: u64,
}

/// A behavior state mounted on a simulated element
pub struct Stage<D: BehaviorDomain> {
    state: BehaviorState<D>,
    queue: MicrotaskQueue,
    timeline: AnimationTimeline,
    clock: Rc<Cell<u64>>,
    changes: Rc<RefCell<Vec<Change<D::Value>>>>,
    signals: Vec<AnimationSignal>,
}

impl<D: BehaviorDomain> Stage<D> {
    /// Mount with the test keyframe names, every animation lasting 1000ms
    pub fn mount(props: D::Props) -> Result<Self> {
        Self::mount_with(props, DurationTable::default())
    }

    pub fn mount_with(props: D::Props, durations: DurationTable) -> Result<Self> {
        let config = BehaviorConfig::<D>::with_prefix(TEST_PREFIX)
            .with_context(|| format!("building {:?} config", D::KIND))?;
        Ok(Self::mount_with_config(props, config, durations))
    }

    pub fn mount_with_config(
        props: D::Props,
        config: BehaviorConfig<D>,
        durations: DurationTable,
    ) -> Self {
        let queue = MicrotaskQueue::new();
        let state = BehaviorState::mount(props, config, &queue);
        let clock = Rc::new(Cell::new(0));
        let changes = Rc::new(RefCell::new(Vec::new()));

        let sink = changes.clone();
        let now = clock.clone();
        state.on_change(move |value, event: Option<&NativeEvent>| {
            sink.borrow_mut().push(Change {
                value,
                event: event.map(|e| e.kind().to_string()),
                at: now.get(),
            });
        });

        Self {
            state,
            queue,
            timeline: AnimationTimeline::new(durations),
            clock,
            changes,
            signals: Vec::new(),
        }
    }

    /// Render new props (prop-driven)
    pub fn render(&mut self, props: D::Props) -> Snapshot<D::Value> {
        let snapshot = self.state.render(props);
        self.play_requested();
        snapshot
    }

    /// Render new props from inside an interaction handler
    pub fn render_with_event(
        &mut self,
        props: D::Props,
        event: NativeEvent,
    ) -> Snapshot<D::Value> {
        let snapshot = self.state.render_with_event(props, event);
        self.play_requested();
        snapshot
    }

    /// Let `ms` milliseconds pass
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.get() + ms;
        self.flush();

        while let Some(due) = self.timeline.next_due().filter(|t| *t <= target) {
            self.clock.set(due);
            for signal in self.timeline.advance_to(due) {
                match signal.kind {
                    SignalKind::Start => self.state.on_animation_start(&signal.name),
                    SignalKind::End => self.state.on_animation_end(&signal.name),
                };
                self.signals.push(signal);
                self.flush();
            }
        }

        self.timeline.advance_to(target);
        self.clock.set(target);
    }

    /// Run the microtask checkpoint and start requested animations
    pub fn flush(&mut self) {
        self.queue.flush();
        self.play_requested();
    }

    /// Deliver an arbitrary signal, as an unrelated stylesheet would
    pub fn dispatch_end(&mut self, name: &str) {
        self.state.on_animation_end(name);
        self.flush();
    }

    /// Tear down mid-flight: the element stops reporting and the state is dropped
    pub fn unmount(mut self) -> Vec<Change<D::Value>> {
        self.state.dispose();
        self.timeline.cancel_all();
        self.queue.flush();
        self.changes()
    }

    pub fn now(&self) -> u64 {
        self.clock.get()
    }

    pub fn snapshot(&self) -> Snapshot<D::Value> {
        self.state.snapshot()
    }

    pub fn data_state(&self) -> &'static str {
        self.state.data_state()
    }

    /// Direction the state believes is running
    pub fn running(&self) -> Option<Direction> {
        self.state.running_direction()
    }

    /// Names of the animations physically playing on the element
    pub fn running_animations(&self) -> Vec<String> {
        self.timeline
            .running()
            .into_iter()
            .map(|r| r.name.to_string())
            .collect()
    }

    /// Remaining time of the first playing animation
    pub fn remaining(&self) -> Option<u64> {
        self.timeline.running().first().map(|r| r.remaining_ms)
    }

    pub fn changes(&self) -> Vec<Change<D::Value>> {
        self.changes.borrow().clone()
    }

    /// Every signal delivered so far
    pub fn signals(&self) -> &[AnimationSignal] {
        &self.signals
    }

    pub fn state(&self) -> &BehaviorState<D> {
        &self.state
    }

    fn play_requested(&mut self) {
        for name in self.state.take_animation_requests() {
            self.timeline.play(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boo_behavior::{Disabled, DisabledProps};

    #[test]
    fn test_stage_plays_requested_animation() {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false)).unwrap();
        stage.render(DisabledProps::new(true));

        assert_eq!(stage.running_animations(), vec!["boo-test-disabling"]);
        stage.advance(1000);
        assert!(stage.running_animations().is_empty());
        assert_eq!(stage.running(), None);
        assert_eq!(stage.now(), 1000);

        let kinds: Vec<_> = stage.signals().iter().map(|s| (s.kind, s.at)).collect();
        assert_eq!(kinds, vec![(SignalKind::Start, 0), (SignalKind::End, 1000)]);
    }

    #[test]
    fn test_change_timestamps() {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false)).unwrap();
        stage.advance(250);
        stage.render(DisabledProps::new(true));

        assert_eq!(
            stage.changes(),
            vec![Change {
                value: true,
                event: None,
                at: 250,
            }]
        );
    }
}
