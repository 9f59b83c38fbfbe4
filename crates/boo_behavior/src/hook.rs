//! Behavior state hook
//!
//! [`BehaviorState`] binds one lifecycle controller to a component instance:
//! it resolves props into intents, routes the element's animation signals,
//! schedules deferred commits on the shared [`MicrotaskQueue`] and reports
//! committed transitions through the change listener.
//!
//! # Example
//!
//! ```rust
//! use boo_behavior::prelude::*;
//!
//! let queue = MicrotaskQueue::new();
//! let config = BehaviorConfig::<Disabled>::with_prefix("boo-test").unwrap();
//! let state = DisabledState::mount(DisabledProps::new(false), config, &queue);
//! assert_eq!(state.data_state(), "enabled");
//!
//! // Disabled commits immediately and asks the host to play the keyframes
//! let snapshot = state.render(DisabledProps::new(true));
//! assert_eq!(snapshot.state_tag, "disabled");
//! let requested = state.take_animation_requests();
//! assert_eq!(&*requested[0], "boo-test-disabling");
//!
//! // The element reports the animation lifecycle back
//! state.on_animation_start("boo-test-disabling");
//! state.on_animation_end("boo-test-disabling");
//! assert!(state.snapshot().running.is_none());
//! ```
//!
//! # Teardown
//!
//! Dropping the state (or calling [`BehaviorState::dispose`]) releases the
//! controller and closes the change listener. Deferred commits still sitting
//! in the queue only hold a weak reference and become no-ops.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use boo_animation::Direction;

use crate::controller::{AnimationLifecycleController, Effect, Phase, Step};
use crate::domain::{BehaviorConfig, BehaviorDomain};
use crate::emitter::{ChangeEmitter, NativeEvent};
use crate::intent::IntentTracker;
use crate::task::MicrotaskQueue;

/// Point-in-time view of a behavior state
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<V> {
    /// The externally visible value
    pub observable: V,
    /// `data-state` tag of the observable value
    pub state_tag: &'static str,
    /// Direction of the animation believed running
    pub running: Option<Direction>,
    /// Intent waiting behind the running animation
    pub pending: Option<V>,
    /// Latest resolved intent
    pub intent: V,
}

impl<V> Snapshot<V> {
    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }
}

struct HookInner<D: BehaviorDomain> {
    config: BehaviorConfig<D>,
    tracker: IntentTracker<D>,
    controller: AnimationLifecycleController<D>,
    /// Animations the host has been asked to play but not yet picked up
    requests: Vec<Arc<str>>,
}

struct Shared<D: BehaviorDomain> {
    inner: RefCell<HookInner<D>>,
    emitter: ChangeEmitter<D::Value>,
    queue: MicrotaskQueue,
}

/// A mounted behavior state
pub struct BehaviorState<D: BehaviorDomain> {
    shared: Rc<Shared<D>>,
}

impl<D: BehaviorDomain> BehaviorState<D> {
    /// Mount with the first props; the initial intent is shown without animation
    pub fn mount(props: D::Props, config: BehaviorConfig<D>, queue: &MicrotaskQueue) -> Self {
        let tracker = IntentTracker::<D>::mount(&props);
        let controller = AnimationLifecycleController::new(tracker.current(), config.registry.clone());

        tracing::trace!("{:?}: mounted as {:?}", D::KIND, tracker.current());

        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(HookInner {
                    config,
                    tracker,
                    controller,
                    requests: Vec::new(),
                }),
                emitter: ChangeEmitter::new(),
                queue: queue.clone(),
            }),
        }
    }

    /// Render with new props (prop-driven change, no native event)
    pub fn render(&self, props: D::Props) -> Snapshot<D::Value> {
        self.apply(props, None);
        self.snapshot()
    }

    /// Render with new props requested from an interaction handler
    pub fn render_with_event(&self, props: D::Props, event: NativeEvent) -> Snapshot<D::Value> {
        self.apply(props, Some(event));
        self.snapshot()
    }

    /// Apply new props and report what the controller did
    pub fn apply(&self, props: D::Props, event: Option<NativeEvent>) -> Step {
        drive(&self.shared, |inner| {
            if inner.controller.is_disposed() {
                return Step::Ignored;
            }
            let resolution = inner.tracker.resolve(&props);
            if !inner.tracker.observe(resolution) {
                return Step::Redundant;
            }
            let policy = inner.config.policy_for(resolution.source);
            inner.controller.request(resolution.value, policy, event)
        })
    }

    /// `animationstart` handler for the element
    pub fn on_animation_start(&self, name: &str) -> Step {
        drive(&self.shared, |inner| inner.controller.animation_start(name))
    }

    /// `animationend` handler for the element
    pub fn on_animation_end(&self, name: &str) -> Step {
        drive(&self.shared, |inner| inner.controller.animation_end(name))
    }

    /// Install the change listener, called once per committed transition
    pub fn on_change<F>(&self, listener: F)
    where
        F: FnMut(D::Value, Option<&NativeEvent>) + 'static,
    {
        self.shared.emitter.set_listener(listener);
    }

    /// Animations the element should start playing, oldest first
    pub fn take_animation_requests(&self) -> Vec<Arc<str>> {
        std::mem::take(&mut self.shared.inner.borrow_mut().requests)
    }

    pub fn snapshot(&self) -> Snapshot<D::Value> {
        let inner = self.shared.inner.borrow();
        let observable = inner.controller.observable();
        Snapshot {
            observable,
            state_tag: D::state_tag(observable),
            running: inner.controller.running_direction(),
            pending: inner.controller.pending(),
            intent: inner.tracker.current(),
        }
    }

    pub fn observable(&self) -> D::Value {
        self.shared.inner.borrow().controller.observable()
    }

    /// `data-state` attribute value
    pub fn data_state(&self) -> &'static str {
        D::state_tag(self.observable())
    }

    pub fn phase(&self) -> Phase {
        self.shared.inner.borrow().controller.phase()
    }

    pub fn running_direction(&self) -> Option<Direction> {
        self.phase().direction()
    }

    /// Release the controller and silence the listener
    pub fn dispose(&self) {
        if let Ok(mut inner) = self.shared.inner.try_borrow_mut() {
            inner.controller.dispose();
            inner.requests.clear();
        }
        self.shared.emitter.close();
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.emitter.is_closed()
    }
}

impl<D: BehaviorDomain> Drop for BehaviorState<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<D: BehaviorDomain> fmt::Debug for BehaviorState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorState")
            .field("domain", &D::KIND)
            .field("snapshot", &self.snapshot())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Run one controller input and carry out the effects it produced
///
/// The inner borrow is released before listeners run, so a listener may
/// render the same state again.
fn drive<D, F>(shared: &Rc<Shared<D>>, f: F) -> Step
where
    D: BehaviorDomain,
    F: FnOnce(&mut HookInner<D>) -> Step,
{
    let mut commits = Vec::new();
    let step = {
        let mut inner = shared.inner.borrow_mut();
        let step = f(&mut inner);
        for effect in inner.controller.take_effects() {
            match effect {
                Effect::Commit { value, event } => commits.push((value, event)),
                Effect::Play { name, .. } => inner.requests.push(name),
                Effect::Defer { cycle } => schedule_commit(shared, cycle),
            }
        }
        step
    };

    for (value, event) in commits {
        shared.emitter.emit(value, event);
    }
    step
}

fn schedule_commit<D: BehaviorDomain>(shared: &Rc<Shared<D>>, cycle: u64) {
    let weak: Weak<Shared<D>> = Rc::downgrade(shared);
    shared.queue.schedule(move || {
        if let Some(shared) = weak.upgrade() {
            drive(&shared, |inner| inner.controller.flush_deferred(cycle));
        }
    });
}
