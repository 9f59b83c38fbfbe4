//! Active state
//!
//! Commits one tick after the intent changes. A click that toggles the
//! active prop and the click's own handlers run in the same synchronous
//! turn; deferring the commit lets that turn finish before the state (and
//! its change notification) flips, which avoids a visible flicker when the
//! two race.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::{BehaviorDomain, CommitPolicy};
use crate::hook::BehaviorState;
use crate::intent::{IntentSource, Resolution};

use super::binary_direction;

/// Active domain (`boo-activate` / `boo-deactivate`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Active;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveProps {
    pub active: bool,
}

impl ActiveProps {
    pub fn new(active: bool) -> Self {
        Self { active }
    }
}

impl BehaviorDomain for Active {
    type Value = bool;
    type Props = ActiveProps;

    const KIND: BehaviorKind = BehaviorKind::Active;
    const SEED: bool = false;

    fn resolve(props: &ActiveProps, _previous: bool) -> Resolution<bool> {
        Resolution::controlled(props.active)
    }

    fn direction(target: bool) -> Direction {
        binary_direction(target)
    }

    fn state_tag(value: bool) -> &'static str {
        if value {
            "active"
        } else {
            "inactive"
        }
    }

    fn commit_policy(_source: IntentSource) -> CommitPolicy {
        CommitPolicy::Deferred
    }
}

pub type ActiveState = BehaviorState<Active>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Step;
    use crate::domain::BehaviorConfig;
    use crate::emitter::NativeEvent;
    use crate::task::MicrotaskQueue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mount(queue: &MicrotaskQueue, active: bool) -> ActiveState {
        let config = BehaviorConfig::with_prefix("boo-test").unwrap();
        ActiveState::mount(ActiveProps::new(active), config, queue)
    }

    #[test]
    fn test_click_commit_waits_one_tick() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, false);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.on_change(move |value, event| {
            sink.borrow_mut()
                .push((value, event.map(|e| e.kind().to_string())));
        });

        let snapshot = state.render_with_event(ActiveProps::new(true), NativeEvent::click());
        assert_eq!(snapshot.state_tag, "inactive");
        assert!(snapshot.intent);
        assert!(log.borrow().is_empty());

        queue.flush();
        assert_eq!(state.data_state(), "active");
        assert_eq!(*log.borrow(), vec![(true, Some("click".to_string()))]);
    }

    #[test]
    fn test_toggle_back_within_tick_is_queued() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, false);

        state.render(ActiveProps::new(true));
        // Same synchronous turn: the activate cycle already owns the element
        assert_eq!(state.apply(ActiveProps::new(false), None), Step::Queued);

        queue.flush();
        assert_eq!(state.data_state(), "active");

        assert_eq!(
            state.on_animation_end("boo-test-activate"),
            Step::Chained(Direction::Reverse)
        );
        // The chained deactivate cycle defers again
        assert_eq!(state.data_state(), "active");
        queue.flush();
        assert_eq!(state.data_state(), "inactive");
    }

    #[test]
    fn test_start_confirmation_commits_before_tick() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, true);

        state.render(ActiveProps::new(false));
        let requests = state.take_animation_requests();
        assert_eq!(&*requests[0], "boo-test-deactivate");

        assert_eq!(
            state.on_animation_start("boo-test-deactivate"),
            Step::Committed
        );
        assert_eq!(state.data_state(), "inactive");
        queue.flush();
        assert_eq!(state.data_state(), "inactive");
    }
}
