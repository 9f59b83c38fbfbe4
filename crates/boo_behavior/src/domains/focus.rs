//! Focus state
//!
//! Focus is either controlled (`focused: true/false`) or follows the
//! element's real focus (`focused: auto`), which the host computes and passes
//! as `computed`. Controlled changes commit immediately; auto changes commit
//! one tick later, on the host's own update schedule.
//!
//! An auto intent with no computed value yet resolves to blurred.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::{BehaviorDomain, CommitPolicy};
use crate::hook::BehaviorState;
use crate::intent::{Intent, IntentSource, Resolution};

use super::binary_direction;

/// Focus domain (`boo-focusing` / `boo-blurring`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Focus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusProps {
    pub focused: Intent<bool>,
    /// Externally computed focus, used in auto mode
    pub computed: Option<bool>,
}

impl FocusProps {
    /// Controlled focus
    pub fn new(focused: bool) -> Self {
        Self {
            focused: Intent::Value(focused),
            computed: None,
        }
    }

    /// Follow the computed focus
    pub fn auto(computed: Option<bool>) -> Self {
        Self {
            focused: Intent::Auto,
            computed,
        }
    }
}

impl BehaviorDomain for Focus {
    type Value = bool;
    type Props = FocusProps;

    const KIND: BehaviorKind = BehaviorKind::Focus;
    const SEED: bool = false;

    fn resolve(props: &FocusProps, _previous: bool) -> Resolution<bool> {
        match props.focused {
            Intent::Value(focused) => Resolution::controlled(focused),
            Intent::Auto => Resolution::auto(props.computed.unwrap_or_else(|| {
                tracing::debug!("Focus: auto intent without computed focus, assuming blurred");
                false
            })),
        }
    }

    fn direction(target: bool) -> Direction {
        binary_direction(target)
    }

    fn state_tag(value: bool) -> &'static str {
        if value {
            "focused"
        } else {
            "blurred"
        }
    }

    fn commit_policy(source: IntentSource) -> CommitPolicy {
        match source {
            IntentSource::Controlled => CommitPolicy::Immediate,
            IntentSource::Auto => CommitPolicy::Deferred,
        }
    }
}

pub type FocusState = BehaviorState<Focus>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BehaviorConfig;
    use crate::emitter::NativeEvent;
    use crate::task::MicrotaskQueue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mount(queue: &MicrotaskQueue, props: FocusProps) -> FocusState {
        let config = BehaviorConfig::with_prefix("boo-test").unwrap();
        FocusState::mount(props, config, queue)
    }

    #[test]
    fn test_auto_follows_computed_after_tick() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, FocusProps::auto(Some(false)));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.on_change(move |value, event: Option<&NativeEvent>| {
            sink.borrow_mut().push((value, event.is_none()));
        });

        assert_eq!(state.data_state(), "blurred");

        let snapshot = state.render(FocusProps::auto(Some(true)));
        assert_eq!(snapshot.state_tag, "blurred");
        assert_eq!(snapshot.running, Some(Direction::Forward));

        queue.flush();
        assert_eq!(state.data_state(), "focused");
        assert_eq!(*log.borrow(), vec![(true, true)]);
    }

    #[test]
    fn test_controlled_commits_immediately() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, FocusProps::new(false));

        let snapshot = state.render(FocusProps::new(true));
        assert_eq!(snapshot.state_tag, "focused");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_auto_without_computed_is_blurred() {
        let queue = MicrotaskQueue::new();
        let state = mount(&queue, FocusProps::auto(None));
        assert_eq!(state.data_state(), "blurred");

        // Switching from a focused controlled value to an unresolved auto blurs
        let state = mount(&queue, FocusProps::new(true));
        state.render(FocusProps::auto(None));
        queue.flush();
        assert_eq!(state.data_state(), "blurred");
    }
}
