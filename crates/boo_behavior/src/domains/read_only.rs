//! Read-only state
//!
//! Like disabled, the effective flag is the control's own flag or'd with the
//! enclosing container's. Becoming read-only "freezes" the control, going
//! back "thaws" it.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::BehaviorDomain;
use crate::hook::BehaviorState;
use crate::intent::{inherit_or, Resolution};

use super::binary_direction;

/// Read-only domain (`boo-freeze` / `boo-thaw`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadOnly;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadOnlyProps {
    pub read_only: bool,
    /// Inherited from the enclosing container
    pub parent: Option<bool>,
}

impl ReadOnlyProps {
    pub fn new(read_only: bool) -> Self {
        Self {
            read_only,
            parent: None,
        }
    }

    pub fn parent(mut self, parent: bool) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl BehaviorDomain for ReadOnly {
    type Value = bool;
    type Props = ReadOnlyProps;

    const KIND: BehaviorKind = BehaviorKind::ReadOnly;
    const SEED: bool = false;

    fn resolve(props: &ReadOnlyProps, _previous: bool) -> Resolution<bool> {
        Resolution::controlled(inherit_or(props.read_only, props.parent))
    }

    fn direction(target: bool) -> Direction {
        binary_direction(target)
    }

    fn state_tag(value: bool) -> &'static str {
        if value {
            "read-only"
        } else {
            "editable"
        }
    }
}

pub type ReadOnlyState = BehaviorState<ReadOnly>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Step;
    use crate::domain::BehaviorConfig;
    use crate::task::MicrotaskQueue;

    #[test]
    fn test_freeze_then_thaw_chain() {
        let queue = MicrotaskQueue::new();
        let config = BehaviorConfig::with_prefix("boo-test").unwrap();
        let state = ReadOnlyState::mount(ReadOnlyProps::new(false), config, &queue);

        let snapshot = state.render(ReadOnlyProps::new(true));
        assert_eq!(snapshot.state_tag, "read-only");
        let requests = state.take_animation_requests();
        assert_eq!(&*requests[0], "boo-test-freeze");

        // Parent is released, own flag drops: queued behind the freeze
        state.render(ReadOnlyProps::new(false).parent(false));
        assert_eq!(state.data_state(), "read-only");

        assert_eq!(
            state.on_animation_end("boo-test-freeze"),
            Step::Chained(Direction::Reverse)
        );
        assert_eq!(state.data_state(), "editable");
        let requests = state.take_animation_requests();
        assert_eq!(&*requests[0], "boo-test-thaw");
    }

    #[test]
    fn test_unrelated_animation_is_ignored() {
        let queue = MicrotaskQueue::new();
        let config = BehaviorConfig::with_prefix("boo-test").unwrap();
        let state = ReadOnlyState::mount(ReadOnlyProps::new(false), config, &queue);

        state.render(ReadOnlyProps::new(true));
        assert_eq!(state.on_animation_end("boo-test-disabling"), Step::Ignored);
        assert_eq!(state.running_direction(), Some(Direction::Forward));
    }
}
