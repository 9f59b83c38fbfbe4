//! Press state
//!
//! Press is either controlled (`pressed: true/false`) or follows the
//! pointer (`pressed: auto`), which the host computes and passes
//! as `computed`. Controlled changes commit immediately; auto changes commit
//! one tick later, on the host's own update schedule.
//!
//! An auto intent with no computed value yet resolves to released.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::{BehaviorDomain, CommitPolicy};
use crate::hook::BehaviorState;
use crate::intent::{Intent, IntentSource, Resolution};

use super::binary_direction;

/// Press domain (`boo-pressing` / `boo-releasing`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Press;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressProps {
    pub pressed: Intent<bool>,
    /// Externally computed press, used in auto mode
    pub computed: Option<bool>,
}

impl PressProps {
    /// Controlled press
    pub fn new(pressed: bool) -> Self {
        Self {
            pressed: Intent::Value(pressed),
            computed: None,
        }
    }

    /// Follow the computed press
    pub fn auto(computed: Option<bool>) -> Self {
        Self {
            pressed: Intent::Auto,
            computed,
        }
    }
}

impl BehaviorDomain for Press {
    type Value = bool;
    type Props = PressProps;

    const KIND: BehaviorKind = BehaviorKind::Press;
    const SEED: bool = false;

    fn resolve(props: &PressProps, _previous: bool) -> Resolution<bool> {
        match props.pressed {
            Intent::Value(pressed) => Resolution::controlled(pressed),
            Intent::Auto => Resolution::auto(props.computed.unwrap_or_else(|| {
                tracing::debug!("Press: auto intent without computed press, assuming released");
                false
            })),
        }
    }

    fn direction(target: bool) -> Direction {
        binary_direction(target)
    }

    fn state_tag(value: bool) -> &'static str {
        if value {
            "pressed"
        } else {
            "released"
        }
    }

    fn commit_policy(source: IntentSource) -> CommitPolicy {
        match source {
            IntentSource::Controlled => CommitPolicy::Immediate,
            IntentSource::Auto => CommitPolicy::Deferred,
        }
    }
}

pub type PressState = BehaviorState<Press>;
