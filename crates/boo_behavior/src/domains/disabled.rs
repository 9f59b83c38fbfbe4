//! Disabled state
//!
//! A control is disabled when it is disabled itself or when an enclosing
//! container (a fieldset, a disabled form section) is. The observable state
//! commits as soon as a transition starts.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::BehaviorDomain;
use crate::hook::BehaviorState;
use crate::intent::{inherit_or, Resolution};

use super::binary_direction;

/// Disabled domain (`boo-disabling` / `boo-enabling`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disabled;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisabledProps {
    pub disabled: bool,
    /// Inherited from the enclosing container
    pub parent: Option<bool>,
}

impl DisabledProps {
    pub fn new(disabled: bool) -> Self {
        Self {
            disabled,
            parent: None,
        }
    }

    pub fn parent(mut self, parent: bool) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl BehaviorDomain for Disabled {
    type Value = bool;
    type Props = DisabledProps;

    const KIND: BehaviorKind = BehaviorKind::Disabled;
    const SEED: bool = false;

    fn resolve(props: &DisabledProps, _previous: bool) -> Resolution<bool> {
        Resolution::controlled(inherit_or(props.disabled, props.parent))
    }

    fn direction(target: bool) -> Direction {
        binary_direction(target)
    }

    fn state_tag(value: bool) -> &'static str {
        if value {
            "disabled"
        } else {
            "enabled"
        }
    }
}

pub type DisabledState = BehaviorState<Disabled>;
