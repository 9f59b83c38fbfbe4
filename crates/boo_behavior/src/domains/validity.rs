//! Validity state
//!
//! Tri-state: valid, invalid, or not validated yet. Clearing the validation
//! remembers which side it came from so the unvalidating animation can be
//! styled accordingly (fading out of green vs. out of red). Styling code that
//! works with numbers uses the signed encoding `+1 / -1 / +0 / -0`.

use boo_animation::{BehaviorKind, Direction};

use crate::domain::{BehaviorDomain, CommitPolicy};
use crate::hook::BehaviorState;
use crate::intent::{Intent, IntentSource, Resolution};

/// Validation result with directional memory for the neutral state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Validity {
    Valid,
    Invalid,
    /// Cleared after being valid (`+0`)
    UnvalidatedFromValid,
    /// Cleared after being invalid (`-0`)
    UnvalidatedFromInvalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, Validity::Invalid)
    }

    pub fn is_unvalidated(self) -> bool {
        matches!(
            self,
            Validity::UnvalidatedFromValid | Validity::UnvalidatedFromInvalid
        )
    }

    /// Resolve `Some(valid)` / `None` against the previous value
    pub fn from_option(value: Option<bool>, previous: Validity) -> Self {
        match value {
            Some(true) => Validity::Valid,
            Some(false) => Validity::Invalid,
            None => previous.unvalidated(),
        }
    }

    /// The unvalidated value reached from `self`
    pub fn unvalidated(self) -> Self {
        match self {
            Validity::Valid => Validity::UnvalidatedFromValid,
            Validity::Invalid => Validity::UnvalidatedFromInvalid,
            neutral => neutral,
        }
    }

    /// `Some(valid)` / `None`, dropping the side memory
    pub fn as_option(self) -> Option<bool> {
        match self {
            Validity::Valid => Some(true),
            Validity::Invalid => Some(false),
            _ => None,
        }
    }

    /// Signed encoding: `1.0`, `-1.0`, `0.0` or `-0.0`
    pub fn as_signed(self) -> f64 {
        match self {
            Validity::Valid => 1.0,
            Validity::Invalid => -1.0,
            Validity::UnvalidatedFromValid => 0.0,
            Validity::UnvalidatedFromInvalid => -0.0,
        }
    }

    /// Decode the signed encoding; `NaN` has no meaning
    pub fn from_signed(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value > 0.0 {
            Some(Validity::Valid)
        } else if value < 0.0 {
            Some(Validity::Invalid)
        } else if value.is_sign_negative() {
            Some(Validity::UnvalidatedFromInvalid)
        } else {
            Some(Validity::UnvalidatedFromValid)
        }
    }
}

/// Validity domain (`boo-validating` / `boo-invalidating` / `boo-unvalidating`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validation;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidityProps {
    /// `Some(true)` valid, `Some(false)` invalid, `None` unvalidated
    pub validity: Intent<Option<bool>>,
    /// Externally computed validity, used in auto mode
    pub computed: Option<bool>,
}

impl ValidityProps {
    pub fn new(validity: Option<bool>) -> Self {
        Self {
            validity: Intent::Value(validity),
            computed: None,
        }
    }

    pub fn auto(computed: Option<bool>) -> Self {
        Self {
            validity: Intent::Auto,
            computed,
        }
    }
}

impl BehaviorDomain for Validation {
    type Value = Validity;
    type Props = ValidityProps;

    const KIND: BehaviorKind = BehaviorKind::Validity;
    const SEED: Validity = Validity::UnvalidatedFromValid;

    fn resolve(props: &ValidityProps, previous: Validity) -> Resolution<Validity> {
        match props.validity {
            Intent::Value(value) => Resolution::controlled(Validity::from_option(value, previous)),
            Intent::Auto => Resolution::auto(Validity::from_option(props.computed, previous)),
        }
    }

    fn direction(target: Validity) -> Direction {
        match target {
            Validity::Valid => Direction::Forward,
            Validity::Invalid => Direction::Reverse,
            _ => Direction::Neutral,
        }
    }

    fn state_tag(value: Validity) -> &'static str {
        match value {
            Validity::Valid => "valid",
            Validity::Invalid => "invalid",
            _ => "unvalidated",
        }
    }

    fn commit_policy(source: IntentSource) -> CommitPolicy {
        match source {
            IntentSource::Controlled => CommitPolicy::Immediate,
            IntentSource::Auto => CommitPolicy::Deferred,
        }
    }

    /// Both unvalidated sides are the same target
    fn same(a: Validity, b: Validity) -> bool {
        a == b || (a.is_unvalidated() && b.is_unvalidated())
    }

    /// Clearing takes the side of the state shown when the cycle starts
    fn rebase(target: Validity, observable: Validity) -> Validity {
        if target.is_unvalidated() {
            observable.unvalidated()
        } else {
            target
        }
    }
}

pub type ValidityState = BehaviorState<Validation>;
