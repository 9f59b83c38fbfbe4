//! Behavior domains and their configuration
//!
//! Every behavior state (active, disabled, focus, press, read-only, validity)
//! runs the same lifecycle controller. What differs is captured here:
//!
//! - the value space and how props resolve into it
//! - which direction a transition towards a value animates in
//! - the `data-state` tag of each value
//! - when the observable state commits
//! - the registered keyframe names (carried by [`BehaviorConfig`])

use std::fmt;
use std::marker::PhantomData;

use boo_animation::{AnimationNameRegistry, AnimationNames, BehaviorKind, Direction};

use crate::error::Result;
use crate::intent::{IntentSource, Resolution};

/// When the observable state follows a new intent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitPolicy {
    /// Commit synchronously when the transition starts
    Immediate,
    /// Commit one microtask later, or earlier if the animation start is
    /// confirmed first
    Deferred,
}

/// A behavior state domain
pub trait BehaviorDomain: Sized + 'static {
    /// The logical value exposed by the state
    type Value: Copy + PartialEq + fmt::Debug + 'static;

    /// The props a host passes on every render
    type Props: Clone + fmt::Debug;

    const KIND: BehaviorKind;

    /// Value used as the "previous intent" when resolving mount-time props
    const SEED: Self::Value;

    /// Resolve props into an intent, given the previous intent
    fn resolve(props: &Self::Props, previous: Self::Value) -> Resolution<Self::Value>;

    /// Direction of the animation that leads to `target`
    fn direction(target: Self::Value) -> Direction;

    /// `data-state` tag of a value
    fn state_tag(value: Self::Value) -> &'static str;

    /// Commit timing for an intent coming from `source`
    fn commit_policy(_source: IntentSource) -> CommitPolicy {
        CommitPolicy::Immediate
    }

    /// Equivalence used by the controller for redundancy checks
    fn same(a: Self::Value, b: Self::Value) -> bool {
        a == b
    }

    /// Adjust a transition target to the value it actually leaves from
    ///
    /// Called when a cycle starts, which may be long after the intent was
    /// resolved (a pending intent chained at the end of an animation).
    fn rebase(target: Self::Value, _observable: Self::Value) -> Self::Value {
        target
    }
}

/// Per-instance configuration of a behavior state
pub struct BehaviorConfig<D: BehaviorDomain> {
    /// Keyframe names recognized by this state
    pub registry: AnimationNameRegistry,
    /// Overrides the domain's commit policy when set
    pub commit: Option<CommitPolicy>,
    _domain: PhantomData<fn() -> D>,
}

impl<D: BehaviorDomain> Clone for BehaviorConfig<D> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            commit: self.commit,
            _domain: PhantomData,
        }
    }
}

impl<D: BehaviorDomain> fmt::Debug for BehaviorConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorConfig")
            .field("domain", &D::KIND)
            .field("registry", &self.registry)
            .field("commit", &self.commit)
            .finish()
    }
}

impl<D: BehaviorDomain> BehaviorConfig<D> {
    /// Create a config from an explicit registry
    pub fn new(registry: AnimationNameRegistry) -> Self {
        Self {
            registry,
            commit: None,
            _domain: PhantomData,
        }
    }

    /// Take this domain's names from a name table
    pub fn from_names(names: &AnimationNames) -> Result<Self> {
        Ok(Self::new(names.registry(D::KIND)?))
    }

    /// Use the standard names under `prefix` (`boo` in production stylesheets)
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        Self::from_names(&AnimationNames::with_prefix(prefix))
    }

    /// Force a commit policy regardless of intent source
    pub fn commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.commit = Some(policy);
        self
    }

    /// Effective commit policy for an intent source
    pub fn policy_for(&self, source: IntentSource) -> CommitPolicy {
        self.commit.unwrap_or_else(|| D::commit_policy(source))
    }
}
