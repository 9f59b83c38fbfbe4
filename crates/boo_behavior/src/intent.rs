//! Intent resolution and change detection
//!
//! An intent is what the owner of a behavior state *asks for*, independent of
//! any animation in progress. Props are resolved into an intent value by the
//! domain (`own || parent` for inherited flags, computed values for `auto`),
//! and the tracker remembers the last resolved intent to detect deltas.

use std::fmt;

use crate::domain::BehaviorDomain;

/// A controlled value or a request to follow an externally computed one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent<T> {
    Value(T),
    Auto,
}

impl<T> Intent<T> {
    pub fn is_auto(&self) -> bool {
        matches!(self, Intent::Auto)
    }

    /// The controlled value, or `computed` when in auto mode
    pub fn or_computed(self, computed: Option<T>) -> Option<T> {
        match self {
            Intent::Value(value) => Some(value),
            Intent::Auto => computed,
        }
    }
}

impl<T> From<T> for Intent<T> {
    fn from(value: T) -> Self {
        Intent::Value(value)
    }
}

impl<T: Default> Default for Intent<T> {
    fn default() -> Self {
        Intent::Value(T::default())
    }
}

/// Where a resolved intent came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IntentSource {
    /// An explicit prop value
    #[default]
    Controlled,
    /// An externally computed value (auto mode)
    Auto,
}

/// A resolved intent value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution<V> {
    pub value: V,
    pub source: IntentSource,
}

impl<V> Resolution<V> {
    pub fn controlled(value: V) -> Self {
        Self {
            value,
            source: IntentSource::Controlled,
        }
    }

    pub fn auto(value: V) -> Self {
        Self {
            value,
            source: IntentSource::Auto,
        }
    }
}

/// Combine an own flag with an inherited one (`own || parent`)
pub fn inherit_or(own: bool, parent: Option<bool>) -> bool {
    own || parent.unwrap_or(false)
}

/// Tracks the latest resolved intent of one behavior state
pub struct IntentTracker<D: BehaviorDomain> {
    current: D::Value,
    source: IntentSource,
}

impl<D: BehaviorDomain> IntentTracker<D> {
    /// Resolve the mount-time props into the first intent
    pub fn mount(props: &D::Props) -> Self {
        let initial = D::resolve(props, D::SEED);
        Self {
            current: initial.value,
            source: initial.source,
        }
    }

    /// Resolve props against the last intent
    pub fn resolve(&self, props: &D::Props) -> Resolution<D::Value> {
        D::resolve(props, self.current)
    }

    /// Strict value comparison
    ///
    /// Distinguishes values that the controller treats as equivalent, such
    /// as the two unvalidated sides of the validity domain.
    pub fn has_changed(previous: D::Value, next: D::Value) -> bool {
        previous != next
    }

    /// Record a new resolution, returning whether the intent changed
    pub fn observe(&mut self, resolution: Resolution<D::Value>) -> bool {
        let changed = Self::has_changed(self.current, resolution.value);
        self.current = resolution.value;
        self.source = resolution.source;
        changed
    }

    pub fn current(&self) -> D::Value {
        self.current
    }

    pub fn source(&self) -> IntentSource {
        self.source
    }
}

impl<D: BehaviorDomain> fmt::Debug for IntentTracker<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentTracker")
            .field("domain", &D::KIND)
            .field("current", &self.current)
            .field("source", &self.source)
            .finish()
    }
}
