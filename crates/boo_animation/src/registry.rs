//! Animation name registry
//!
//! Maps the CSS keyframe names emitted by the styling layer to the logical
//! transition direction they represent. Behavior states use the registry to
//! classify `animationstart` / `animationend` signals coming from an element
//! that may also run unrelated animations (layout transitions, ripples, ...).
//!
//! ```rust
//! use boo_animation::{AnimationNameRegistry, Direction};
//!
//! let registry = AnimationNameRegistry::builder()
//!     .forward("boo-test-activate")
//!     .reverse("boo-test-deactivate")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.classify("boo-test-activate"), Some(Direction::Forward));
//! assert_eq!(registry.classify("boo-test-Activate"), None);
//! ```

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::RegistryError;

/// Logical direction of a state transition animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the "positive" state (activating, disabling, focusing, validating, ...)
    Forward,
    /// Towards the "negative" state (deactivating, enabling, blurring, invalidating, ...)
    Reverse,
    /// Towards the neutral state of a tri-state domain (unvalidating)
    Neutral,
}

impl Direction {
    pub fn is_neutral(self) -> bool {
        matches!(self, Direction::Neutral)
    }

    /// The opposite binary direction. Neutral has no opposite.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::Forward => Some(Direction::Reverse),
            Direction::Reverse => Some(Direction::Forward),
            Direction::Neutral => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type NameList = SmallVec<[Arc<str>; 2]>;

struct RegistryInner {
    forward: NameList,
    reverse: NameList,
    neutral: NameList,
}

/// Static mapping from animation names to transition directions
///
/// Cheap to clone: the name lists are shared.
#[derive(Clone)]
pub struct AnimationNameRegistry {
    inner: Arc<RegistryInner>,
}

impl AnimationNameRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Classify an animation name
    ///
    /// Exact, case-sensitive match. Unknown names return `None`.
    pub fn classify(&self, name: &str) -> Option<Direction> {
        let hit = |list: &NameList| list.iter().any(|n| &**n == name);
        if hit(&self.inner.forward) {
            Some(Direction::Forward)
        } else if hit(&self.inner.reverse) {
            Some(Direction::Reverse)
        } else if hit(&self.inner.neutral) {
            Some(Direction::Neutral)
        } else {
            None
        }
    }

    /// The name played when `direction` starts (first registered name)
    pub fn primary(&self, direction: Direction) -> Option<&Arc<str>> {
        self.names(direction).first()
    }

    /// All names recognized for a direction
    pub fn names(&self, direction: Direction) -> &[Arc<str>] {
        match direction {
            Direction::Forward => &self.inner.forward,
            Direction::Reverse => &self.inner.reverse,
            Direction::Neutral => &self.inner.neutral,
        }
    }

    /// Whether this registry knows a neutral direction (tri-state domains)
    pub fn has_neutral(&self) -> bool {
        !self.inner.neutral.is_empty()
    }
}

impl fmt::Debug for AnimationNameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationNameRegistry")
            .field("forward", &self.inner.forward)
            .field("reverse", &self.inner.reverse)
            .field("neutral", &self.inner.neutral)
            .finish()
    }
}

/// Builder for [`AnimationNameRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    forward: NameList,
    reverse: NameList,
    neutral: NameList,
}

impl RegistryBuilder {
    /// Register a forward animation name
    pub fn forward(mut self, name: impl Into<Arc<str>>) -> Self {
        self.forward.push(name.into());
        self
    }

    /// Register a reverse animation name
    pub fn reverse(mut self, name: impl Into<Arc<str>>) -> Self {
        self.reverse.push(name.into());
        self
    }

    /// Register a neutral animation name
    pub fn neutral(mut self, name: impl Into<Arc<str>>) -> Self {
        self.neutral.push(name.into());
        self
    }

    /// Register a name under an explicit direction
    pub fn name(self, direction: Direction, name: impl Into<Arc<str>>) -> Self {
        match direction {
            Direction::Forward => self.forward(name),
            Direction::Reverse => self.reverse(name),
            Direction::Neutral => self.neutral(name),
        }
    }

    pub fn build(self) -> Result<AnimationNameRegistry, RegistryError> {
        if self.forward.is_empty() {
            return Err(RegistryError::MissingDirection(Direction::Forward));
        }
        if self.reverse.is_empty() {
            return Err(RegistryError::MissingDirection(Direction::Reverse));
        }

        let all = [
            (Direction::Forward, &self.forward),
            (Direction::Reverse, &self.reverse),
            (Direction::Neutral, &self.neutral),
        ];
        for (i, (direction, list)) in all.iter().enumerate() {
            for name in list.iter() {
                if name.is_empty() {
                    return Err(RegistryError::EmptyName(*direction));
                }
                // Duplicates inside one direction are harmless; across directions they are not
                for (other, other_list) in &all[i + 1..] {
                    if other_list.iter().any(|n| n == name) {
                        return Err(RegistryError::Ambiguous {
                            name: name.to_string(),
                            first: *direction,
                            second: *other,
                        });
                    }
                }
            }
        }

        Ok(AnimationNameRegistry {
            inner: Arc::new(RegistryInner {
                forward: self.forward,
                reverse: self.reverse,
                neutral: self.neutral,
            }),
        })
    }
}
