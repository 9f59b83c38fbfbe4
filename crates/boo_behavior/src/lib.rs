//! Boo Behavior States
//!
//! Animation-aware state machines for interactive controls. A behavior state
//! reconciles what the owner asks for (the *intent*) with the CSS animation
//! that visualizes the change, so that:
//!
//! - the reported state never flips while a transition animation is running
//! - rapid, contradictory requests are accepted at any time and collapse into
//!   at most one follow-up transition
//! - every committed transition is reported exactly once
//!
//! # Domains
//!
//! - **Active**: commit deferred by one tick
//! - **Disabled / Read-only**: own flag or'd with the inherited one
//! - **Focus / Press**: controlled or following a computed value (`auto`)
//! - **Validity**: tri-state with side memory when cleared
//!
//! # Example
//!
//! ```rust
//! use boo_behavior::prelude::*;
//!
//! let queue = MicrotaskQueue::new();
//! let config = BehaviorConfig::<Focus>::with_prefix("boo-test").unwrap();
//! let focus = FocusState::mount(FocusProps::auto(Some(false)), config, &queue);
//!
//! focus.on_change(|focused, event| {
//!     assert!(focused);
//!     assert!(event.is_none());
//! });
//!
//! focus.render(FocusProps::auto(Some(true)));
//! assert_eq!(focus.data_state(), "blurred");
//!
//! queue.flush();
//! assert_eq!(focus.data_state(), "focused");
//! ```

pub mod controller;
pub mod domain;
pub mod domains;
pub mod emitter;
pub mod error;
pub mod hook;
pub mod intent;
pub mod task;

#[cfg(test)]
mod properties;

pub use controller::{AnimationLifecycleController, Effect, Phase, Step};
pub use domain::{BehaviorConfig, BehaviorDomain, CommitPolicy};
pub use domains::{
    Active, ActiveProps, ActiveState, Disabled, DisabledProps, DisabledState, Focus, FocusProps,
    FocusState, Press, PressProps, PressState, ReadOnly, ReadOnlyProps, ReadOnlyState, Validation,
    Validity, ValidityProps, ValidityState,
};
pub use emitter::{ChangeEmitter, NativeEvent};
pub use error::{BehaviorError, Result};
pub use hook::{BehaviorState, Snapshot};
pub use intent::{inherit_or, Intent, IntentSource, IntentTracker, Resolution};
pub use task::MicrotaskQueue;

// Re-export animation types used in the public API
pub use boo_animation::{AnimationNameRegistry, AnimationNames, BehaviorKind, Direction};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::domain::{BehaviorConfig, BehaviorDomain, CommitPolicy};
    pub use crate::domains::{
        Active, ActiveProps, ActiveState, Disabled, DisabledProps, DisabledState, Focus,
        FocusProps, FocusState, Press, PressProps, PressState, ReadOnly, ReadOnlyProps,
        ReadOnlyState, Validation, Validity, ValidityProps, ValidityState,
    };
    pub use crate::emitter::NativeEvent;
    pub use crate::hook::{BehaviorState, Snapshot};
    pub use crate::intent::Intent;
    pub use crate::task::MicrotaskQueue;
    pub use crate::{Direction, Step};
}
