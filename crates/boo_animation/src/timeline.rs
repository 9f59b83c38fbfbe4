//! Deterministic animation timeline
//!
//! Plays named keyframe animations against a simulated millisecond clock and
//! reports their lifecycle the way a browser does: an `animationstart` signal
//! when the animation begins and an `animationend` signal once its duration
//! has elapsed. Nothing here knows about behavior states; the timeline is
//! the "element" that behavior states talk to in tests and headless hosts.
//!
//! ```rust
//! use boo_animation::{AnimationTimeline, DurationTable, SignalKind};
//!
//! let mut timeline = AnimationTimeline::new(DurationTable::new(1000));
//! timeline.play("boo-test-disabling");
//!
//! let signals = timeline.advance(0);
//! assert_eq!(signals[0].kind, SignalKind::Start);
//!
//! assert!(timeline.advance(999).is_empty());
//! let signals = timeline.advance(1);
//! assert_eq!(signals[0].kind, SignalKind::End);
//! assert!(timeline.running().is_empty());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a playing animation
    pub struct AnimationId;
}

/// Default keyframe duration in milliseconds
pub const DEFAULT_DURATION_MS: u64 = 1000;

/// Durations of named animations
#[derive(Clone, Debug)]
pub struct DurationTable {
    default_ms: u64,
    overrides: FxHashMap<String, u64>,
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl DurationTable {
    /// Create a table where every animation lasts `default_ms`
    pub fn new(default_ms: u64) -> Self {
        Self {
            default_ms,
            overrides: FxHashMap::default(),
        }
    }

    /// Set the duration of one animation
    pub fn with(mut self, name: impl Into<String>, ms: u64) -> Self {
        self.overrides.insert(name.into(), ms);
        self
    }

    pub fn duration(&self, name: &str) -> u64 {
        self.overrides.get(name).copied().unwrap_or(self.default_ms)
    }
}

/// Lifecycle phase reported by a signal
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalKind {
    Start,
    End,
}

/// An `animationstart` / `animationend` notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSignal {
    pub id: AnimationId,
    pub name: Arc<str>,
    pub kind: SignalKind,
    /// Timeline time at which the signal fired
    pub at: u64,
}

/// A physically running animation, as seen from outside
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningAnimation {
    pub id: AnimationId,
    pub name: Arc<str>,
    pub started_at: u64,
    pub remaining_ms: u64,
}

struct Playing {
    name: Arc<str>,
    started_at: u64,
    ends_at: u64,
    start_delivered: bool,
    seq: u64,
}

/// Simulated clock plus the set of animations playing on one element
pub struct AnimationTimeline {
    durations: DurationTable,
    animations: SlotMap<AnimationId, Playing>,
    now: u64,
    next_seq: u64,
}

impl Default for AnimationTimeline {
    fn default() -> Self {
        Self::new(DurationTable::default())
    }
}

impl AnimationTimeline {
    pub fn new(durations: DurationTable) -> Self {
        Self {
            durations,
            animations: SlotMap::with_key(),
            now: 0,
            next_seq: 0,
        }
    }

    /// Current timeline time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Start an animation at the current time
    ///
    /// The start signal is due immediately and is delivered by the next
    /// `advance` call (including `advance(0)`).
    pub fn play(&mut self, name: impl Into<Arc<str>>) -> AnimationId {
        let name = name.into();
        let duration = self.durations.duration(&name);
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::trace!("timeline: play {} for {}ms at {}", name, duration, self.now);

        self.animations.insert(Playing {
            name,
            started_at: self.now,
            ends_at: self.now + duration,
            start_delivered: false,
            seq,
        })
    }

    /// Advance the clock by `ms` and collect due signals
    pub fn advance(&mut self, ms: u64) -> Vec<AnimationSignal> {
        self.advance_to(self.now + ms)
    }

    /// Advance the clock to `time` and collect due signals
    ///
    /// Signals come back in firing order: by time, starts before ends at the
    /// same instant, then in play order. Moving backwards is a no-op.
    pub fn advance_to(&mut self, time: u64) -> Vec<AnimationSignal> {
        let time = time.max(self.now);
        let mut due: Vec<(u64, SignalKind, u64, AnimationSignal)> = Vec::new();
        let mut finished = Vec::new();

        for (id, playing) in self.animations.iter_mut() {
            if !playing.start_delivered && playing.started_at <= time {
                playing.start_delivered = true;
                due.push((
                    playing.started_at,
                    SignalKind::Start,
                    playing.seq,
                    AnimationSignal {
                        id,
                        name: playing.name.clone(),
                        kind: SignalKind::Start,
                        at: playing.started_at,
                    },
                ));
            }
            if playing.ends_at <= time {
                finished.push(id);
                due.push((
                    playing.ends_at,
                    SignalKind::End,
                    playing.seq,
                    AnimationSignal {
                        id,
                        name: playing.name.clone(),
                        kind: SignalKind::End,
                        at: playing.ends_at,
                    },
                ));
            }
        }

        for id in finished {
            self.animations.remove(id);
        }

        self.now = time;
        due.sort_by_key(|(at, kind, seq, _)| (*at, *kind, *seq));
        due.into_iter().map(|(_, _, _, signal)| signal).collect()
    }

    /// Time of the earliest undelivered signal
    pub fn next_due(&self) -> Option<u64> {
        self.animations
            .values()
            .map(|p| {
                if p.start_delivered {
                    p.ends_at
                } else {
                    p.started_at
                }
            })
            .min()
    }

    /// Animations currently playing, in play order
    pub fn running(&self) -> Vec<RunningAnimation> {
        let mut running: Vec<_> = self
            .animations
            .iter()
            .map(|(id, playing)| {
                (
                    playing.seq,
                    RunningAnimation {
                        id,
                        name: playing.name.clone(),
                        started_at: playing.started_at,
                        remaining_ms: playing.ends_at.saturating_sub(self.now),
                    },
                )
            })
            .collect();
        running.sort_by_key(|(seq, _)| *seq);
        running.into_iter().map(|(_, r)| r).collect()
    }

    /// Whether an animation with this name is playing
    pub fn is_running(&self, name: &str) -> bool {
        self.animations.values().any(|p| &*p.name == name)
    }

    /// Drop every animation without emitting signals
    pub fn cancel_all(&mut self) {
        if !self.animations.is_empty() {
            tracing::trace!("timeline: cancelled {} animations", self.animations.len());
        }
        self.animations.clear();
    }
}
