//! Change notifications
//!
//! A behavior state reports every committed transition exactly once, with
//! the native event that requested it. Prop-driven changes carry no event;
//! changes requested from an interaction handler carry that interaction's
//! event (a `click`, a `pointerdown`, ...).

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

/// A native UI event that originated a change
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeEvent {
    kind: Cow<'static, str>,
}

impl NativeEvent {
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn click() -> Self {
        Self::new("click")
    }

    pub fn focus() -> Self {
        Self::new("focus")
    }

    pub fn blur() -> Self {
        Self::new("blur")
    }

    pub fn pointer_down() -> Self {
        Self::new("pointerdown")
    }

    pub fn pointer_up() -> Self {
        Self::new("pointerup")
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    /// The event type (`click`, `focus`, ...)
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for NativeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)
    }
}

type Listener<V> = Box<dyn FnMut(V, Option<&NativeEvent>)>;

/// Delivers change notifications to a single listener
///
/// Notifications raised while the listener is running (a listener that
/// re-renders the state it listens to) are queued and delivered in order
/// once it returns. After [`close`](ChangeEmitter::close) nothing is
/// delivered.
pub struct ChangeEmitter<V> {
    listener: RefCell<Option<Listener<V>>>,
    queue: RefCell<VecDeque<(V, Option<NativeEvent>)>>,
    emitting: Cell<bool>,
    closed: Cell<bool>,
}

impl<V> Default for ChangeEmitter<V> {
    fn default() -> Self {
        Self {
            listener: RefCell::new(None),
            queue: RefCell::new(VecDeque::new()),
            emitting: Cell::new(false),
            closed: Cell::new(false),
        }
    }
}

impl<V> ChangeEmitter<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listener
    pub fn set_listener<F>(&self, listener: F)
    where
        F: FnMut(V, Option<&NativeEvent>) + 'static,
    {
        if self.closed.get() {
            return;
        }
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Remove the listener, keeping the emitter open
    pub fn clear_listener(&self) {
        self.listener.borrow_mut().take();
    }

    /// Deliver a change notification
    pub fn emit(&self, value: V, event: Option<NativeEvent>) {
        if self.closed.get() {
            return;
        }
        self.queue.borrow_mut().push_back((value, event));
        if self.emitting.get() {
            return;
        }

        self.emitting.set(true);
        loop {
            if self.closed.get() {
                self.queue.borrow_mut().clear();
                break;
            }
            let Some((value, event)) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let listener = self.listener.borrow_mut().take();
            if let Some(mut listener) = listener {
                listener(value, event.as_ref());
                // Keep a listener installed from inside the callback
                let mut slot = self.listener.borrow_mut();
                if slot.is_none() && !self.closed.get() {
                    *slot = Some(listener);
                }
            }
        }
        self.emitting.set(false);
    }

    /// Stop delivering notifications and drop the listener
    pub fn close(&self) {
        self.closed.set(true);
        self.queue.borrow_mut().clear();
        self.listener.borrow_mut().take();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl<V> fmt::Debug for ChangeEmitter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("has_listener", &self.listener.borrow().is_some())
            .field("closed", &self.closed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_emit_passes_event() {
        let emitter = ChangeEmitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        emitter.set_listener(move |value: bool, event: Option<&NativeEvent>| {
            sink.borrow_mut()
                .push((value, event.map(|e| e.kind().to_string())));
        });

        emitter.emit(true, None);
        emitter.emit(false, Some(NativeEvent::click()));

        assert_eq!(
            *log.borrow(),
            vec![(true, None), (false, Some("click".to_string()))]
        );
    }

    #[test]
    fn test_reentrant_emit_is_queued() {
        let emitter = Rc::new(ChangeEmitter::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        let weak = Rc::downgrade(&emitter);
        emitter.set_listener(move |value: u32, _event: Option<&NativeEvent>| {
            sink.borrow_mut().push(value);
            if value == 1 {
                if let Some(emitter) = weak.upgrade() {
                    emitter.emit(2, None);
                    emitter.emit(3, None);
                }
            }
        });

        emitter.emit(1, None);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_closed_emitter_is_silent() {
        let emitter = ChangeEmitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        emitter.set_listener(move |value: bool, _event: Option<&NativeEvent>| {
            sink.borrow_mut().push(value);
        });
        emitter.close();
        emitter.emit(true, None);

        // A listener installed after closing is ignored too
        let sink = log.clone();
        emitter.set_listener(move |value: bool, _event: Option<&NativeEvent>| {
            sink.borrow_mut().push(value);
        });
        emitter.emit(false, None);

        assert!(log.borrow().is_empty());
        assert!(emitter.is_closed());
    }

    #[test]
    fn test_native_event_kinds() {
        assert_eq!(NativeEvent::click().kind(), "click");
        assert_eq!(NativeEvent::pointer_down().to_string(), "pointerdown");
        assert_eq!(NativeEvent::new(String::from("keydown")).kind(), "keydown");
    }
}
