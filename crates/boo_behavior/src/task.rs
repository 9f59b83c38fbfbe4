//! One-tick task queue
//!
//! Behavior states that defer their commit schedule a task here instead of
//! committing synchronously. The host flushes the queue once the current
//! synchronous work (a render, a native event handler) has finished, which
//! mirrors a microtask checkpoint in an event loop.
//!
//! The queue is single-threaded and cheap to clone; clones share the same
//! task list.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

/// Shared FIFO of deferred tasks
#[derive(Clone, Default)]
pub struct MicrotaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a task for the next flush
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Run every queued task, including tasks scheduled while flushing
    ///
    /// Returns the number of tasks that ran.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        loop {
            // The borrow must end before the task runs: tasks may schedule more tasks
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl fmt::Debug for MicrotaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicrotaskQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_tasks_run_in_order_on_flush() {
        let queue = MicrotaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            queue.schedule(move || log.borrow_mut().push(i));
        }

        assert_eq!(queue.len(), 3);
        assert!(log.borrow().is_empty());

        assert_eq!(queue.flush(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_tasks_scheduled_during_flush_run_in_same_flush() {
        let queue = MicrotaskQueue::new();
        let hits = Rc::new(Cell::new(0));

        let inner_queue = queue.clone();
        let inner_hits = hits.clone();
        queue.schedule(move || {
            inner_hits.set(inner_hits.get() + 1);
            let hits = inner_hits.clone();
            inner_queue.schedule(move || hits.set(hits.get() + 10));
        });

        assert_eq!(queue.flush(), 2);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_flush_empty_queue() {
        let queue = MicrotaskQueue::new();
        assert_eq!(queue.flush(), 0);
    }
}
