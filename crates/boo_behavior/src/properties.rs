//! Property tests for the lifecycle guarantees
//!
//! Random interleavings of renders, animation signals and tick flushes are
//! played against a simulated element that plays whatever the state asks for.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;

use crate::domain::{BehaviorConfig, BehaviorDomain};
use crate::domains::{
    Active, ActiveProps, Disabled, DisabledProps, Focus, FocusProps, Validation, ValidityProps,
};
use crate::hook::BehaviorState;
use crate::task::MicrotaskQueue;
use crate::{Direction, Step};

#[derive(Clone, Debug)]
enum Op {
    Render(u8),
    Start,
    End,
    Flush,
    Stray,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0u8..3).prop_map(Op::Render),
            2 => Just(Op::Start),
            3 => Just(Op::End),
            2 => Just(Op::Flush),
            1 => Just(Op::Stray),
        ],
        1..60,
    )
}

struct Element<D: BehaviorDomain> {
    state: BehaviorState<D>,
    queue: MicrotaskQueue,
    log: Rc<RefCell<Vec<D::Value>>>,
    playing: VecDeque<(Arc<str>, bool)>,
    plays: usize,
}

impl<D: BehaviorDomain> Element<D> {
    fn mount(props: D::Props) -> Self {
        let queue = MicrotaskQueue::new();
        let config = BehaviorConfig::<D>::with_prefix("boo-test").unwrap();
        let state = BehaviorState::mount(props, config, &queue);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.on_change(move |value, _event| sink.borrow_mut().push(value));
        Self {
            state,
            queue,
            log,
            playing: VecDeque::new(),
            plays: 0,
        }
    }

    fn pick_up_requests(&mut self) {
        for name in self.state.take_animation_requests() {
            self.playing.push_back((name, false));
            self.plays += 1;
        }
    }

    fn start(&mut self) {
        if let Some((name, started)) = self.playing.front_mut() {
            if !*started {
                *started = true;
                let name = name.clone();
                self.state.on_animation_start(&name);
            }
        }
    }

    fn end(&mut self) {
        self.start();
        if let Some((name, _)) = self.playing.pop_front() {
            self.state.on_animation_end(&name);
        }
    }

    fn settle(&mut self) {
        for _ in 0..16 {
            self.queue.flush();
            self.pick_up_requests();
            if self.playing.is_empty() && self.queue.is_empty() {
                return;
            }
            self.end();
            self.pick_up_requests();
        }
    }
}

fn check<D, P>(initial: D::Props, props: P, ops: &[Op]) -> Result<(), TestCaseError>
where
    D: BehaviorDomain,
    P: Fn(u8) -> D::Props,
{
    let mut element = Element::<D>::mount(initial);
    let mut intents = vec![element.state.snapshot().intent];

    for op in ops {
        let before = element.state.running_direction();

        match op {
            Op::Render(v) => {
                element.state.render(props(*v));
                intents.push(element.state.snapshot().intent);
            }
            Op::Start => element.start(),
            Op::End => element.end(),
            Op::Flush => {
                element.queue.flush();
            }
            Op::Stray => {
                prop_assert_eq!(
                    element.state.on_animation_end("boo-test-unrelated"),
                    Step::Ignored
                );
                prop_assert_eq!(
                    element.state.on_animation_start("boo-test-layout"),
                    Step::Ignored
                );
            }
        }
        element.pick_up_requests();

        let after = element.state.running_direction();
        if before.is_some() && !matches!(op, Op::End) {
            // Non-interruption: only an end signal changes a running direction
            prop_assert_eq!(after, before);
        }
        prop_assert!(element.playing.len() <= 1, "overlapping animations");

        let snapshot = element.state.snapshot();
        // Observable is always some requested intent, never a made-up value
        prop_assert!(intents.iter().any(|i| D::same(*i, snapshot.observable)));

        let log = element.log.borrow();
        if let Some(last) = log.last() {
            prop_assert_eq!(*last, snapshot.observable);
        }
        for pair in log.windows(2) {
            prop_assert!(!D::same(pair[0], pair[1]), "double commit {:?}", pair);
        }
    }

    element.settle();
    let snapshot = element.state.snapshot();

    prop_assert_eq!(snapshot.running, None);
    prop_assert_eq!(snapshot.pending, None);
    prop_assert!(D::same(snapshot.observable, snapshot.intent));
    // Exactly one commit per played cycle
    prop_assert_eq!(element.log.borrow().len(), element.plays);
    Ok(())
}

fn flag(v: u8) -> bool {
    v % 2 == 1
}

proptest! {
    #[test]
    fn prop_disabled_lifecycle(ops in ops()) {
        check::<Disabled, _>(DisabledProps::new(false), |v| DisabledProps::new(flag(v)), &ops)?;
    }

    #[test]
    fn prop_disabled_with_parent_lifecycle(ops in ops()) {
        check::<Disabled, _>(
            DisabledProps::new(false),
            |v| DisabledProps::new(false).parent(flag(v)),
            &ops,
        )?;
    }

    #[test]
    fn prop_active_lifecycle(ops in ops()) {
        check::<Active, _>(ActiveProps::new(false), |v| ActiveProps::new(flag(v)), &ops)?;
    }

    #[test]
    fn prop_focus_auto_lifecycle(ops in ops()) {
        check::<Focus, _>(
            FocusProps::auto(Some(false)),
            |v| FocusProps::auto(Some(flag(v))),
            &ops,
        )?;
    }

    #[test]
    fn prop_validity_lifecycle(ops in ops()) {
        let validity = |v: u8| match v {
            0 => None,
            1 => Some(true),
            _ => Some(false),
        };
        check::<Validation, _>(ValidityProps::new(None), |v| ValidityProps::new(validity(v)), &ops)?;
    }
}

#[test]
fn test_same_intent_twice_while_idle_plays_once() {
    let mut element = Element::<Disabled>::mount(DisabledProps::new(false));

    element.state.render(DisabledProps::new(true));
    element.pick_up_requests();
    element.end();

    element.state.render(DisabledProps::new(true));
    element.pick_up_requests();
    assert_eq!(element.plays, 1);
    assert!(element.state.snapshot().is_idle());
}

#[test]
fn test_flip_flop_chains_once() {
    let mut element = Element::<Disabled>::mount(DisabledProps::new(false));

    element.state.render(DisabledProps::new(true));
    element.pick_up_requests();
    element.start();

    // A, B, A while disabling runs
    element.state.render(DisabledProps::new(false));
    element.state.render(DisabledProps::new(true));
    element.state.render(DisabledProps::new(false));
    element.pick_up_requests();
    assert_eq!(element.plays, 1);

    element.end();
    element.pick_up_requests();
    assert_eq!(element.plays, 2);
    assert_eq!(
        element.state.running_direction(),
        Some(Direction::Reverse)
    );

    element.settle();
    assert_eq!(element.plays, 2);
    assert_eq!(*element.log.borrow(), vec![true, false]);
}
