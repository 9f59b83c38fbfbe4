//! Lifecycle guarantees shared by every domain, checked on the clock

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_animation::SignalKind;
use boo_behavior::{
    Active, ActiveProps, Direction, Disabled, DisabledProps, Focus, FocusProps,
};

/// Create the lifecycle test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("lifecycle");

    // The observable value is always one of the requested values
    suite.add("no_spurious_flips", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        let plan = [true, false, true, true, false, false, true];
        let mut requested = vec![false];

        for (i, disabled) in plan.into_iter().enumerate() {
            stage.render(DisabledProps::new(disabled));
            requested.push(disabled);
            stage.advance(150 + 100 * i as u64);

            let observable = stage.snapshot().observable;
            ensure!(
                requested.contains(&observable),
                "observable {} never requested",
                observable
            );
        }

        stage.advance(5000);
        ensure!(stage.running().is_none());
        ensure!(stage.data_state() == "disabled");
        for pair in stage.changes().windows(2) {
            ensure!(pair[0].value != pair[1].value, "double commit {:?}", pair);
        }
        Ok(())
    });

    suite.add("opposite_intent_never_interrupts", || {
        let mut stage = Stage::<Focus>::mount(FocusProps::new(false))?;
        stage.render(FocusProps::new(true));

        for _ in 0..9 {
            stage.advance(100);
            stage.render(FocusProps::new(false));
            ensure!(stage.running() == Some(Direction::Forward));
            ensure!(stage.running_animations() == ["boo-test-focusing"]);
            stage.render(FocusProps::new(true));
        }
        Ok(())
    });

    // A, B, A while running: one chained cycle towards the last request
    suite.add("pending_coalesces", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        stage.render(DisabledProps::new(true));
        stage.advance(100);

        stage.render(DisabledProps::new(false));
        stage.render(DisabledProps::new(true));
        stage.render(DisabledProps::new(false));
        stage.advance(5000);

        let names: Vec<_> = stage
            .signals()
            .iter()
            .filter(|s| s.kind == SignalKind::Start)
            .map(|s| s.name.to_string())
            .collect();
        ensure!(
            names == ["boo-test-disabling", "boo-test-enabling"],
            "played {:?}",
            names
        );
        ensure!(stage.data_state() == "enabled");
        Ok(())
    });

    suite.add("same_intent_twice_is_idempotent", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        stage.render(DisabledProps::new(true));
        stage.advance(1000);
        stage.render(DisabledProps::new(true));

        ensure!(stage.running().is_none());
        ensure!(stage.running_animations().is_empty());
        ensure!(stage.changes().len() == 1);
        Ok(())
    });

    suite.add("idle_after_end_until_next_intent", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        stage.render(DisabledProps::new(true));
        stage.advance(1000);
        ensure!(stage.running().is_none());

        stage.advance(3000);
        ensure!(stage.running().is_none());

        stage.render(DisabledProps::new(false));
        ensure!(stage.running() == Some(Direction::Reverse));
        Ok(())
    });

    // Unmounting mid-flight silences every later signal and tick
    suite.add("unmount_mid_animation_is_silent", || {
        let mut stage = Stage::<Active>::mount(ActiveProps::new(false))?;
        stage.render(ActiveProps::new(true));
        ensure!(stage.changes().is_empty());

        let changes = stage.unmount();
        ensure!(changes.is_empty(), "changes after unmount: {:?}", changes);
        Ok(())
    });

    suite
}
