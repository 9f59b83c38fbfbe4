//! Active state scenarios

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_behavior::{Active, ActiveProps, Direction, NativeEvent};

/// Create the active test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("active");

    // The click handler's turn finishes before the state flips
    suite.add("commit_deferred_by_one_tick", || {
        let mut stage = Stage::<Active>::mount(ActiveProps::new(false))?;
        let snapshot = stage.render_with_event(ActiveProps::new(true), NativeEvent::click());
        ensure!(snapshot.state_tag == "inactive");
        ensure!(snapshot.running == Some(Direction::Forward));
        ensure!(stage.changes().is_empty());

        stage.advance(0);
        ensure!(stage.data_state() == "active");

        let changes = stage.changes();
        ensure!(changes.len() == 1);
        ensure!(changes[0].event.as_deref() == Some("click"));
        Ok(())
    });

    // The chained cycle is deferred too
    suite.add("chained_cycle_defers", || {
        let mut stage = Stage::<Active>::mount(ActiveProps::new(false))?;
        stage.render(ActiveProps::new(true));
        stage.advance(300);
        stage.render(ActiveProps::new(false));
        ensure!(stage.data_state() == "active");

        stage.advance(700);
        ensure!(stage.data_state() == "inactive");
        ensure!(stage.running_animations() == ["boo-test-deactivate"]);

        stage.advance(1000);
        let at: Vec<_> = stage.changes().iter().map(|c| (c.value, c.at)).collect();
        ensure!(at == [(true, 0), (false, 1000)], "changes at {:?}", at);
        Ok(())
    });

    // Toggling back before the tick flush keeps the original cycle
    suite.add("toggle_back_before_flush", || {
        let mut stage = Stage::<Active>::mount(ActiveProps::new(false))?;
        stage.render(ActiveProps::new(true));
        stage.render(ActiveProps::new(false));
        ensure!(stage.snapshot().pending == Some(false));

        stage.advance(1000);
        ensure!(stage.running() == Some(Direction::Reverse));
        stage.advance(1000);
        ensure!(stage.running().is_none());
        ensure!(stage.data_state() == "inactive");
        ensure!(stage.changes().len() == 2);
        Ok(())
    });

    suite
}
