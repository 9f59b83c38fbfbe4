//! Focus state scenarios

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_behavior::{Direction, Focus, FocusProps, NativeEvent};

/// Create the focus test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("focus");

    // Auto focus commits after the tick flush, without a native event
    suite.add("auto_commits_after_tick", || {
        let mut stage = Stage::<Focus>::mount(FocusProps::auto(Some(false)))?;
        ensure!(stage.data_state() == "blurred");

        stage.render(FocusProps::auto(Some(true)));
        ensure!(stage.data_state() == "blurred");
        ensure!(stage.changes().is_empty());

        stage.advance(0);
        ensure!(stage.data_state() == "focused");

        let changes = stage.changes();
        ensure!(changes.len() == 1, "changes: {:?}", changes);
        ensure!(changes[0].value);
        ensure!(changes[0].event.is_none());
        Ok(())
    });

    suite.add("controlled_commits_with_event", || {
        let mut stage = Stage::<Focus>::mount(FocusProps::new(false))?;
        stage.render_with_event(FocusProps::new(true), NativeEvent::focus());
        ensure!(stage.data_state() == "focused");
        ensure!(stage.running_animations() == ["boo-test-focusing"]);

        let changes = stage.changes();
        ensure!(changes.len() == 1);
        ensure!(changes[0].event.as_deref() == Some("focus"));
        Ok(())
    });

    // A blur during the focusing animation waits for it to end
    suite.add("blur_waits_for_focusing", || {
        let mut stage = Stage::<Focus>::mount(FocusProps::new(false))?;
        stage.render(FocusProps::new(true));
        stage.advance(100);

        stage.render_with_event(FocusProps::new(false), NativeEvent::blur());
        ensure!(stage.data_state() == "focused");

        stage.advance(900);
        ensure!(stage.data_state() == "blurred");
        ensure!(stage.running() == Some(Direction::Reverse));

        let changes = stage.changes();
        ensure!(changes.len() == 2);
        ensure!(changes[1].event.as_deref() == Some("blur"));
        Ok(())
    });

    // Auto with no computed focus yet is blurred
    suite.add("auto_without_computed_is_blurred", || {
        let mut stage = Stage::<Focus>::mount(FocusProps::auto(None))?;
        ensure!(stage.data_state() == "blurred");

        stage.render(FocusProps::auto(None));
        stage.advance(0);
        ensure!(stage.running().is_none());
        ensure!(stage.changes().is_empty());
        Ok(())
    });

    suite
}
