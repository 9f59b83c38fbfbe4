//! Read-only state scenarios

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_behavior::{Direction, ReadOnly, ReadOnlyProps};

/// Create the read-only test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("read_only");

    suite.add("freeze_commits_immediately", || {
        let mut stage = Stage::<ReadOnly>::mount(ReadOnlyProps::new(false))?;
        ensure!(stage.data_state() == "editable");

        stage.render(ReadOnlyProps::new(true));
        ensure!(stage.data_state() == "read-only");
        ensure!(stage.running_animations() == ["boo-test-freeze"]);

        stage.advance(1000);
        ensure!(stage.running().is_none());
        Ok(())
    });

    // Thawing while freezing waits, then chains at the end of the freeze
    suite.add("thaw_chains_after_freeze", || {
        let mut stage = Stage::<ReadOnly>::mount(ReadOnlyProps::new(false))?;
        stage.render(ReadOnlyProps::new(true));
        stage.advance(400);

        stage.render(ReadOnlyProps::new(false));
        ensure!(stage.data_state() == "read-only");
        ensure!(stage.snapshot().pending == Some(false));
        ensure!(stage.running() == Some(Direction::Forward));

        stage.advance(600);
        ensure!(stage.data_state() == "editable");
        ensure!(stage.running() == Some(Direction::Reverse));
        ensure!(stage.running_animations() == ["boo-test-thaw"]);

        stage.advance(1000);
        ensure!(stage.running().is_none());
        let at: Vec<_> = stage.changes().iter().map(|c| (c.value, c.at)).collect();
        ensure!(at == [(true, 0), (false, 1000)], "changes at {:?}", at);
        Ok(())
    });

    // Own flag cleared while the parent still holds it: no transition
    suite.add("parent_keeps_read_only", || {
        let mut stage = Stage::<ReadOnly>::mount(ReadOnlyProps::new(true).parent(true))?;
        stage.render(ReadOnlyProps::new(false).parent(true));
        ensure!(stage.data_state() == "read-only");
        ensure!(stage.running().is_none());

        stage.render(ReadOnlyProps::new(false).parent(false));
        ensure!(stage.data_state() == "editable");
        ensure!(stage.running() == Some(Direction::Reverse));
        ensure!(stage.running_animations() == ["boo-test-thaw"]);
        Ok(())
    });

    suite
}
