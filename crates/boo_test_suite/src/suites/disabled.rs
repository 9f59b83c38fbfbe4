//! Disabled state scenarios
//!
//! Timings use the default 1000ms keyframe duration.

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_behavior::{Direction, Disabled, DisabledProps};

/// Create the disabled test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("disabled");

    // Disabling commits immediately and animates for the full duration
    suite.add("disable_commits_then_animates", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        ensure!(stage.data_state() == "enabled");
        ensure!(stage.running().is_none());
        ensure!(stage.running_animations().is_empty());

        stage.render(DisabledProps::new(true));
        ensure!(stage.data_state() == "disabled");

        stage.advance(200);
        ensure!(stage.running() == Some(Direction::Forward));
        ensure!(stage.running_animations() == ["boo-test-disabling"]);

        stage.advance(500);
        ensure!(stage.running() == Some(Direction::Forward));

        stage.advance(500);
        ensure!(stage.running().is_none());
        ensure!(stage.running_animations().is_empty());
        ensure!(stage.data_state() == "disabled");
        ensure!(stage.changes().len() == 1);
        Ok(())
    });

    // Enabling cannot be cancelled once it runs
    suite.add("enable_cannot_cancel_mid_flight", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(true))?;
        ensure!(stage.data_state() == "disabled");

        stage.render(DisabledProps::new(false));
        stage.advance(200);
        ensure!(stage.running() == Some(Direction::Reverse));

        stage.render(DisabledProps::new(true));
        stage.advance(200);
        ensure!(stage.data_state() == "enabled");
        ensure!(stage.running() == Some(Direction::Reverse));
        ensure!(stage.running_animations() == ["boo-test-enabling"]);

        stage.render(DisabledProps::new(false));
        stage.advance(200);
        ensure!(stage.running() == Some(Direction::Reverse));
        ensure!(stage.remaining() == Some(400), "remaining {:?}", stage.remaining());

        stage.advance(600);
        ensure!(stage.data_state() == "enabled");
        ensure!(stage.running().is_none());

        let changes = stage.changes();
        ensure!(changes.len() == 1, "changes: {:?}", changes);
        ensure!(!changes[0].value);
        Ok(())
    });

    // An opposite request during the animation chains after it
    suite.add("reenable_chains_after_disabling", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        stage.render(DisabledProps::new(true));
        stage.advance(300);
        stage.render(DisabledProps::new(false));
        ensure!(stage.data_state() == "disabled");

        stage.advance(700);
        ensure!(stage.data_state() == "enabled");
        ensure!(stage.running() == Some(Direction::Reverse));
        ensure!(stage.running_animations() == ["boo-test-enabling"]);

        stage.advance(1000);
        ensure!(stage.running().is_none());

        let at: Vec<_> = stage.changes().iter().map(|c| (c.value, c.at)).collect();
        ensure!(at == [(true, 0), (false, 1000)], "changes at {:?}", at);
        Ok(())
    });

    // A disabled parent disables the control; releasing it re-enables
    suite.add("inherits_parent", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false).parent(false))?;
        stage.render(DisabledProps::new(false).parent(true));
        ensure!(stage.data_state() == "disabled");
        stage.advance(1000);

        stage.render(DisabledProps::new(true).parent(false));
        stage.advance(1000);
        ensure!(stage.data_state() == "disabled");
        ensure!(stage.changes().len() == 1);

        stage.render(DisabledProps::new(false).parent(false));
        ensure!(stage.data_state() == "enabled");
        Ok(())
    });

    // Animations from unrelated styles on the same element change nothing
    suite.add("ignores_unrelated_animations", || {
        let mut stage = Stage::<Disabled>::mount(DisabledProps::new(false))?;
        stage.render(DisabledProps::new(true));
        stage.advance(100);

        stage.dispatch_end("layout-expand");
        stage.dispatch_end("boo-test-enabling");
        ensure!(stage.running() == Some(Direction::Forward));

        stage.advance(900);
        ensure!(stage.running().is_none());
        Ok(())
    });

    suite
}
