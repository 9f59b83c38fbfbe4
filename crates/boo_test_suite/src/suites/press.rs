//! Press state scenarios

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_animation::DurationTable;
use boo_behavior::{Direction, NativeEvent, Press, PressProps};

/// Create the press test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("press");

    // A quick tap releases only after the pressing animation completes
    suite.add("quick_tap_plays_both_halves", || {
        let durations = DurationTable::new(1000).with("boo-test-pressing", 150);
        let mut stage = Stage::<Press>::mount_with(PressProps::auto(Some(false)), durations)?;

        stage.render_with_event(PressProps::auto(Some(true)), NativeEvent::pointer_down());
        stage.advance(20);
        ensure!(stage.data_state() == "pressed");

        stage.render_with_event(PressProps::auto(Some(false)), NativeEvent::pointer_up());
        ensure!(stage.data_state() == "pressed");

        stage.advance(130);
        ensure!(stage.data_state() == "released");
        ensure!(stage.running() == Some(Direction::Reverse));

        stage.advance(1000);
        let events: Vec<_> = stage
            .changes()
            .into_iter()
            .map(|c| (c.value, c.event, c.at))
            .collect();
        ensure!(
            events
                == [
                    (true, Some("pointerdown".to_string()), 0),
                    (false, Some("pointerup".to_string()), 150),
                ],
            "changes {:?}",
            events
        );
        Ok(())
    });

    suite.add("controlled_press_is_immediate", || {
        let mut stage = Stage::<Press>::mount(PressProps::new(false))?;
        stage.render(PressProps::new(true));
        ensure!(stage.data_state() == "pressed");
        ensure!(stage.running_animations() == ["boo-test-pressing"]);
        Ok(())
    });

    suite
}
