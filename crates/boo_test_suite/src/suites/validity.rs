//! Validity state scenarios
//!
//! Clearing validation keeps the side it came from, visible through the
//! signed encoding (`+0` after valid, `-0` after invalid).

use crate::harness::Stage;
use crate::runner::TestSuite;
use anyhow::ensure;
use boo_behavior::{Direction, Validation, Validity, ValidityProps};

/// Create the validity test suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("validity");

    suite.add("clear_from_valid_is_positive_zero", || {
        let mut stage = Stage::<Validation>::mount(ValidityProps::new(Some(true)))?;
        ensure!(stage.data_state() == "valid");

        let snapshot = stage.render(ValidityProps::new(None));
        ensure!(snapshot.observable == Validity::UnvalidatedFromValid);
        let signed = snapshot.observable.as_signed();
        ensure!(signed == 0.0 && signed.is_sign_positive(), "got {signed}");
        ensure!(snapshot.running == Some(Direction::Neutral));
        ensure!(stage.running_animations() == ["boo-test-unvalidating"]);

        stage.advance(1000);
        ensure!(stage.running().is_none());
        ensure!(stage.data_state() == "unvalidated");
        Ok(())
    });

    suite.add("clear_from_invalid_is_negative_zero", || {
        let mut stage = Stage::<Validation>::mount(ValidityProps::new(Some(false)))?;
        ensure!(stage.data_state() == "invalid");

        let snapshot = stage.render(ValidityProps::new(None));
        ensure!(snapshot.observable == Validity::UnvalidatedFromInvalid);
        let signed = snapshot.observable.as_signed();
        ensure!(signed == 0.0 && signed.is_sign_negative(), "got {signed}");
        ensure!(stage.running_animations() == ["boo-test-unvalidating"]);

        stage.advance(1000);
        ensure!(stage.data_state() == "unvalidated");
        ensure!(stage.changes().len() == 1);
        Ok(())
    });

    // Mounting unvalidated starts on the valid side
    suite.add("initial_unvalidated_is_positive_zero", || {
        let stage = Stage::<Validation>::mount(ValidityProps::new(None))?;
        let observable = stage.snapshot().observable;
        ensure!(observable == Validity::UnvalidatedFromValid);
        ensure!(Validity::from_signed(observable.as_signed()) == Some(observable));
        ensure!(stage.running().is_none());
        Ok(())
    });

    // Invalidating, then clearing mid-flight, chains into the -0 flavour
    suite.add("clear_queued_behind_invalidating", || {
        let mut stage = Stage::<Validation>::mount(ValidityProps::new(Some(true)))?;
        stage.render(ValidityProps::new(Some(false)));
        ensure!(stage.running() == Some(Direction::Reverse));

        stage.advance(400);
        stage.render(ValidityProps::new(None));
        ensure!(stage.data_state() == "invalid");
        ensure!(stage.snapshot().pending == Some(Validity::UnvalidatedFromInvalid));

        stage.advance(600);
        ensure!(stage.running() == Some(Direction::Neutral));
        ensure!(stage.snapshot().observable == Validity::UnvalidatedFromInvalid);

        stage.advance(1000);
        let values: Vec<_> = stage.changes().iter().map(|c| c.value).collect();
        ensure!(
            values == [Validity::Invalid, Validity::UnvalidatedFromInvalid],
            "changes {:?}",
            values
        );
        Ok(())
    });

    // The last intent was invalid, but the chained clear leaves a valid control
    suite.add("chained_clear_takes_side_of_shown_state", || {
        let mut stage = Stage::<Validation>::mount(ValidityProps::new(Some(false)))?;
        stage.render(ValidityProps::new(Some(true)));
        stage.advance(300);
        ensure!(stage.data_state() == "valid");

        stage.render(ValidityProps::new(Some(false)));
        stage.render(ValidityProps::new(None));
        ensure!(stage.snapshot().pending == Some(Validity::UnvalidatedFromInvalid));

        stage.advance(700);
        let observable = stage.snapshot().observable;
        ensure!(stage.running() == Some(Direction::Neutral));
        ensure!(observable == Validity::UnvalidatedFromValid, "got {:?}", observable);
        ensure!(observable.as_signed().is_sign_positive());

        stage.advance(1000);
        let values: Vec<_> = stage.changes().iter().map(|c| c.value).collect();
        ensure!(
            values == [Validity::Valid, Validity::UnvalidatedFromValid],
            "changes {:?}",
            values
        );
        Ok(())
    });

    // Auto mode follows the computed validity one tick later
    suite.add("auto_follows_computed", || {
        let mut stage = Stage::<Validation>::mount(ValidityProps::auto(Some(true)))?;
        stage.render(ValidityProps::auto(Some(false)));
        ensure!(stage.data_state() == "valid");

        stage.advance(0);
        ensure!(stage.data_state() == "invalid");

        stage.advance(1000);
        ensure!(stage.changes().len() == 1);
        Ok(())
    });

    suite
}
