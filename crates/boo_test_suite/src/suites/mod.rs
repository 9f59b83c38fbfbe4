//! Timed scenarios organized by behavior domain

pub mod active;
pub mod disabled;
pub mod focus;
pub mod lifecycle;
pub mod press;
pub mod read_only;
pub mod validity;

use crate::runner::TestSuite;

/// Create all test suites
pub fn all_suites() -> Vec<TestSuite> {
    vec![
        disabled::suite(),
        validity::suite(),
        focus::suite(),
        active::suite(),
        press::suite(),
        read_only::suite(),
        lifecycle::suite(),
    ]
}
