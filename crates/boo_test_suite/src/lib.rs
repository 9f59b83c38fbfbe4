//! Boo Behavior Test Suite
//!
//! Timed scenario tests for behavior states. Every scenario mounts a state on
//! a simulated element whose animations run on a deterministic clock, so
//! "200ms into the disabling animation" means exactly that.
//!
//! # Test Categories
//!
//! - **Domain scenarios**: one suite per behavior domain
//! - **Lifecycle**: guarantees shared by every domain (no spurious flips,
//!   non-interruption, coalescing, idempotence, terminal idle, teardown)

pub mod harness;
pub mod runner;
pub mod suites;

pub use harness::{Change, Stage, TestResult, TEST_PREFIX};
pub use runner::{RunSummary, TestCase, TestRunner, TestSuite};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_pass() {
        let mut runner = TestRunner::new();
        for suite in suites::all_suites() {
            runner.add_suite(suite);
        }

        let (runs, summary) = runner.run();
        assert!(!runs.is_empty());
        assert!(summary.all_passed(), "failures: {:#?}", summary.failures);
    }

    #[test]
    fn test_scenario_names_are_unique() {
        let mut names: Vec<_> = suites::all_suites()
            .into_iter()
            .flat_map(|suite| suite.cases.into_iter().map(|c| format!("{}/{}", c.category, c.name)))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
