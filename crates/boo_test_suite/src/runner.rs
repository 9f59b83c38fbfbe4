//! Test runner for executing scenario suites
//!
//! Manages scenario execution, result collection, and reporting.

use crate::harness::TestResult;
use anyhow::Result;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

type ScenarioFn = Box<dyn FnOnce() -> Result<()> + Send>;

/// A single scenario
pub struct TestCase {
    /// Scenario name
    pub name: String,
    /// Scenario category (suite name)
    pub category: String,
    /// Scenario body
    pub test_fn: ScenarioFn,
}

impl TestCase {
    pub fn new<F>(name: &str, category: &str, test_fn: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            test_fn: Box::new(test_fn),
        }
    }
}

/// Result of running a scenario
pub struct TestRun {
    /// Scenario name
    pub name: String,
    /// Scenario category
    pub category: String,
    /// Outcome
    pub result: TestResult,
    /// Time taken
    pub duration: Duration,
}

/// A named collection of scenarios
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Scenarios in this suite
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cases: Vec::new(),
        }
    }

    /// Add a scenario to the suite
    pub fn add<F>(&mut self, name: &str, test_fn: F)
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.cases.push(TestCase::new(name, &self.name, test_fn));
    }
}

/// Summary of a run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<(String, String)>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════╗");
        println!("║           SCENARIO RESULTS SUMMARY       ║");
        println!("╠══════════════════════════════════════════╣");
        println!("║  Passed:  {:>5}                          ║", self.passed);
        println!("║  Failed:  {:>5}                          ║", self.failed);
        println!("║  Total:   {:>5}                          ║", self.total());
        println!("║  Time:    {:>8.2?}                      ║", self.duration);
        println!("╚══════════════════════════════════════════╝");

        if !self.failures.is_empty() {
            println!("\nFailed scenarios:");
            for (name, reason) in &self.failures {
                println!("  ✗ {}: {}", name, reason);
            }
        }
    }
}

/// Runs suites and reports results
#[derive(Default)]
pub struct TestRunner {
    suites: Vec<TestSuite>,
    filter: Option<String>,
    verbose: bool,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a suite
    pub fn add_suite(&mut self, suite: TestSuite) {
        self.suites.push(suite);
    }

    /// Only run scenarios whose `category/name` contains `pattern`
    pub fn filter(&mut self, pattern: &str) {
        self.filter = Some(pattern.to_string());
    }

    /// Print every scenario, not only failures
    pub fn verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Run all selected scenarios
    pub fn run(self) -> (Vec<TestRun>, RunSummary) {
        let start = Instant::now();
        let mut runs = Vec::new();
        let mut summary = RunSummary::default();

        for suite in self.suites {
            for case in suite.cases {
                let full_name = format!("{}/{}", case.category, case.name);
                if let Some(pattern) = &self.filter {
                    if !full_name.contains(pattern.as_str()) {
                        continue;
                    }
                }

                let run = Self::run_case(case);
                match &run.result {
                    TestResult::Passed => {
                        summary.passed += 1;
                        if self.verbose {
                            println!("  ✓ {} ({:.2?})", full_name, run.duration);
                        }
                    }
                    TestResult::Failed { reason } => {
                        summary.failed += 1;
                        println!("  ✗ {}: {}", full_name, reason);
                        summary.failures.push((full_name.clone(), reason.clone()));
                    }
                }
                runs.push(run);
            }
        }

        summary.duration = start.elapsed();
        tracing::info!(
            "{} passed, {} failed in {:.2?}",
            summary.passed,
            summary.failed,
            summary.duration
        );
        (runs, summary)
    }

    fn run_case(case: TestCase) -> TestRun {
        let start = Instant::now();
        let TestCase {
            name,
            category,
            test_fn,
        } = case;

        tracing::debug!("running {}/{}", category, name);
        let result = match panic::catch_unwind(AssertUnwindSafe(test_fn)) {
            Ok(Ok(())) => TestResult::Passed,
            Ok(Err(err)) => TestResult::Failed {
                reason: format!("{err:#}"),
            },
            Err(payload) => TestResult::Failed {
                reason: panic_message(payload.as_ref()),
            },
        };

        TestRun {
            name,
            category,
            result,
            duration: start.elapsed(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
