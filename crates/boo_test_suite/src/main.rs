//! Behavior Scenario Runner
//!
//! Command-line tool for running the timed behavior-state scenarios.
//!
//! Usage:
//!   boo-behavior-tests              # Run all scenarios
//!   boo-behavior-tests --filter foo # Run scenarios matching "foo"
//!   boo-behavior-tests --list       # List all scenarios
//!   boo-behavior-tests --verbose    # Also print passing scenarios

use anyhow::Result;
use boo_test_suite::{runner::TestRunner, suites};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--list") {
        println!("Available scenario suites:");
        for suite in suites::all_suites() {
            println!("\n  {}:", suite.name);
            for case in &suite.cases {
                println!("    - {}", case.name);
            }
        }
        return Ok(());
    }

    let filter = args
        .iter()
        .position(|a| a == "--filter")
        .and_then(|i| args.get(i + 1))
        .cloned();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    println!("╔══════════════════════════════════════════╗");
    println!("║        BOO BEHAVIOR STATE SCENARIOS      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut runner = TestRunner::new();
    runner.verbose(verbose);

    for suite in suites::all_suites() {
        runner.add_suite(suite);
    }

    if let Some(ref pattern) = filter {
        println!("Running scenarios matching: {}\n", pattern);
        runner.filter(pattern);
    }

    let (_, summary) = runner.run();
    summary.print_summary();

    if summary.all_passed() {
        println!("\nAll scenarios passed!");
        Ok(())
    } else {
        std::process::exit(1);
    }
}
