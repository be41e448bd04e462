//! Shared test utilities for episcope.

use std::panic::{RefUnwindSafe, UnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::time::Instant;

use crate::model::Record;

pub mod fixtures;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

/// Run every case, logging each one, and report all failures together.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone + RefUnwindSafe,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E + UnwindSafe + RefUnwindSafe,
{
    let total = cases.len();
    let mut failures = Vec::new();

    for case in cases {
        let start = Instant::now();
        println!("[TEST] {} <- {:?}", case.name, case.input);

        let outcome = catch_unwind(|| test_fn(case.input.clone()));
        let failure = match (outcome, case.should_panic) {
            (Err(_), true) => None,
            (Ok(actual), true) => Some(format!("{}: expected panic, got {actual:?}", case.name)),
            (Err(_), false) => Some(format!("{}: panicked", case.name)),
            (Ok(actual), false) if actual == case.expected => None,
            (Ok(actual), false) => Some(format!(
                "{}: expected {:?}, got {actual:?}",
                case.name, case.expected
            )),
        };

        match failure {
            None => println!("[TEST] PASSED {} ({:?})", case.name, start.elapsed()),
            Some(message) => {
                println!("[TEST] FAILED {message}");
                failures.push(message);
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {total} cases failed:\n{}", failures.len(), failures.join("\n")))
    }
}

/// Path under the crate root, for checked-in fixtures.
pub fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Record keys in order, for comparing result lists.
pub fn keys(records: &[&Record]) -> Vec<String> {
    records.iter().map(|record| record.key().to_string()).collect()
}
