//! Property-based tests for ReconciliationService.
//!
//! - Rows without a recognized identifier column never produce a line and
//!   do not affect the other rows.
//! - With `k` unmatched identifiers among `n` candidate rows, exactly
//!   `n - k` lines are produced.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::directory::InMemoryDirectory;
use super::service::ReconciliationService;
use super::types::{CellValue, EmployeeRecord, RawRow, ReconciliationReport};

/// Candidate row for the generated batch.
#[derive(Debug, Clone)]
enum Candidate {
    /// Identifier registered in the directory.
    Registered(u32),
    /// Well-formed identifier with no directory entry.
    Unregistered(u32),
    /// Row whose only columns are not identifier labels.
    Keyless(String),
}

/// Strategy to generate salaries (100.00 to 99,999.99).
fn salary() -> impl Strategy<Value = Decimal> {
    (10_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Registered identifiers are below 1,000,000; unregistered ones above.
fn candidate() -> impl Strategy<Value = Candidate> {
    prop_oneof![
        (1u32..1_000_000).prop_map(Candidate::Registered),
        (1_000_000u32..2_000_000).prop_map(Candidate::Unregistered),
        prop_oneof![Just("TOTAL"), Just("EMPLEADO"), Just("nombre"), Just("C I")]
            .prop_map(|label| Candidate::Keyless(label.to_string())),
    ]
}

fn to_row(candidate: &Candidate) -> RawRow {
    match candidate {
        Candidate::Registered(id) | Candidate::Unregistered(id) => RawRow::new()
            .with("C.I", CellValue::Text(dotted(*id)))
            .with("DEUDA", CellValue::Number(Decimal::ONE)),
        Candidate::Keyless(label) => RawRow::new().with(label.clone(), CellValue::Text("1".into())),
    }
}

/// Formats an identifier with thousands-separator periods.
fn dotted(id: u32) -> String {
    let digits = id.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn directory_for(candidates: &[Candidate], base_salary: Decimal) -> InMemoryDirectory {
    candidates
        .iter()
        .filter_map(|c| match c {
            Candidate::Registered(id) => Some(EmployeeRecord {
                identifier: id.to_string(),
                name: format!("EMPLOYEE {id}"),
                base_salary,
            }),
            _ => None,
        })
        .collect()
}

fn run(rows: Vec<RawRow>, directory: &InMemoryDirectory) -> ReconciliationReport {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(ReconciliationService::default().reconcile(rows, None, directory))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Keyless rows are skipped and counted; the remaining output is the
    /// same as for the batch without them.
    #[test]
    fn prop_keyless_rows_never_emitted(
        candidates in prop::collection::vec(candidate(), 0..30),
        base in salary(),
    ) {
        let directory = directory_for(&candidates, base);
        let keyless = candidates.iter().filter(|c| matches!(c, Candidate::Keyless(_))).count();

        let with_keyless = run(candidates.iter().map(to_row).collect(), &directory);
        let without_keyless = run(
            candidates
                .iter()
                .filter(|c| !matches!(c, Candidate::Keyless(_)))
                .map(to_row)
                .collect(),
            &directory,
        );

        prop_assert_eq!(with_keyless.skipped_missing_key, keyless);
        prop_assert_eq!(&with_keyless.processed, &without_keyless.processed);
    }

    /// Output count equals candidates minus unmatched, in row order.
    #[test]
    fn prop_unmatched_rows_reduce_count_by_k(
        candidates in prop::collection::vec(
            prop_oneof![
                (1u32..1_000_000).prop_map(Candidate::Registered),
                (1_000_000u32..2_000_000).prop_map(Candidate::Unregistered),
            ],
            0..30,
        ),
        base in salary(),
    ) {
        let directory = directory_for(&candidates, base);
        let n = candidates.len();
        let k = candidates.iter().filter(|c| matches!(c, Candidate::Unregistered(_))).count();

        let report = run(candidates.iter().map(to_row).collect(), &directory);

        prop_assert_eq!(report.processed_count(), n - k);
        prop_assert_eq!(report.skipped_unmatched.len(), k);

        let expected: Vec<String> = candidates
            .iter()
            .filter_map(|c| match c {
                Candidate::Registered(id) => Some(id.to_string()),
                _ => None,
            })
            .collect();
        let actual: Vec<String> = report.processed.iter().map(|l| l.identifier.clone()).collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn test_dotted_formatting() {
    assert_eq!(dotted(15_704_205), "15.704.205");
    assert_eq!(dotted(123), "123");
    assert_eq!(dotted(1_000), "1.000");
}
