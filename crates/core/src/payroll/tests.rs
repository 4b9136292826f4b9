//! End-to-end tests for the reconciliation pipeline on generated workbooks.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_xlsxwriter::Workbook;

use super::directory::{EmployeeDirectory, InMemoryDirectory};
use super::error::PayrollError;
use super::service::ReconciliationService;
use super::types::{EmployeeRecord, ProcessedLine};

/// A data row of the generated sheet: identifier cell text and optional debt.
struct SheetRow<'a> {
    identifier: Option<&'a str>,
    name: &'a str,
    debt: Option<f64>,
}

fn row<'a>(identifier: &'a str, debt: Option<f64>) -> SheetRow<'a> {
    SheetRow {
        identifier: Some(identifier),
        name: "EMPLEADO",
        debt,
    }
}

/// Builds a workbook laid out like the bakery export: three title rows,
/// a spacer, the label row at index 4, then data.
fn workbook_bytes(key_label: &str, rows: &[SheetRow<'_>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "PANADERIA DONA AURORA C.A.").unwrap();
    sheet.write_string(1, 0, "RIF: J-00000000-0").unwrap();
    sheet.write_string(2, 0, "NOMINA QUINCENAL").unwrap();
    sheet.write_string(4, 0, key_label).unwrap();
    sheet.write_string(4, 1, "EMPLEADO").unwrap();
    sheet.write_string(4, 2, "DEUDA").unwrap();

    for (offset, data) in rows.iter().enumerate() {
        let r = 5 + u32::try_from(offset).unwrap();
        if let Some(identifier) = data.identifier {
            sheet.write_string(r, 0, identifier).unwrap();
        }
        sheet.write_string(r, 1, data.name).unwrap();
        if let Some(debt) = data.debt {
            sheet.write_number(r, 2, debt).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn employee(identifier: &str, name: &str, base_salary: Decimal) -> EmployeeRecord {
    EmployeeRecord {
        identifier: identifier.to_string(),
        name: name.to_string(),
        base_salary,
    }
}

fn directory() -> InMemoryDirectory {
    [
        employee("123", "AMILCAR MORILLO", dec!(5000)),
        employee("9508834", "EDGAR MORILLO", dec!(5000)),
        employee("16840985", "ALEXANDER CASTILLO", dec!(3000)),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_scenario_dotted_identifier_with_debt() {
    let bytes = workbook_bytes("C.I", &[row("1.2.3", Some(100.0))]);

    let report = ReconciliationService::default()
        .process_workbook(&bytes, Some("1".into()), &directory())
        .await
        .unwrap();

    assert_eq!(
        report.processed,
        vec![ProcessedLine {
            name: "AMILCAR MORILLO".into(),
            identifier: "123".into(),
            net: dec!(2315),
            debt_deducted: dec!(100),
        }]
    );
    assert_eq!(report.period.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_row_order_preserved_and_skips_counted() {
    let bytes = workbook_bytes(
        "C.I ",
        &[
            row("16.840.985", None),
            row("777", Some(5.0)),
            SheetRow {
                identifier: None,
                name: "TOTAL",
                debt: Some(999.0),
            },
            row("9.508.834", Some(-20.0)),
        ],
    );

    let report = ReconciliationService::default()
        .process_workbook(&bytes, None, &directory())
        .await
        .unwrap();

    let identifiers: Vec<&str> = report.processed.iter().map(|l| l.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["16840985", "9508834"]);
    assert_eq!(report.processed_count(), 2);
    assert_eq!(report.skipped_missing_key, 1);
    assert_eq!(report.skipped_unmatched, vec!["777".to_string()]);

    // 3000/2 + 40 - 60 - 15 = 1465, no debt column value
    assert_eq!(report.processed[0].net, dec!(1465));
    assert_eq!(report.processed[0].debt_deducted, dec!(0));
    // Negative debt is not withheld.
    assert_eq!(report.processed[1].net, dec!(2415));
    assert_eq!(report.processed[1].debt_deducted, dec!(0));
}

#[tokio::test]
async fn test_sheet_without_identifier_column_processes_nothing() {
    let bytes = workbook_bytes("NOMBRE", &[row("123", Some(1.0))]);

    let report = ReconciliationService::default()
        .process_workbook(&bytes, None, &directory())
        .await
        .unwrap();

    assert!(report.processed.is_empty());
    assert_eq!(report.skipped_missing_key, 1);
}

#[tokio::test]
async fn test_gross_reconstructs_from_net_plus_debt() {
    let bytes = workbook_bytes("cedula", &[row("123", Some(250.0))]);

    let report = ReconciliationService::default()
        .process_workbook(&bytes, None, &directory())
        .await
        .unwrap();

    let line = &report.processed[0];
    // base + benefit - contributions
    assert_eq!(line.net + line.debt_deducted, dec!(2415));
}

#[tokio::test]
async fn test_malformed_workbook_fails_whole_run() {
    let result = ReconciliationService::default()
        .process_workbook(b"PK\x03\x04 truncated", None, &directory())
        .await;

    assert!(matches!(result, Err(PayrollError::UnreadableWorkbook(_))));
}

/// Directory whose backend is down.
struct FailingDirectory;

#[async_trait]
impl EmployeeDirectory for FailingDirectory {
    async fn lookup(&self, _identifier: &str) -> Result<Option<EmployeeRecord>, PayrollError> {
        Err(PayrollError::Directory("connection refused".into()))
    }
}

#[tokio::test]
async fn test_directory_failure_aborts_run() {
    let bytes = workbook_bytes("C.I", &[row("123", None)]);

    let result = ReconciliationService::default()
        .process_workbook(&bytes, None, &FailingDirectory)
        .await;

    assert!(matches!(result, Err(PayrollError::Directory(_))));
}

#[tokio::test]
async fn test_works_through_trait_object() {
    let bytes = workbook_bytes("C.I", &[row("123", None)]);
    let directory: Box<dyn EmployeeDirectory> = Box::new(directory());

    let report = ReconciliationService::default()
        .process_workbook(&bytes, None, directory.as_ref())
        .await
        .unwrap();

    assert_eq!(report.processed_count(), 1);
}

#[tokio::test]
async fn test_out_of_range_debt_skips_row_without_failing_run() {
    use super::types::{CellValue, RawRow};

    let rows = vec![
        RawRow::new()
            .with("C.I", CellValue::Text("123".into()))
            .with("DEUDA", CellValue::Text("79228162514264337593543950335".into())),
        RawRow::new()
            .with("C.I", CellValue::Text("9.508.834".into()))
            .with("DEUDA", CellValue::Number(dec!(100))),
    ];

    let report = ReconciliationService::default()
        .reconcile(rows, None, &directory())
        .await
        .unwrap();

    assert_eq!(report.skipped_out_of_range, vec!["123".to_string()]);
    assert_eq!(report.processed_count(), 1);
    assert_eq!(report.processed[0].identifier, "9508834");
    assert_eq!(report.processed[0].net, dec!(2315));
}
