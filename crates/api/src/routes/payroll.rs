//! Payroll upload route.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use nomina_core::payroll::{ProcessedLine, ReconciliationReport};
use serde::Serialize;

use crate::{ApiError, AppState, upload::PayrollUpload};

/// Creates the payroll routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/payroll/process", post(process_payroll))
}

/// Response for a processed payroll upload.
#[derive(Debug, Serialize)]
pub struct ProcessPayrollResponse {
    /// Human-readable status.
    pub message: &'static str,
    /// Period token echoed back.
    pub period_id: Option<String>,
    /// Number of lines produced.
    pub processed_count: usize,
    /// Rows skipped for lacking an identifier.
    pub skipped_missing_key: usize,
    /// Identifiers not found in the directory.
    pub skipped_unmatched: Vec<String>,
    /// Identifiers whose pay could not be computed.
    pub skipped_out_of_range: Vec<String>,
    /// Lines in workbook order.
    pub processed: Vec<ProcessedLine>,
}

impl From<ReconciliationReport> for ProcessPayrollResponse {
    fn from(report: ReconciliationReport) -> Self {
        Self {
            message: "Processed",
            processed_count: report.processed_count(),
            period_id: report.period,
            skipped_missing_key: report.skipped_missing_key,
            skipped_unmatched: report.skipped_unmatched,
            skipped_out_of_range: report.skipped_out_of_range,
            processed: report.processed,
        }
    }
}

/// Runs reconciliation for an uploaded form against the directory.
pub(crate) async fn reconcile_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<ReconciliationReport, ApiError> {
    let upload = PayrollUpload::from_multipart(multipart).await?;
    let bytes = upload.require_file()?;

    let report = state
        .reconciliation
        .process_workbook(bytes, upload.period_id.clone(), state.directory.as_ref())
        .await?;
    Ok(report)
}

/// POST `/payroll/process` - Reconcile a workbook against the employee directory.
async fn process_payroll(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessPayrollResponse>, ApiError> {
    let report = reconcile_upload(&state, multipart).await?;
    Ok(Json(report.into()))
}
