//! Ledger session routes.
//!
//! Every mutation answers with the re-rendered ledger. A rejected edit is
//! not an HTTP error: it returns 200 with `applied: false` and the reason.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use nomina_core::ledger::{
    AmountField, Confirmation, GlobalSettings, Ledger, LedgerError, LedgerView, TextField,
};
use nomina_shared::AppError;
use nomina_shared::types::{LedgerSessionId, LineItemId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ApiError, AppState, routes::payroll::reconcile_upload};

/// Creates the ledger session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/sessions", post(create_session))
        .route("/ledger/sessions/blank", post(create_blank_session))
        .route(
            "/ledger/sessions/{session_id}",
            get(get_session).delete(delete_session),
        )
        .route("/ledger/sessions/{session_id}/ingest", post(ingest_upload))
        .route("/ledger/sessions/{session_id}/rows", post(add_row))
        .route("/ledger/sessions/{session_id}/rows/{row_id}", delete(remove_row))
        .route(
            "/ledger/sessions/{session_id}/rows/{row_id}/text",
            patch(edit_text),
        )
        .route(
            "/ledger/sessions/{session_id}/rows/{row_id}/amount",
            patch(edit_amount),
        )
        .route(
            "/ledger/sessions/{session_id}/rows/{row_id}/benefit",
            patch(edit_benefit),
        )
        .route(
            "/ledger/sessions/{session_id}/settings/exchange-rate",
            put(set_exchange_rate),
        )
        .route(
            "/ledger/sessions/{session_id}/settings/uniform-benefit",
            put(set_uniform_benefit),
        )
        .route(
            "/ledger/sessions/{session_id}/settings/apply-uniform",
            post(apply_uniform),
        )
        .route(
            "/ledger/sessions/{session_id}/settings/toggle-allocation",
            post(toggle_allocation),
        )
        .route(
            "/ledger/sessions/{session_id}/settings/toggle-currency",
            post(toggle_currency),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Ledger snapshot with its session id.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Session id.
    pub session_id: LedgerSessionId,
    /// Rendered ledger.
    pub ledger: LedgerView,
}

/// Why an edit was not applied.
#[derive(Debug, Serialize)]
pub struct Rejection {
    /// Machine-readable reason.
    pub code: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl From<LedgerError> for Rejection {
    fn from(err: LedgerError) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a mutating call.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// Whether the ledger changed.
    pub applied: bool,
    /// Reason when not applied.
    pub rejection: Option<Rejection>,
    /// Ledger after the call.
    pub ledger: LedgerView,
}

impl MutationResponse {
    fn from_result(result: Result<(), LedgerError>, ledger: LedgerView) -> Self {
        match result {
            Ok(()) => Self {
                applied: true,
                rejection: None,
                ledger,
            },
            Err(err) => {
                debug!(code = err.error_code(), error = %err, "Ledger edit rejected");
                Self {
                    applied: false,
                    rejection: Some(err.into()),
                    ledger,
                }
            }
        }
    }
}

/// Response for a newly added row.
#[derive(Debug, Serialize)]
pub struct AddRowResponse {
    /// Id of the new row.
    pub row_id: LineItemId,
    /// Ledger after the call.
    pub ledger: LedgerView,
}

/// Response for an upload ingested into a session.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Period token echoed back.
    pub period_id: Option<String>,
    /// Number of rows loaded.
    pub processed_count: usize,
    /// Rows skipped for lacking an identifier.
    pub skipped_missing_key: usize,
    /// Identifiers not found in the directory.
    pub skipped_unmatched: Vec<String>,
    /// Identifiers whose pay could not be computed.
    pub skipped_out_of_range: Vec<String>,
    /// Ledger after the call.
    pub ledger: LedgerView,
}

/// Request body for a text edit.
#[derive(Debug, Deserialize)]
pub struct EditTextRequest {
    /// `name` or `identifier`.
    pub field: TextField,
    /// New value.
    pub value: String,
}

/// Request body for an amount edit.
#[derive(Debug, Deserialize)]
pub struct EditAmountRequest {
    /// `gross_base`, `deduction` or `net`.
    pub field: AmountField,
    /// Raw input in the display currency; blank clears the field.
    pub value: String,
}

/// Request body carrying one raw input.
#[derive(Debug, Deserialize)]
pub struct RawValueRequest {
    /// Raw input; blank clears the value.
    pub value: String,
}

/// Query parameters for row removal.
#[derive(Debug, Deserialize)]
pub struct RemoveRowQuery {
    /// Must be true for the row to be removed.
    #[serde(default)]
    pub confirm: bool,
}

// ============================================================================
// Helpers
// ============================================================================

fn session_not_found(id: LedgerSessionId) -> ApiError {
    ApiError(AppError::NotFound(format!("Ledger session {id}")))
}

fn new_ledger(state: &AppState) -> Ledger {
    Ledger::new(GlobalSettings::with_exchange_rate(
        state.ledger_config.default_exchange_rate,
    ))
}

fn mutate(
    state: &AppState,
    id: LedgerSessionId,
    f: impl FnOnce(&mut Ledger) -> Result<(), LedgerError>,
) -> Result<Json<MutationResponse>, ApiError> {
    let (result, ledger) = state
        .sessions
        .update(id, f)
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(MutationResponse::from_result(result, ledger)))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST `/ledger/sessions` - Start an empty ledger.
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, ledger) = state.sessions.create(new_ledger(&state));
    (StatusCode::CREATED, Json(SessionResponse { session_id, ledger }))
}

/// POST `/ledger/sessions/blank` - Start a ledger with one placeholder row.
async fn create_blank_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let mut ledger = new_ledger(&state);
    ledger.start_blank();
    let (session_id, ledger) = state.sessions.create(ledger);
    (StatusCode::CREATED, Json(SessionResponse { session_id, ledger }))
}

/// GET `/ledger/sessions/{session_id}` - Render a ledger.
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<Json<SessionResponse>, ApiError> {
    let ledger = state
        .sessions
        .view(session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse { session_id, ledger }))
}

/// DELETE `/ledger/sessions/{session_id}` - Discard a ledger.
async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(session_id))
    }
}

/// POST `/ledger/sessions/{session_id}/ingest` - Replace rows with a reconciled upload.
///
/// The ledger is untouched if the upload fails.
async fn ingest_upload(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
    multipart: Multipart,
) -> Result<Json<IngestResponse>, ApiError> {
    if !state.sessions.contains(session_id) {
        return Err(session_not_found(session_id));
    }

    let report = reconcile_upload(&state, multipart).await?;
    let processed_count = report.processed_count();

    let ((), ledger) = state
        .sessions
        .update(session_id, |ledger| ledger.ingest(report.processed))
        .ok_or_else(|| session_not_found(session_id))?;

    info!(session_id = %session_id, rows = processed_count, "Ledger ingested upload");

    Ok(Json(IngestResponse {
        period_id: report.period,
        processed_count,
        skipped_missing_key: report.skipped_missing_key,
        skipped_unmatched: report.skipped_unmatched,
        skipped_out_of_range: report.skipped_out_of_range,
        ledger,
    }))
}

/// POST `/ledger/sessions/{session_id}/rows` - Append a manual row.
async fn add_row(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<(StatusCode, Json<AddRowResponse>), ApiError> {
    let (row_id, ledger) = state
        .sessions
        .update(session_id, Ledger::add_manual_row)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok((StatusCode::CREATED, Json(AddRowResponse { row_id, ledger })))
}

/// DELETE `/ledger/sessions/{session_id}/rows/{row_id}?confirm=true` - Remove a row.
async fn remove_row(
    State(state): State<AppState>,
    Path((session_id, row_id)): Path<(LedgerSessionId, LineItemId)>,
    Query(query): Query<RemoveRowQuery>,
) -> Result<Json<MutationResponse>, ApiError> {
    let confirmation = Confirmation::from(query.confirm);
    let (removed, ledger) = state
        .sessions
        .update(session_id, |ledger| ledger.remove_row(row_id, confirmation))
        .ok_or_else(|| session_not_found(session_id))?;

    let rejection = match (removed, confirmation) {
        (true, _) => None,
        (false, Confirmation::Declined) => Some(Rejection {
            code: "CONFIRMATION_REQUIRED",
            message: "Row removal requires confirm=true".to_string(),
        }),
        (false, Confirmation::Confirmed) => Some(LedgerError::RowNotFound(row_id).into()),
    };

    Ok(Json(MutationResponse {
        applied: removed,
        rejection,
        ledger,
    }))
}

/// PATCH `/ledger/sessions/{session_id}/rows/{row_id}/text` - Edit name or identifier.
async fn edit_text(
    State(state): State<AppState>,
    Path((session_id, row_id)): Path<(LedgerSessionId, LineItemId)>,
    Json(request): Json<EditTextRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.edit_text(row_id, request.field, request.value)
    })
}

/// PATCH `/ledger/sessions/{session_id}/rows/{row_id}/amount` - Edit a linked amount.
async fn edit_amount(
    State(state): State<AppState>,
    Path((session_id, row_id)): Path<(LedgerSessionId, LineItemId)>,
    Json(request): Json<EditAmountRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.edit_amount(row_id, request.field, &request.value)
    })
}

/// PATCH `/ledger/sessions/{session_id}/rows/{row_id}/benefit` - Edit a row benefit.
async fn edit_benefit(
    State(state): State<AppState>,
    Path((session_id, row_id)): Path<(LedgerSessionId, LineItemId)>,
    Json(request): Json<RawValueRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.edit_benefit(row_id, &request.value)
    })
}

/// PUT `/ledger/sessions/{session_id}/settings/exchange-rate` - Set the exchange rate.
async fn set_exchange_rate(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
    Json(request): Json<RawValueRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.set_exchange_rate(&request.value)
    })
}

/// PUT `/ledger/sessions/{session_id}/settings/uniform-benefit` - Set the uniform benefit.
async fn set_uniform_benefit(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
    Json(request): Json<RawValueRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.set_uniform_benefit(&request.value)
    })
}

/// POST `/ledger/sessions/{session_id}/settings/apply-uniform` - Copy the uniform benefit to every row.
async fn apply_uniform(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.apply_uniform_to_all();
        Ok(())
    })
}

/// POST `/ledger/sessions/{session_id}/settings/toggle-allocation` - Flip uniform/per-row.
async fn toggle_allocation(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.toggle_allocation_mode();
        Ok(())
    })
}

/// POST `/ledger/sessions/{session_id}/settings/toggle-currency` - Flip the display currency.
async fn toggle_currency(
    State(state): State<AppState>,
    Path(session_id): Path<LedgerSessionId>,
) -> Result<Json<MutationResponse>, ApiError> {
    mutate(&state, session_id, |ledger| {
        ledger.toggle_display_currency();
        Ok(())
    })
}
