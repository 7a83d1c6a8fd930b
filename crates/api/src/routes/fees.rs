//! Fee routes: fee schedules and the payment ledger.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use crate::routes::support::{forbidden, internal_error, json_error, load_principal};
use scholaris_core::grading::Term;
use scholaris_db::entities::sea_orm_active_enums::FeeType;
use scholaris_db::repositories::fee::{
    ApplyPaymentInput, CreateFeeStructureInput, FeeRepoError, FeeRepository,
};

/// Creates the fee routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fee-structures", get(list_structures))
        .route("/fee-structures", post(create_structure))
        .route("/fee-payments", get(list_payments))
        .route("/fee-payments", post(apply_payment))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a fee structure.
#[derive(Debug, Deserialize)]
pub struct CreateFeeStructureRequest {
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Grade level.
    pub grade: i32,
    /// Fee type: tuition, examination, transport, hostel, other.
    pub fee_type: String,
    /// Required amount.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Query parameters for listing fee structures.
#[derive(Debug, Deserialize)]
pub struct StructuresQuery {
    /// Restrict to one academic year.
    pub academic_year_id: Option<Uuid>,
}

/// Request body for applying a payment.
#[derive(Debug, Deserialize)]
pub struct ApplyPaymentRequest {
    /// Student profile ID.
    pub student_id: Uuid,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Term: first, second, third.
    pub term: String,
    /// Advisory fee structure reference.
    pub fee_structure_id: Option<Uuid>,
    /// Incoming payment amount.
    pub amount_paid: Decimal,
    /// Caller-supplied total; used only as a fallback.
    pub total_amount: Option<Decimal>,
    /// Due date for the ledger row.
    pub due_date: Option<NaiveDate>,
    /// Payment method.
    pub payment_method: Option<String>,
    /// External transaction reference.
    pub transaction_id: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// Response for a ledger row.
#[derive(Debug, Serialize)]
pub struct FeePaymentResponse {
    /// Ledger row ID.
    pub id: Uuid,
    /// Student profile ID.
    pub student_id: Uuid,
    /// Academic year ID.
    pub academic_year_id: Uuid,
    /// Term.
    pub term: String,
    /// Accumulated amount paid.
    pub amount_paid: String,
    /// Authoritative full amount.
    pub total_amount: String,
    /// Derived status.
    pub status: String,
    /// Last payment timestamp.
    pub payment_date: String,
    /// Due date.
    pub due_date: String,
    /// Payment method.
    pub payment_method: Option<String>,
    /// Transaction reference.
    pub transaction_id: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_fee_type(s: &str) -> Option<FeeType> {
    match s.to_lowercase().as_str() {
        "tuition" => Some(FeeType::Tuition),
        "examination" => Some(FeeType::Examination),
        "transport" => Some(FeeType::Transport),
        "hostel" => Some(FeeType::Hostel),
        "other" => Some(FeeType::Other),
        _ => None,
    }
}

fn payment_response(model: scholaris_db::entities::fee_payments::Model) -> FeePaymentResponse {
    FeePaymentResponse {
        id: model.id,
        student_id: model.student_id,
        academic_year_id: model.academic_year_id,
        term: Term::from(model.term).as_str().to_string(),
        amount_paid: model.amount_paid.to_string(),
        total_amount: model.total_amount.to_string(),
        status: scholaris_core::fees::PaymentStatus::from(model.status)
            .as_str()
            .to_string(),
        payment_date: model.payment_date.to_rfc3339(),
        due_date: model.due_date.to_string(),
        payment_method: model.payment_method,
        transaction_id: model.transaction_id,
        remarks: model.remarks,
    }
}

fn map_fee_error(e: FeeRepoError) -> axum::response::Response {
    match e {
        FeeRepoError::InvalidAmount(err) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", &err.to_string())
        }
        FeeRepoError::InvalidTerm(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", &e.to_string())
        }
        FeeRepoError::StudentNotFound(_)
        | FeeRepoError::AcademicYearNotFound(_)
        | FeeRepoError::StructureNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        FeeRepoError::DuplicateStructure => {
            json_error(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        FeeRepoError::Database(err) => internal_error("Fee operation failed", &err),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /fee-structures - List fee schedules.
async fn list_structures(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StructuresQuery>,
) -> impl IntoResponse {
    if let Err(response) = load_principal(&state, auth.user_id()).await {
        return response;
    }

    let repo = FeeRepository::new((*state.db).clone());
    match repo.list_structures(query.academic_year_id).await {
        Ok(structures) => (StatusCode::OK, Json(structures)).into_response(),
        Err(e) => map_fee_error(e),
    }
}

/// POST /fee-structures - Create a fee schedule entry.
async fn create_structure(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateFeeStructureRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_manage_records() {
        return forbidden("Only admin or management can manage fee structures");
    }

    let Some(fee_type) = parse_fee_type(&payload.fee_type) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized fee type: {}", payload.fee_type),
        );
    };

    if payload.amount < Decimal::ZERO {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "amount must not be negative",
        );
    }

    let repo = FeeRepository::new((*state.db).clone());
    match repo
        .create_structure(CreateFeeStructureInput {
            academic_year_id: payload.academic_year_id,
            grade: payload.grade,
            fee_type,
            amount: payload.amount,
            description: payload.description,
        })
        .await
    {
        Ok(structure) => (StatusCode::CREATED, Json(structure)).into_response(),
        Err(e) => map_fee_error(e),
    }
}

/// GET /fee-payments - List ledger rows visible to the caller.
async fn list_payments(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let (_, _, scope) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    let repo = FeeRepository::new((*state.db).clone());
    match repo.list_payments(scope).await {
        Ok(payments) => {
            let response: Vec<FeePaymentResponse> =
                payments.into_iter().map(payment_response).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_fee_error(e),
    }
}

/// POST /fee-payments - Apply a payment to the ledger.
///
/// Accumulates into the single (student, year, term) row; the
/// authoritative total is re-resolved from the schedule on every call.
async fn apply_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ApplyPaymentRequest>,
) -> impl IntoResponse {
    let (_, principal, _) = match load_principal(&state, auth.user_id()).await {
        Ok(loaded) => loaded,
        Err(response) => return response,
    };

    if !principal.role.can_record_payments() {
        return forbidden("Only admin or management can register payments");
    }

    let Some(term) = Term::parse(&payload.term) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            &format!("unrecognized term: {}", payload.term),
        );
    };

    let repo = FeeRepository::new((*state.db).clone());
    match repo
        .apply_payment(ApplyPaymentInput {
            student_id: payload.student_id,
            academic_year_id: payload.academic_year_id,
            term,
            fee_structure_id: payload.fee_structure_id,
            amount: payload.amount_paid,
            total_amount: payload.total_amount,
            due_date: payload.due_date,
            payment_method: payload.payment_method,
            transaction_id: payload.transaction_id,
            remarks: payload.remarks,
        })
        .await
    {
        Ok(payment) => {
            info!(
                payment_id = %payment.id,
                student_id = %payment.student_id,
                amount_paid = %payment.amount_paid,
                status = ?payment.status,
                "Payment applied"
            );
            (StatusCode::OK, Json(payment_response(payment))).into_response()
        }
        Err(e) => map_fee_error(e),
    }
}
