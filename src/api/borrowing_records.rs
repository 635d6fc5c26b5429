//! Borrowing record (lending ledger) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrowing_record::{BorrowingRecord, CreateBorrowingRecord, ReturnBorrowingRecord},
};

use super::AuthenticatedUser;

/// List all borrowing records
#[utoipa::path(
    get,
    path = "/borrowing_records",
    tag = "borrowing_records",
    responses(
        (status = 200, description = "List of borrowing records", body = Vec<BorrowingRecord>)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowingRecord>>> {
    let records = state.services.lending.list_records().await?;
    Ok(Json(records))
}

/// Borrow a book (open a new record)
#[utoipa::path(
    post,
    path = "/borrowing_records",
    tag = "borrowing_records",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowingRecord,
    responses(
        (status = 201, description = "Borrowing record created", body = BorrowingRecord),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book or member not found"),
        (status = 409, description = "Book is currently borrowed")
    )
)]
pub async fn create_record(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(request): Json<CreateBorrowingRecord>,
) -> AppResult<(StatusCode, Json<BorrowingRecord>)> {
    let created = state.services.lending.borrow(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Return a book (close the record)
#[utoipa::path(
    patch,
    path = "/borrowing_records/{id}",
    tag = "borrowing_records",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Borrowing record ID")
    ),
    request_body = ReturnBorrowingRecord,
    responses(
        (status = 200, description = "Record closed", body = BorrowingRecord),
        (status = 400, description = "Return date before borrow date"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Record already returned")
    )
)]
pub async fn return_record(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ReturnBorrowingRecord>,
) -> AppResult<Json<BorrowingRecord>> {
    let closed = state.services.lending.return_book(id, request).await?;
    Ok(Json(closed))
}
