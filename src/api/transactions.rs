//! Borrowing transaction endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::transaction::{
        CreateTransaction, TransactionDetails, TransactionQuery, UpdateTransaction,
    },
};

use super::members::PaginatedResponse;

/// Return request body; the return date defaults to the current time
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    pub date_returned: Option<DateTime<Utc>>,
}

/// Return response with transaction details
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Transaction details
    pub transaction: TransactionDetails,
}

/// List transactions with filters and pagination
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(
        ("member_id" = Option<Uuid>, Query, description = "Filter by member"),
        ("book_id" = Option<Uuid>, Query, description = "Filter by book"),
        ("returned" = Option<bool>, Query, description = "Filter by return state"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of transactions", body = PaginatedResponse<TransactionDetails>)
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<PaginatedResponse<TransactionDetails>>> {
    let (transactions, total) = state.services.transactions.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: transactions,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get transaction details by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction details", body = TransactionDetails),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TransactionDetails>> {
    let transaction = state.services.transactions.get_details(id).await?;
    Ok(Json(transaction))
}

/// Record a borrow (create a transaction)
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Transaction created", body = TransactionDetails),
        (status = 400, description = "Book has no rental cost"),
        (status = 404, description = "Member or book not found")
    )
)]
pub async fn create_transaction(
    State(state): State<crate::AppState>,
    Json(event): Json<CreateTransaction>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<TransactionDetails>)> {
    let created = state.services.transactions.borrow(event).await?;

    tracing::info!("{}", created);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.detail_path())],
        Json(created),
    ))
}

/// Update the return state of a transaction
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    request_body = UpdateTransaction,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionDetails),
        (status = 400, description = "Return date earlier than borrow date"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn update_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(event): Json<UpdateTransaction>,
) -> AppResult<Json<TransactionDetails>> {
    let updated = state.services.transactions.update(id, event).await?;
    Ok(Json(updated))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/transactions/{id}/return",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Transaction not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    body: Option<Json<ReturnRequest>>,
) -> AppResult<Json<ReturnResponse>> {
    let date_returned = body.and_then(|Json(request)| request.date_returned);

    let transaction = state
        .services
        .transactions
        .return_transaction(id, date_returned)
        .await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        transaction,
    }))
}
