//! Member management endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        member::{CreateMember, Member, MemberCosts, MemberQuery, UpdateMember},
        transaction::TransactionDetails,
    },
};

/// Paginated list response
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// List members with search and pagination
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(
        ("name" = Option<String>, Query, description = "Search by name"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of members", body = PaginatedResponse<Member>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
    Query(query): Query<MemberQuery>,
) -> AppResult<Json<PaginatedResponse<Member>>> {
    let (members, total) = state.services.members.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: members,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get member details by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Member>> {
    let member = state.services.members.get_by_id(id).await?;
    Ok(Json(member))
}

/// Create a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Member>)> {
    let created = state.services.members.create(member).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.detail_path())],
        Json(created),
    ))
}

/// Update an existing member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(member): Json<UpdateMember>,
) -> AppResult<Json<Member>> {
    let updated = state.services.members.update(id, member).await?;
    Ok(Json(updated))
}

/// Delete a member and their transactions
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.members.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Books currently held by a member
#[utoipa::path(
    get,
    path = "/members/{id}/books",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Books the member is holding", body = Vec<Book>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_books(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.members.borrowed_books(id).await?;
    Ok(Json(books))
}

/// Borrowing history for a member
#[utoipa::path(
    get,
    path = "/members/{id}/transactions",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member's borrowing history", body = Vec<TransactionDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_transactions(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<TransactionDetails>>> {
    let transactions = state.services.members.transactions(id).await?;
    Ok(Json(transactions))
}

/// Total amount a member owes
#[utoipa::path(
    get,
    path = "/members/{id}/costs",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member cost summary", body = MemberCosts),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_costs(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MemberCosts>> {
    let costs = state.services.members.total_costs(id).await?;
    Ok(Json(costs))
}
