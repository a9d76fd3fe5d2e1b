//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, members, stats, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Soma API",
        version = "1.0.0",
        description = "Library Lending Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        members::get_member_books,
        members::get_member_transactions,
        members::get_member_costs,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Transactions
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::create_transaction,
        transactions::update_transaction,
        transactions::return_transaction,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Members
            crate::models::member::Member,
            crate::models::member::MemberCosts,
            crate::models::member::MemberQuery,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Transactions
            crate::models::transaction::BookTransaction,
            crate::models::transaction::TransactionDetails,
            crate::models::transaction::TransactionQuery,
            crate::models::transaction::CreateTransaction,
            crate::models::transaction::UpdateTransaction,
            transactions::ReturnRequest,
            transactions::ReturnResponse,
            // Stats
            crate::services::stats::StatsResponse,
            crate::services::stats::MemberStats,
            crate::services::stats::BookStats,
            crate::services::stats::TransactionStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "members", description = "Member management"),
        (name = "books", description = "Book catalog management"),
        (name = "transactions", description = "Borrowing transactions"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
