//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrowing_records, health, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::delete_member,
        // Borrowing records
        borrowing_records::list_records,
        borrowing_records::create_record,
        borrowing_records::return_record,
    ),
    components(
        schemas(
            // Auth
            auth::MessageResponse,
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::BookQuery,
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::MemberDetails,
            crate::models::member::BorrowingHistoryEntry,
            crate::models::member::BorrowedBook,
            // Borrowing records
            crate::models::borrowing_record::BorrowingRecord,
            crate::models::borrowing_record::CreateBorrowingRecord,
            crate::models::borrowing_record::ReturnBorrowingRecord,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "members", description = "Member management"),
        (name = "borrowing_records", description = "Lending ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
