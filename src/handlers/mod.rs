pub mod auth_handlers;
pub mod dashboard;

use actix_web::{HttpResponse, ResponseError, web};

use crate::errors::AppError;

/// Register every route. Shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish()
    }))
    .route("/dashboard", web::get().to(dashboard::index))
    .route("/sign-out", web::post().to(auth_handlers::sign_out))
    .route("/api/v1/dashboard", web::get().to(dashboard::api));
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpResponse {
    AppError::NotFound.error_response()
}
