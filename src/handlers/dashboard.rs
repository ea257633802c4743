use actix_session::Session;
use actix_web::{HttpResponse, ResponseError, web};

use crate::dashboard::{DashboardAggregator, SessionIdentityResolver};
use crate::errors::{AppError, render};
use crate::templates_structs::{ApiErrorResponse, DashboardTemplate, PageContext};

/// GET /dashboard - past interviews and the pool open to take
pub async fn index(
    aggregator: web::Data<DashboardAggregator>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let dashboard = aggregator.load(&SessionIdentityResolver::new(&session)).await?;

    let ctx = PageContext::new(&dashboard.viewer);
    render(DashboardTemplate::new(ctx, &dashboard))
}

/// GET /api/v1/dashboard - same data as JSON
pub async fn api(
    aggregator: web::Data<DashboardAggregator>,
    session: Session,
) -> HttpResponse {
    let resolver = SessionIdentityResolver::new(&session);
    match aggregator.load(&resolver).await {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(AppError::Unauthenticated) => {
            HttpResponse::Unauthorized().json(ApiErrorResponse::new("Not authenticated"))
        }
        Err(e) => {
            log::error!("Dashboard API failed: {e}");
            HttpResponse::build(e.status_code()).json(ApiErrorResponse::new("Failed to load dashboard"))
        }
    }
}
