use actix_session::Session;
use actix_web::HttpResponse;

use crate::auth::session;

/// POST /sign-out - drop the session identity
pub async fn sign_out(session: Session) -> HttpResponse {
    session::clear_identity(&session);
    HttpResponse::SeeOther()
        .insert_header(("Location", "/sign-in"))
        .finish()
}
