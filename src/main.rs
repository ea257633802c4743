use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use prepwise::config::AppConfig;
use prepwise::dashboard::{DashboardAggregator, PgInterviewRepository};
use prepwise::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Configuration error: {e}");
        std::process::exit(1);
    });

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool).await.expect("Failed to run migrations");

    if config.seed_demo {
        if let Err(e) = db::seed_demo(&pool).await {
            log::error!("Demo seed failed: {e}");
        }
    }

    // Must match the key used by the sign-in service so its session cookies decode here.
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let repo = PgInterviewRepository::new(pool.clone()).with_available_limit(config.available_limit);
    let aggregator = web::Data::new(
        DashboardAggregator::new(Arc::new(repo))
            .with_timeout(config.dashboard_timeout)
            .with_guest_policy(config.guest_policy),
    );

    log::info!(
        "Starting server at http://{} (guest policy {:?}, timeout {}ms)",
        config.bind_addr,
        config.guest_policy,
        config.dashboard_timeout.as_millis()
    );

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(aggregator.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
