use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use rsvp_backend::AppContext;
use rsvp_backend::config::Settings;
use rsvp_backend::handlers;
use rsvp_backend::mailer::SmtpMailer;
use rsvp_backend::sheets::{GoogleSheets, ServiceAccountKey};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Configuration problems abort startup; nothing fails lazily later.
    let settings = Settings::from_env().expect("Invalid configuration");
    let key = ServiceAccountKey::from_file(&settings.service_account_path)
        .expect("Failed to load service account key");

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build HTTP client");

    let sheets = GoogleSheets::new(
        http,
        key,
        settings.spreadsheet_id.clone(),
        settings.append_range.clone(),
        settings.export_sheet.clone(),
    );
    let mailer = SmtpMailer::new(
        &settings.smtp_host,
        settings.smtp_username.clone(),
        settings.smtp_password.clone(),
        timeout,
    )
    .expect("Failed to build SMTP transport");

    let ctx = web::Data::new(AppContext {
        sheets: Arc::new(sheets),
        mailer: Arc::new(mailer),
        admin_email: settings.smtp_username.clone(),
    });

    let origins = settings.allowed_origins.clone();
    let port = settings.port;
    log::info!("Starting server at http://0.0.0.0:{port}");

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .supports_credentials();
        for origin in &origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(ctx.clone())
            .route("/submit-rsvp", web::post().to(handlers::submit_rsvp))
            .route("/api/test", web::get().to(handlers::api_test))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
