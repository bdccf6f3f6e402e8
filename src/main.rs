use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use attendance_board::api::ApiClient;
use attendance_board::auth::session::BoardStore;
use attendance_board::config::AppConfig;
use attendance_board::feed::FeedSubscription;
use attendance_board::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(std::io::Error::other)?;
    let api = ApiClient::new(http.clone(), config.backend_base_url.clone(), config.credentials.clone());

    // The feed lives until the server stops.
    let subscription = FeedSubscription::open(http, config.feed_url.clone());
    let feed = subscription.handle();
    let settings = config.board_settings();
    let boards = BoardStore::new();
    let secret_key = config.session_key.clone();

    log::info!("Starting {} at http://{}", config.app_name, config.bind_addr);

    let result = HttpServer::new(move || {
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
            .app_data(web::Data::new(feed.clone()))
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(boards.clone()))
            .app_data(web::Data::new(api.clone()))
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await;

    subscription.close();
    result
}
