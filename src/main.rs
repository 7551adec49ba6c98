#[macro_use]
extern crate rocket;

use log::{info, warn};
use rocket::fairing::AdHoc;
use std::env;

use contour_snake::bot::Bot;
use contour_snake::config::Config;
use contour_snake::debug_logger::DebugLogger;

mod handler;

#[launch]
async fn rocket() -> _ {
    // Hosting services usually hand us `PORT`; Rocket reads `ROCKET_PORT`.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // Default to 'info' unless RUST_LOG says otherwise
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting contour-snake server...");

    let config = Config::load_or_default();
    info!(
        "Scoring mode {:?}, path depth {}, budget {}ms",
        config.strategy.mode,
        config.strategy.path_search_depth,
        config.timing.effective_budget_ms()
    );
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    if config.debug.enabled && !debug_logger.is_enabled() {
        warn!("Debug logging requested but unavailable, continuing without it");
    }
    let bot = Bot::with_debug_logger(config, debug_logger);

    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/contour-snake");
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
