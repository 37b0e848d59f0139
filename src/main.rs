#[macro_use]
extern crate rocket;

use std::sync::{Arc, Mutex};

use rocket::data::{ByteUnit, Limits};
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

mod board;
mod boot;
mod config;
mod db;
mod error;
mod images;
mod models;
mod render;
mod routes;
mod store;


use board::Board;
use config::BoardConfig;
use store::sqlite::SqliteStore;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Board</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Board</a></body></html>".to_string())
}

/// Room for the text fields and multipart framing around an image.
const FORM_OVERHEAD: u64 = 64 * 1024;

/// Raise the `file` and `data-form` limits above the board's upload limit,
/// so an oversized image reaches the board's own size check intact.
fn upload_limits(figment: &Figment, max_upload: usize) -> Figment {
    let limits: Limits = figment.extract_inner("limits").unwrap_or_default();
    let file = limits
        .get("file")
        .unwrap_or(Limits::FILE)
        .max(ByteUnit::from(max_upload as u64 + FORM_OVERHEAD));
    let data_form = limits
        .get("data-form")
        .unwrap_or(Limits::DATA_FORM)
        .max(ByteUnit::from(file.as_u64() + FORM_OVERHEAD));

    figment.clone().merge((
        "limits",
        Limits::new().limit("file", file).limit("data-form", data_form),
    ))
}

/// Assemble the application around an already-opened board.
pub fn build(board: Board) -> Rocket<Build> {
    let rocket = rocket::build();
    let figment = upload_limits(rocket.figment(), board.config().max_upload_bytes);

    rocket
        .configure(figment)
        .manage(Mutex::new(board))
        .attach(Template::fairing())
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/", routes![routes::api::health])
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    boot::run();

    let pool = db::init_pool().expect("Failed to initialize database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");
    db::seed_defaults(&pool).expect("Failed to seed default settings");

    let config = BoardConfig::from_settings(&pool);
    log::info!(
        "Storing posts in slot '{}' (edit mode {:?}, quota {} bytes)",
        config.storage_key, config.edit_mode, config.slot_quota_bytes
    );

    let store = Arc::new(SqliteStore::new(pool, config.slot_quota_bytes));
    let board = Board::open(store, config);

    build(board)
}
