use std::sync::Mutex;

use rocket::serde::json::Json;
use rocket::State;

use super::lock;
use crate::board::Board;
use crate::models::post::Post;

// ── Read-only JSON ─────────────────────────────────────

/// The post list in its persisted layout, newest first.
#[get("/posts")]
pub fn posts_json(board: &State<Mutex<Board>>) -> Json<Vec<Post>> {
    Json(lock(board).posts().to_vec())
}

#[get("/health")]
pub fn health() -> &'static str {
    "ok"
}

pub fn routes() -> Vec<rocket::Route> {
    routes![posts_json]
}
