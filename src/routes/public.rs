use std::sync::Mutex;
use std::time::Duration;

use rocket::data::Capped;
use rocket::form::{self, Form};
use rocket::fs::TempFile;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::tokio::io::AsyncReadExt;
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;
use log::warn;
use uuid::Uuid;

use super::lock;
use crate::board::{Action, Board, Receipt, Submission, Upload};
use crate::error::BoardError;
use crate::images;
use crate::models::category::Category;
use crate::render::{self, NoticeKind};

// ── Board page ─────────────────────────────────────────

#[get("/")]
pub fn index(board: &State<Mutex<Board>>, flash: Option<FlashMessage<'_>>) -> Template {
    let board = lock(board);

    let notice = flash
        .map(|f| render::render_notice(NoticeKind::from_flash(f.kind()), f.message()))
        .unwrap_or_default();

    let context = json!({
        "site_name": board.config().site_name,
        "post_count": board.posts().len(),
        "notice_html": notice,
        "form_html": render::render_form(board.form()),
        "board_html": render::render_board(board.posts()),
    });

    Template::render("index", &context)
}

// ── Submit ─────────────────────────────────────────────

#[derive(FromForm)]
pub struct PostFormData<'f> {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: form::Result<'f, Option<Capped<TempFile<'f>>>>,
}

/// Longest post title quoted back in a notice; flash messages travel in a cookie.
const NOTICE_TITLE_CHARS: usize = 60;

#[post("/posts", data = "<form>")]
pub async fn posts_submit(
    board: &State<Mutex<Board>>,
    form: Form<PostFormData<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    let category = form.category.as_deref().and_then(Category::parse);

    let (max_bytes, timeout) = {
        let b = lock(board);
        (b.config().max_upload_bytes, b.config().upload_read_timeout)
    };

    // The file is only read once the required category is known to be there.
    let upload = match (category, &form.image) {
        (None, _) | (_, Ok(None)) => Upload::None,
        (Some(_), Err(errors)) => {
            warn!("Rejected image upload: {}", errors);
            Upload::Failed(BoardError::ImageDecode(errors.to_string()))
        }
        (Some(_), Ok(Some(file))) if !file.is_complete() => {
            warn!("Image upload cut off after {} bytes", file.n.written);
            Upload::Failed(BoardError::ImageTooLarge {
                size: file.n.written as usize,
                limit: max_bytes,
            })
        }
        (Some(_), Ok(Some(file))) if file.len() > 0 => {
            read_upload(file, max_bytes, timeout).await
        }
        (Some(_), Ok(Some(_))) => Upload::None,
    };

    let result = lock(board).submit(Submission {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        category,
        upload,
    });

    outcome_flash(result, "Post saved")
}

/// Read the uploaded file and turn it into a data URI, bounded by `timeout`.
async fn read_upload(file: &TempFile<'_>, max_bytes: usize, timeout: Duration) -> Upload {
    let size = file.len() as usize;
    if !images::check_file_size(size, max_bytes) {
        return Upload::Failed(BoardError::ImageTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let declared = file.content_type().map(|ct| ct.to_string());

    let read = async {
        let reader = file.open().await?;
        rocket::tokio::pin!(reader);
        let mut bytes = Vec::with_capacity(size);
        reader.read_to_end(&mut bytes).await?;
        Ok::<_, std::io::Error>(bytes)
    };

    match rocket::tokio::time::timeout(timeout, read).await {
        Ok(Ok(bytes)) => match images::encode_data_uri(&bytes, declared.as_deref(), max_bytes) {
            Ok(uri) => Upload::Encoded(uri),
            Err(e) => Upload::Failed(e),
        },
        Ok(Err(e)) => Upload::Failed(BoardError::ImageDecode(e.to_string())),
        Err(_) => Upload::Failed(BoardError::ImageDecode(format!(
            "reading the file timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

// ── Per-card actions ───────────────────────────────────

#[derive(FromForm)]
pub struct ActionFormData {
    pub comment: Option<String>,
}

#[post("/posts/<id>/<action>", data = "<form>")]
pub fn posts_action(
    board: &State<Mutex<Board>>,
    id: &str,
    action: &str,
    form: Form<ActionFormData>,
) -> Option<Flash<Redirect>> {
    let id = Uuid::parse_str(id).ok()?;
    let action = Action::parse(action, form.into_inner().comment)?;

    let mut board = lock(board);
    let title = board
        .post(id)
        .map(|p| notice_title(&p.title))
        .unwrap_or_default();
    let done = match action {
        Action::Edit => format!("Editing \"{}\"", title),
        Action::Delete => format!("Deleted \"{}\"", title),
        Action::AddComment(_) => "Comment added".to_string(),
    };

    let result = board.dispatch(id, action);
    Some(outcome_flash(result, &done))
}

#[post("/posts/cancel")]
pub fn posts_cancel(board: &State<Mutex<Board>>) -> Redirect {
    lock(board).cancel_edit();
    Redirect::to("/")
}

#[post("/posts/reset")]
pub fn posts_reset(board: &State<Mutex<Board>>) -> Flash<Redirect> {
    match lock(board).reset() {
        Ok(()) => Flash::success(Redirect::to("/"), "All posts removed"),
        Err(e) => Flash::error(Redirect::to("/"), e.to_string()),
    }
}

pub(crate) fn notice_title(title: &str) -> String {
    match title.char_indices().nth(NOTICE_TITLE_CHARS) {
        Some((end, _)) => format!("{}…", &title[..end]),
        None => title.to_string(),
    }
}

/// Translate an action result into a one-shot notice. A failed slot write
/// is reported as a warning; the change itself is kept.
fn outcome_flash(result: Result<Receipt, BoardError>, done: &str) -> Flash<Redirect> {
    match result {
        Ok(receipt) if receipt.is_persisted() => Flash::success(Redirect::to("/"), done),
        Ok(receipt) => {
            let reason = receipt
                .storage_error
                .map(|e| e.to_string())
                .unwrap_or_default();
            Flash::warning(
                Redirect::to("/"),
                format!("{}, but it could not be saved: {}", done, reason),
            )
        }
        Err(e) => Flash::error(Redirect::to("/"), e.to_string()),
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index, posts_submit, posts_action, posts_cancel, posts_reset]
}
