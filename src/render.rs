//! HTML fragments for the board page. Everything here is a pure function of
//! the post list and form state; the page shell lives in `index.html.tera`.

use crate::board::FormState;
use crate::models::category::Category;
use crate::models::post::Post;

/// Kind of a one-shot notice shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// Maps a flash-cookie kind back to a notice kind.
    pub fn from_flash(kind: &str) -> Self {
        match kind {
            "success" => NoticeKind::Success,
            "warning" => NoticeKind::Warning,
            _ => NoticeKind::Error,
        }
    }

    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Warning => "notice notice-warning",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// Render one post as a card.
pub fn render_card(post: &Post) -> String {
    let mut html = String::new();
    let id = post.id;

    html.push_str(&format!(
        "<div class=\"col-md-6 blog-card\" id=\"post-{}\">\n<div class=\"card p-3\">\n",
        id
    ));

    if post.has_inline_image() {
        if let Some(ref src) = post.image {
            html.push_str(&format!(
                "<img src=\"{}\" class=\"img-fluid mb-2\" alt=\"Blog Image\">\n",
                html_escape(src)
            ));
        }
    }

    html.push_str(&format!("<h3>{}</h3>\n", html_escape(&post.title)));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&post.content)));
    html.push_str(&render_badge(post.category));

    html.push_str(&format!(
        r#"
<div class="blog-actions">
<form method="post" action="/posts/{id}/edit"><button type="submit" class="btn btn-sm edit-blog-btn">Edit</button></form>
<form method="post" action="/posts/{id}/delete"><button type="submit" class="btn btn-sm delete-blog-btn">Delete</button></form>
</div>
"#,
        id = id
    ));

    html.push_str(&render_comments(post));
    html.push_str("</div>\n</div>\n");
    html
}

fn render_badge(category: Category) -> String {
    format!(
        "<span class=\"blog-category {}\">{}</span>\n",
        category.style_token(),
        category.label()
    )
}

fn render_comments(post: &Post) -> String {
    let mut html = String::from("<div class=\"comment-section\">\n<h5>Comments</h5>\n<div class=\"comments\">");
    for comment in &post.comments {
        html.push_str(&format!("<div class=\"comment\">{}</div>", html_escape(comment)));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        r#"<form method="post" action="/posts/{}/comment">
<input type="text" name="comment" class="form-control comment-input" placeholder="Add a comment">
<button type="submit" class="btn btn-secondary btn-sm mt-2 add-comment-btn">Add Comment</button>
</form>
</div>
"#,
        post.id
    ));
    html
}

/// All cards, in list order (newest first).
pub fn render_board(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "<p class=\"empty-board\">No posts yet.</p>\n".to_string();
    }
    posts.iter().map(render_card).collect()
}

/// The submission form, prefilled from `form`.
pub fn render_form(form: &FormState) -> String {
    let mut html = String::new();

    let heading = if form.is_editing() { "Edit Post" } else { "New Post" };
    html.push_str(&format!("<h2>{}</h2>\n", heading));

    html.push_str(&format!(
        r#"<form id="blogForm" method="post" action="/posts" enctype="multipart/form-data">
<input type="text" id="title" name="title" class="form-control mb-2" placeholder="Title" value="{title}">
<textarea id="content" name="content" class="form-control mb-2" placeholder="Write your post">{content}</textarea>
<select id="category" name="category" class="form-select mb-2">
<option value="">Select a category</option>
"#,
        title = html_escape(&form.title),
        content = html_escape(&form.content),
    ));

    for category in Category::ALL {
        let selected = if form.category == Some(category) { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            category.slug(),
            selected,
            category.label()
        ));
    }
    html.push_str("</select>\n");

    html.push_str("<input type=\"file\" id=\"image\" name=\"image\" accept=\"image/*\" class=\"form-control mb-2\">\n");

    if let Some(ref image) = form.stashed_image {
        if image.starts_with("data:image/") {
            html.push_str(&format!(
                "<div class=\"stashed-image\"><img src=\"{}\" alt=\"Current image\"><small>Current image is kept unless you upload a new one.</small></div>\n",
                html_escape(image)
            ));
        }
    }

    let submit_label = if form.is_editing() { "Save Post" } else { "Publish" };
    html.push_str(&format!(
        "<button type=\"submit\" class=\"btn btn-primary\">{}</button>\n</form>\n",
        submit_label
    ));

    if form.is_editing() {
        html.push_str(
            "<form method=\"post\" action=\"/posts/cancel\"><button type=\"submit\" class=\"btn btn-link\">Cancel edit</button></form>\n",
        );
    }

    html
}

/// Alert banner. Errors also raise a blocking browser alert.
pub fn render_notice(kind: NoticeKind, message: &str) -> String {
    let mut html = format!(
        "<div class=\"{}\" role=\"alert\">{}</div>\n",
        kind.class(),
        html_escape(message)
    );
    if kind == NoticeKind::Error {
        html.push_str(&format!("<script>alert({});</script>\n", js_string(message)));
    }
    html
}

/// JSON-quoted string that is safe inside a `<script>` element.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
