use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// One blog entry. `id` only lives in memory; the persisted record is
/// `{title, content, category, image, comments}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub image: Option<String>,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// Fields taken from the submission form.
#[derive(Debug, Clone)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub image: Option<String>,
}

impl Post {
    pub fn new(form: PostForm) -> Self {
        Post {
            id: Uuid::new_v4(),
            title: form.title,
            content: form.content,
            category: form.category,
            image: form.image,
            comments: Vec::new(),
        }
    }

    /// Overwrite the editable fields, keeping id and comments.
    pub fn apply(&mut self, form: PostForm) {
        self.title = form.title;
        self.content = form.content;
        self.category = form.category;
        self.image = form.image;
    }

    /// Append a comment. Returns false when the trimmed text is empty.
    pub fn add_comment(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.comments.push(text.to_string());
        true
    }

    /// Only inline `data:image/...` URIs are rendered as images.
    pub fn has_inline_image(&self) -> bool {
        self.image
            .as_deref()
            .map(|src| src.starts_with("data:image/"))
            .unwrap_or(false)
    }
}
