use std::sync::Arc;

use log::{error, info, warn};
use uuid::Uuid;

use crate::config::{BoardConfig, EditMode};
use crate::error::{BoardError, StoreError};
use crate::models::category::Category;
use crate::models::post::{Post, PostForm};
use crate::store::{self, SlotStore};

/// What the submission form currently shows: an edit prefill, or the fields
/// of a rejected submission so the user does not have to type them again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    /// Edit in progress, if any.
    pub editing: Option<EditTarget>,
    /// Image of the post being edited, reused when no new file is uploaded.
    pub stashed_image: Option<String>,
}

impl FormState {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Update this post when the form is submitted.
    InPlace(Uuid),
    /// The post was already removed; submitting creates a new one.
    Reinsert,
}

/// Result of reading the optional image upload.
#[derive(Debug)]
pub enum Upload {
    None,
    Encoded(String),
    Failed(BoardError),
}

#[derive(Debug)]
pub struct Submission {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub upload: Upload,
}

/// Per-card actions, dispatched by post id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
    AddComment(String),
}

impl Action {
    /// Map a route segment to an action. `comment` carries the input text.
    pub fn parse(name: &str, comment: Option<String>) -> Option<Self> {
        match name {
            "edit" => Some(Action::Edit),
            "delete" => Some(Action::Delete),
            "comment" => Some(Action::AddComment(comment.unwrap_or_default())),
            _ => None,
        }
    }
}

/// Outcome of a successful mutation. The in-memory change always stands;
/// `storage_error` is set when writing the slot failed afterwards.
#[derive(Debug)]
pub struct Receipt {
    pub id: Uuid,
    pub storage_error: Option<StoreError>,
}

impl Receipt {
    pub fn is_persisted(&self) -> bool {
        self.storage_error.is_none()
    }
}

/// Owns the post list (newest first) and keeps the slot in sync with it.
pub struct Board {
    store: Arc<dyn SlotStore>,
    config: BoardConfig,
    posts: Vec<Post>,
    form: FormState,
}

impl Board {
    /// Rehydrate the board from the configured slot.
    pub fn open(store: Arc<dyn SlotStore>, config: BoardConfig) -> Self {
        let posts = store::load(store.as_ref(), &config.storage_key);
        info!(
            "Loaded {} post(s) from slot '{}'",
            posts.len(),
            config.storage_key
        );
        Board {
            store,
            config,
            posts,
            form: FormState::default(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Persist the whole list. Used after every mutation.
    pub fn save(&self) -> Result<(), StoreError> {
        store::save(self.store.as_ref(), &self.config.storage_key, &self.posts)
    }

    fn persist(&self, id: Uuid) -> Receipt {
        let storage_error = match self.save() {
            Ok(()) => None,
            Err(e) => {
                error!("Failed to persist posts after change to {}: {}", id, e);
                Some(e)
            }
        };
        Receipt { id, storage_error }
    }

    fn position(&self, id: Uuid) -> Result<usize, BoardError> {
        self.posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(BoardError::NotFound(id))
    }

    /// Form submission: create a post, or finish an edit.
    pub fn submit(&mut self, submission: Submission) -> Result<Receipt, BoardError> {
        let Submission {
            title,
            content,
            category,
            upload,
        } = submission;

        let category = match category {
            Some(c) => c,
            None => {
                self.keep_rejected(title, content, None);
                return Err(BoardError::MissingCategory);
            }
        };

        let image = match upload {
            Upload::Encoded(uri) => Some(uri),
            Upload::None => self.form.stashed_image.clone(),
            Upload::Failed(e) => {
                warn!("Rejected image upload: {}", e);
                self.keep_rejected(title, content, Some(category));
                return Err(e);
            }
        };

        let form = PostForm {
            title,
            content,
            category,
            image,
        };

        let editing = self.form.editing;
        self.form = FormState::default();

        if let Some(EditTarget::InPlace(id)) = editing {
            if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
                post.apply(form);
                info!("Updated post {} in place", id);
                return Ok(self.persist(id));
            }
            warn!("Post {} vanished while being edited, adding it as new", id);
        }

        let post = Post::new(form);
        let id = post.id;
        info!("Created post {} ({})", id, post.category);
        self.posts.insert(0, post);
        Ok(self.persist(id))
    }

    /// Keep a rejected submission's fields on the form. Edit state stays.
    fn keep_rejected(&mut self, title: String, content: String, category: Option<Category>) {
        self.form.title = title;
        self.form.content = content;
        self.form.category = category;
    }

    pub fn dispatch(&mut self, id: Uuid, action: Action) -> Result<Receipt, BoardError> {
        match action {
            Action::Edit => self.begin_edit(id),
            Action::Delete => self.delete(id),
            Action::AddComment(text) => self.add_comment(id, &text),
        }
    }

    /// Prefill the form from a post and stash its image.
    pub fn begin_edit(&mut self, id: Uuid) -> Result<Receipt, BoardError> {
        let idx = self.position(id)?;

        match self.config.edit_mode {
            EditMode::InPlace => {
                let post = &self.posts[idx];
                self.form = FormState {
                    title: post.title.clone(),
                    content: post.content.clone(),
                    category: Some(post.category),
                    editing: Some(EditTarget::InPlace(id)),
                    stashed_image: post.image.clone(),
                };
                info!("Editing post {} in place", id);
                // Nothing changed in the list yet.
                Ok(Receipt {
                    id,
                    storage_error: None,
                })
            }
            EditMode::Reinsert => {
                let post = self.posts.remove(idx);
                self.form = FormState {
                    title: post.title,
                    content: post.content,
                    category: Some(post.category),
                    editing: Some(EditTarget::Reinsert),
                    stashed_image: post.image,
                };
                info!("Removed post {} for re-submission", id);
                Ok(self.persist(id))
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form = FormState::default();
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Receipt, BoardError> {
        let idx = self.position(id)?;
        self.posts.remove(idx);
        if self.form.editing == Some(EditTarget::InPlace(id)) {
            self.form = FormState::default();
        }
        info!("Deleted post {}", id);
        Ok(self.persist(id))
    }

    pub fn add_comment(&mut self, id: Uuid, text: &str) -> Result<Receipt, BoardError> {
        let idx = self.position(id)?;
        if !self.posts[idx].add_comment(text) {
            return Err(BoardError::EmptyComment);
        }
        info!("Added comment to post {}", id);
        Ok(self.persist(id))
    }

    /// Drop every post and delete the slot.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        store::clear(self.store.as_ref(), &self.config.storage_key)?;
        let removed = self.posts.len();
        self.posts.clear();
        self.form = FormState::default();
        info!("Cleared board ({} post(s) removed)", removed);
        Ok(())
    }
}
