use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::services::Outcome;
use crate::types::{Comment, NewComment};
use crate::view::{CommentView, Confirm};

pub const DELETE_COMMENT_PROMPT: &str = "Are you sure you want to delete this comment?";

/// Comments are read per book under `/book/{id}/comments` but written and
/// deleted under `/comments`.
pub struct CommentService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: Transport> CommentService<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    pub fn load_comments(&self, book_id: i64, view: &mut impl CommentView) -> Outcome {
        debug!(book_id, "loading comments");
        match self
            .client
            .get::<Vec<Comment>>(&format!("/book/{book_id}/comments"))
        {
            Ok(comments) => {
                debug!(book_id, count = comments.len(), "comments received");
                view.render_comments(&comments);
                Outcome::Done
            }
            Err(e) => fail(view, "Error loading comments", e),
        }
    }

    /// Blank text (after trimming) sends nothing.
    pub fn add_comment(&self, book_id: i64, text: &str, view: &mut impl CommentView) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Cancelled;
        }
        let body = NewComment {
            book_id,
            text: text.to_string(),
        };
        match self.client.post::<_, JsonValue>("/comments", Some(&body)) {
            Ok(created) => {
                info!(comment_id = ?created.get("id"), book_id, "comment added");
                self.load_comments(book_id, view);
                view.clear_comment_input();
                Outcome::Done
            }
            Err(e) => fail(view, "Error adding comment", e),
        }
    }

    /// `book_id` is the book whose comments are reloaded afterwards.
    pub fn delete_comment(
        &self,
        comment_id: i64,
        book_id: i64,
        confirm: &mut impl Confirm,
        view: &mut impl CommentView,
    ) -> Outcome {
        if !confirm.confirm(DELETE_COMMENT_PROMPT) {
            return Outcome::Cancelled;
        }
        match self
            .client
            .delete::<JsonValue>(&format!("/comments/{comment_id}"))
        {
            Ok(_) => {
                info!(comment_id, book_id, "comment deleted");
                self.load_comments(book_id, view);
                Outcome::Done
            }
            Err(e) => fail(view, "Error deleting comment", e),
        }
    }
}

fn fail(view: &mut impl CommentView, context: &str, e: ApiError) -> Outcome {
    error!(error = %e, "{context}");
    view.show_error(&format!("{context}: {e}"));
    Outcome::Failed(e)
}
