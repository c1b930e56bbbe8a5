//! Domain services: one thin adapter per resource over a shared `ApiClient`.
//!
//! # Design
//! Each service is constructed with an `Arc<ApiClient<T>>`; one client is
//! built per session and handed to every service. A service method runs one
//! sequential request chain (e.g. delete then reload), reports the result to
//! a view, and returns an `Outcome` describing how the chain ended.
//!
//! Reference-data loads (authors, genres) only log failures. Book and
//! comment operations put the failure message in the view's error region.

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;

pub use author::AuthorService;
pub use book::BookService;
pub use comment::CommentService;
pub use genre::GenreService;

use crate::error::ApiError;

/// How a service operation ended.
#[derive(Debug)]
pub enum Outcome {
    Done,
    Failed(ApiError),
    /// Nothing was sent: the user declined the prompt or the input was blank.
    Cancelled,
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use crate::client::ApiClient;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse, Transport};
    use crate::types::{Book, Comment};
    use crate::view::{BookView, CommentView, Confirm, ErrorSink};

    /// Plays back scripted responses in order and keeps every request.
    #[derive(Default)]
    pub struct Scripted {
        responses: RefCell<VecDeque<HttpResponse>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        pub fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            });
            self
        }

        pub fn sent(&self) -> Vec<(String, String, Option<String>)> {
            self.requests
                .borrow()
                .iter()
                .map(|r| (r.method.as_str().to_string(), r.url.clone(), r.body.clone()))
                .collect()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("script exhausted".into()))
        }
    }

    pub fn client(script: Scripted) -> Arc<ApiClient<Scripted>> {
        Arc::new(ApiClient::new("http://test", script))
    }

    /// Records every view call as a short event string.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Vec<String>,
        pub books: Vec<Book>,
        pub comments: Vec<Comment>,
        pub error: Option<String>,
    }

    impl ErrorSink for Recorder {
        fn show_error(&mut self, message: &str) {
            self.events.push("error".into());
            self.error = Some(message.to_string());
        }

        fn hide_error(&mut self) {
            self.events.push("hide-error".into());
            self.error = None;
        }
    }

    impl BookView for Recorder {
        fn set_loading(&mut self, loading: bool) {
            self.events.push(format!("loading={loading}"));
        }

        fn render_books(&mut self, books: &[Book]) {
            self.events.push(format!("books:{}", books.len()));
            self.books = books.to_vec();
        }

        fn render_book_details(&mut self, book: &Book) {
            self.events.push(format!("details:{}", book.id));
        }

        fn populate_book_form(&mut self, book: &Book) {
            self.events.push(format!("form:{}", book.id));
        }

        fn book_saved(&mut self) {
            self.events.push("saved".into());
        }
    }

    impl CommentView for Recorder {
        fn render_comments(&mut self, comments: &[Comment]) {
            self.events.push(format!("comments:{}", comments.len()));
            self.comments = comments.to_vec();
        }

        fn clear_comment_input(&mut self) {
            self.events.push("clear-input".into());
        }
    }

    /// Answers prompts with a fixed value and remembers the question.
    pub struct Answer(pub bool, pub Vec<String>);

    impl Confirm for Answer {
        fn confirm(&mut self, message: &str) -> bool {
            self.1.push(message.to_string());
            self.0
        }
    }

    pub const BOOKS: &str = r#"[
        {"id":1,"title":"Dune","author":{"id":1,"fullName":"Frank Herbert"},"genre":{"id":1,"name":"Science Fiction"}},
        {"id":2,"title":"A Wizard of Earthsea","author":{"id":2,"fullName":"Ursula K. Le Guin"},"genre":{"id":2,"name":"Fantasy"}}
    ]"#;

    pub const DUNE: &str = r#"{"id":1,"title":"Dune","author":{"id":1,"fullName":"Frank Herbert"},"genre":{"id":1,"name":"Science Fiction"}}"#;
}
