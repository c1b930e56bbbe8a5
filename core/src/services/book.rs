use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::services::Outcome;
use crate::types::{Book, BookDraft};
use crate::view::{BookView, Confirm};

pub const DELETE_BOOK_PROMPT: &str = "Are you sure you want to delete this book?";

/// Full CRUD over `/books`.
pub struct BookService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: Transport> BookService<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    pub fn load_books(&self, view: &mut impl BookView) -> Outcome {
        view.hide_error();
        view.set_loading(true);
        match self.client.get::<Vec<Book>>("/books") {
            Ok(books) => {
                view.render_books(&books);
                view.set_loading(false);
                Outcome::Done
            }
            Err(e) => {
                view.set_loading(false);
                fail(view, "Error loading books", e)
            }
        }
    }

    pub fn load_book_details(&self, book_id: i64, view: &mut impl BookView) -> Outcome {
        match self.client.get::<Book>(&format!("/books/{book_id}")) {
            Ok(book) => {
                view.render_book_details(&book);
                Outcome::Done
            }
            Err(e) => fail(view, "Error loading book details", e),
        }
    }

    pub fn load_book_for_edit(&self, book_id: i64, view: &mut impl BookView) -> Outcome {
        match self.client.get::<Book>(&format!("/books/{book_id}")) {
            Ok(book) => {
                view.populate_book_form(&book);
                Outcome::Done
            }
            Err(e) => fail(view, "Error loading book for edit", e),
        }
    }

    /// Update when the draft has an id, create otherwise. Either way only
    /// `title`, `authorId` and `genreId` go over the wire.
    pub fn save_book(&self, draft: &BookDraft, view: &mut impl BookView) -> Outcome {
        let form = draft.to_form();
        let result: Result<Book, ApiError> = match draft.id {
            Some(id) => self.client.put(&format!("/books/{id}"), &form),
            None => self.client.post("/books", Some(&form)),
        };
        match result {
            Ok(book) => {
                info!(book_id = book.id, title = %book.title, "book saved");
                view.book_saved();
                Outcome::Done
            }
            Err(e) => fail(view, "Error saving book", e),
        }
    }

    pub fn delete_book(
        &self,
        book_id: i64,
        confirm: &mut impl Confirm,
        view: &mut impl BookView,
    ) -> Outcome {
        if !confirm.confirm(DELETE_BOOK_PROMPT) {
            return Outcome::Cancelled;
        }
        match self.client.delete::<JsonValue>(&format!("/books/{book_id}")) {
            Ok(_) => {
                info!(book_id, "book deleted");
                self.load_books(view);
                Outcome::Done
            }
            Err(e) => fail(view, "Error deleting book", e),
        }
    }
}

fn fail(view: &mut impl BookView, context: &str, e: ApiError) -> Outcome {
    error!(error = %e, "{context}");
    view.show_error(&format!("{context}: {e}"));
    Outcome::Failed(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{client, Answer, Recorder, Scripted, BOOKS, DUNE};

    #[test]
    fn load_books_renders_between_loading_states() {
        let service = BookService::new(client(Scripted::default().reply(200, BOOKS)));
        let mut view = Recorder::default();

        assert!(service.load_books(&mut view).is_done());
        assert_eq!(
            view.events,
            vec!["hide-error", "loading=true", "books:2", "loading=false"]
        );
        assert_eq!(view.books[1].author.full_name, "Ursula K. Le Guin");
    }

    #[test]
    fn load_books_failure_shows_message() {
        let service = BookService::new(client(Scripted::default().reply(503, "")));
        let mut view = Recorder::default();

        let outcome = service.load_books(&mut view);

        assert_eq!(outcome.error().and_then(|e| e.status()), Some(503));
        assert_eq!(
            view.error.as_deref(),
            Some("Error loading books: HTTP error! status: 503")
        );
        assert_eq!(view.events, vec!["hide-error", "loading=true", "loading=false", "error"]);
    }

    #[test]
    fn details_404_reports_without_rendering() {
        let service = BookService::new(client(Scripted::default().reply(404, DUNE)));
        let mut view = Recorder::default();

        service.load_book_details(42, &mut view);

        assert_eq!(view.events, vec!["error"]);
        assert_eq!(
            view.error.as_deref(),
            Some("Error loading book details: HTTP error! status: 404")
        );
    }

    #[test]
    fn edit_populates_form() {
        let service = BookService::new(client(Scripted::default().reply(200, DUNE)));
        let mut view = Recorder::default();

        assert!(service.load_book_for_edit(1, &mut view).is_done());
        assert_eq!(view.events, vec!["form:1"]);
    }

    #[test]
    fn save_without_id_posts_projection() {
        let client = client(Scripted::default().reply(200, DUNE));
        let service = BookService::new(client.clone());
        let mut view = Recorder::default();
        let draft = BookDraft {
            id: None,
            title: "Dune".to_string(),
            author_id: Some(3),
            genre_id: Some(1),
        };

        assert!(service.save_book(&draft, &mut view).is_done());
        assert_eq!(
            client.transport().sent(),
            vec![(
                "POST".to_string(),
                "http://test/books".to_string(),
                Some("title=Dune&authorId=3&genreId=1".to_string())
            )]
        );
        assert_eq!(view.events, vec!["saved"]);
    }

    #[test]
    fn save_with_id_puts_to_book_path() {
        let client = client(Scripted::default().reply(200, DUNE));
        let service = BookService::new(client.clone());
        let mut view = Recorder::default();
        let draft = BookDraft {
            id: Some(1),
            title: "Dune".to_string(),
            author_id: Some(1),
            genre_id: Some(1),
        };

        service.save_book(&draft, &mut view);

        let sent = client.transport().sent();
        assert_eq!(sent[0].0, "PUT");
        assert_eq!(sent[0].1, "http://test/books/1");
        assert_eq!(sent[0].2.as_deref(), Some("title=Dune&authorId=1&genreId=1"));
    }

    #[test]
    fn save_failure_surfaces_message() {
        let service = BookService::new(client(Scripted::default().reply(400, "")));
        let mut view = Recorder::default();
        let draft = BookDraft {
            title: "No author".to_string(),
            ..Default::default()
        };

        let outcome = service.save_book(&draft, &mut view);

        assert!(matches!(outcome, Outcome::Failed(ApiError::Http { status: 400 })));
        assert_eq!(
            view.error.as_deref(),
            Some("Error saving book: HTTP error! status: 400")
        );
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let client = client(Scripted::default());
        let service = BookService::new(client.clone());
        let mut view = Recorder::default();
        let mut confirm = Answer(false, Vec::new());

        let outcome = service.delete_book(1, &mut confirm, &mut view);

        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(confirm.1, vec![DELETE_BOOK_PROMPT.to_string()]);
        assert!(client.transport().sent().is_empty());
    }

    #[test]
    fn delete_then_reloads_list() {
        let client = client(Scripted::default().reply(204, "").reply(200, BOOKS));
        let service = BookService::new(client.clone());
        let mut view = Recorder::default();

        let outcome = service.delete_book(3, &mut Answer(true, Vec::new()), &mut view);

        assert!(outcome.is_done());
        let sent = client.transport().sent();
        assert_eq!(sent[0].0, "DELETE");
        assert_eq!(sent[0].1, "http://test/books/3");
        assert_eq!(sent[1].0, "GET");
        assert_eq!(sent[1].1, "http://test/books");
        assert!(view.events.contains(&"books:2".to_string()));
    }

    #[test]
    fn delete_failure_skips_reload() {
        let client = client(Scripted::default().reply(404, ""));
        let service = BookService::new(client.clone());
        let mut view = Recorder::default();

        service.delete_book(3, &mut Answer(true, Vec::new()), &mut view);

        assert_eq!(client.transport().sent().len(), 1);
        assert_eq!(
            view.error.as_deref(),
            Some("Error deleting book: HTTP error! status: 404")
        );
    }
}
