//! Plain-text rendering of the library views.

use std::io::{BufRead, Write};

use library_core::view::{BookView, CommentView, Confirm, ErrorSink, OptionList};
use library_core::{Book, BookDraft, Comment};

/// Writes every view update as lines of text.
///
/// `editing` holds the draft last loaded by `populate_book_form`, the way
/// the edit form on a page would.
pub struct TerminalView<W: Write> {
    out: W,
    pub editing: Option<BookDraft>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            editing: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> ErrorSink for TerminalView<W> {
    fn show_error(&mut self, message: &str) {
        self.line(&format!("error: {message}"));
    }

    // errors are printed once and never retracted
    fn hide_error(&mut self) {}
}

impl<W: Write> BookView for TerminalView<W> {
    fn set_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "book list");
    }

    fn render_books(&mut self, books: &[Book]) {
        if books.is_empty() {
            self.line("No books.");
            return;
        }
        for book in books {
            self.line(&format!("#{} {}", book.id, book.title));
            self.line(&format!("    Author: {}", book.author.full_name));
            self.line(&format!("    Genre: {}", book.genre.name));
        }
    }

    fn render_book_details(&mut self, book: &Book) {
        self.line(&format!("Id: {}", book.id));
        self.line(&format!("Title: {}", book.title));
        self.line(&format!("Author: {}", book.author.full_name));
        self.line(&format!("Genre: {}", book.genre.name));
    }

    fn populate_book_form(&mut self, book: &Book) {
        self.editing = Some(BookDraft::from_book(book));
    }

    fn book_saved(&mut self) {
        self.line("Book saved.");
    }
}

impl<W: Write> CommentView for TerminalView<W> {
    fn render_comments(&mut self, comments: &[Comment]) {
        if comments.is_empty() {
            self.line("No comments yet.");
            return;
        }
        for comment in comments {
            self.line(&format!("[{}] {}", comment.id, comment.text));
        }
    }

    // no input field on a terminal
    fn clear_comment_input(&mut self) {}
}

impl<W: Write> OptionList for TerminalView<W> {
    fn push_option(&mut self, value: i64, label: &str) {
        self.line(&format!("{value:>4}  {label}"));
    }
}

/// Asks on `out` and reads the answer from `input`; only `y`/`yes` agree.
pub struct PromptConfirm<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.out, "{message} [y/N] ")
            .and_then(|_| self.out.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
