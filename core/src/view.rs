//! Presentation seams the domain services render through.
//!
//! Services never format output themselves; they hand typed data to these
//! traits. The CLI implements them for a terminal, tests implement them as
//! recorders.

use crate::types::{Author, Book, Comment, Genre};

/// A selection control (author or genre picker).
pub trait OptionList {
    fn push_option(&mut self, value: i64, label: &str);
}

/// The error region of a page.
pub trait ErrorSink {
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

pub trait BookView: ErrorSink {
    fn set_loading(&mut self, loading: bool);
    fn render_books(&mut self, books: &[Book]);
    fn render_book_details(&mut self, book: &Book);
    fn populate_book_form(&mut self, book: &Book);
    /// Called after a successful create or update; the list page takes over.
    fn book_saved(&mut self);
}

pub trait CommentView: ErrorSink {
    fn render_comments(&mut self, comments: &[Comment]);
    fn clear_comment_input(&mut self);
}

/// Interactive yes/no prompt shown before destructive operations.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Selection entries for an author list.
pub fn author_option(author: &Author) -> (i64, &str) {
    (author.id, author.full_name.as_str())
}

pub fn genre_option(genre: &Genre) -> (i64, &str) {
    (genre.id, genre.name.as_str())
}

impl OptionList for Vec<(i64, String)> {
    fn push_option(&mut self, value: i64, label: &str) {
        self.push((value, label.to_string()));
    }
}

/// Answers every prompt with `true`, for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}
