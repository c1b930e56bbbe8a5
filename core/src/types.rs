//! Wire types for the library API.
//!
//! # Design
//! Read types mirror the backend's JSON (camelCase on the wire). Write types
//! are one struct per endpoint and carry only the fields that endpoint
//! accepts; optional fields are left out of the encoded body when unset.
//! The mock-server crate defines its own copies; integration tests catch
//! schema drift between the two.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A book as returned by the API, with its author and genre embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Author,
    pub genre: Genre,
}

/// A comment on a book.
///
/// Backends name the owning book either as a flat `bookId` or as an embedded
/// `book` object; both decode into `book_id`, with `bookId` taking
/// precedence. It is `None` when the payload carries neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "CommentWire")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentWire {
    id: i64,
    text: String,
    book_id: Option<i64>,
    book: Option<BookRef>,
}

/// Only the id of an embedded book matters to a comment.
#[derive(Deserialize)]
struct BookRef {
    id: i64,
}

impl From<CommentWire> for Comment {
    fn from(wire: CommentWire) -> Self {
        Self {
            id: wire.id,
            text: wire.text,
            book_id: wire.book_id.or(wire.book.map(|b| b.id)),
        }
    }
}

/// Book form state as the user edits it. `id` is set when editing an
/// existing book; selections may still be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub id: Option<i64>,
    pub title: String,
    pub author_id: Option<i64>,
    pub genre_id: Option<i64>,
}

impl BookDraft {
    /// Pre-fill a draft from a fetched book, as the edit form does.
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author_id: Some(book.author.id),
            genre_id: Some(book.genre.id),
        }
    }

    pub fn to_form(&self) -> BookForm {
        BookForm {
            title: self.title.clone(),
            author_id: self.author_id,
            genre_id: self.genre_id,
        }
    }
}

/// Body of `POST /books` and `PUT /books/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<i64>,
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub book_id: i64,
    pub text: String,
}
