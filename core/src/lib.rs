//! Client core for the library catalog REST API.
//!
//! # Overview
//! `ApiClient` issues GET/POST/PUT/DELETE against a base URL, form-encodes
//! write bodies, and turns every non-2xx status into `ApiError::Http`. The
//! four domain services (books, authors, genres, comments) bind endpoint
//! paths to the client and hand typed results to the presentation traits in
//! [`view`].
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`/`HttpResponse`);
//!   the network round trip sits behind the `Transport` trait.
//!   `UreqTransport` is the blocking implementation used by the CLI.
//! - One client per session, shared by the services through `Arc`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod services;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{encode_form, ApiClient};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use services::{AuthorService, BookService, CommentService, GenreService, Outcome};
pub use transport::UreqTransport;
pub use types::{Author, Book, BookDraft, BookForm, Comment, Genre, NewComment};
