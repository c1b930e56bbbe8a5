use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub full_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Author,
    pub genre: Genre,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub book_id: i64,
}

/// Form body of `POST /books` and `PUT /books/{id}`. Every field is
/// required; a missing one is answered with 400.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookParams {
    pub title: Option<String>,
    pub author_id: Option<i64>,
    pub genre_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentParams {
    pub book_id: Option<i64>,
    pub text: Option<String>,
}

#[derive(Clone, Debug)]
struct BookRecord {
    id: i64,
    title: String,
    author_id: i64,
    genre_id: i64,
}

/// In-memory catalog. Ids are issued sequentially and never reused.
#[derive(Debug, Default)]
pub struct Store {
    authors: BTreeMap<i64, Author>,
    genres: BTreeMap<i64, Genre>,
    books: BTreeMap<i64, BookRecord>,
    comments: BTreeMap<i64, Comment>,
    last_book_id: i64,
    last_comment_id: i64,
}

impl Store {
    /// Three authors, three genres, one book per author and a comment on
    /// the first two books.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        for (id, name) in [
            (1, "Frank Herbert"),
            (2, "Ursula K. Le Guin"),
            (3, "Isaac Asimov"),
        ] {
            store.authors.insert(
                id,
                Author {
                    id,
                    full_name: name.to_string(),
                },
            );
        }
        for (id, name) in [(1, "Science Fiction"), (2, "Fantasy"), (3, "Mystery")] {
            store.genres.insert(
                id,
                Genre {
                    id,
                    name: name.to_string(),
                },
            );
        }
        for (title, author_id, genre_id) in [
            ("Dune", 1, 1),
            ("A Wizard of Earthsea", 2, 2),
            ("Foundation", 3, 1),
        ] {
            store.insert_book(title.to_string(), author_id, genre_id);
        }
        store.insert_comment(1, "The spice must flow.".to_string());
        store.insert_comment(2, "A quiet classic.".to_string());
        store
    }

    fn insert_book(&mut self, title: String, author_id: i64, genre_id: i64) -> i64 {
        self.last_book_id += 1;
        let id = self.last_book_id;
        self.books.insert(
            id,
            BookRecord {
                id,
                title,
                author_id,
                genre_id,
            },
        );
        id
    }

    fn insert_comment(&mut self, book_id: i64, text: String) -> Comment {
        self.last_comment_id += 1;
        let comment = Comment {
            id: self.last_comment_id,
            text,
            book_id,
        };
        self.comments.insert(comment.id, comment.clone());
        comment
    }

    fn book(&self, id: i64) -> Option<Book> {
        let record = self.books.get(&id)?;
        Some(Book {
            id: record.id,
            title: record.title.clone(),
            author: self.authors.get(&record.author_id)?.clone(),
            genre: self.genres.get(&record.genre_id)?.clone(),
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::seeded())))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/authors", get(list_authors))
        .route("/genres", get(list_genres))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/book/{id}/comments", get(list_book_comments))
        .route("/comments", post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_authors(State(db): State<Db>) -> Json<Vec<Author>> {
    let store = db.read().await;
    Json(store.authors.values().cloned().collect())
}

async fn list_genres(State(db): State<Db>) -> Json<Vec<Genre>> {
    let store = db.read().await;
    Json(store.genres.values().cloned().collect())
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.keys().filter_map(|id| store.book(*id)).collect())
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, StatusCode> {
    let store = db.read().await;
    store.book(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Validate a book form against the store: 400 for a missing field, 404 for
/// an unknown author or genre.
fn check_book_params(store: &Store, params: BookParams) -> Result<(String, i64, i64), StatusCode> {
    let (Some(title), Some(author_id), Some(genre_id)) =
        (params.title, params.author_id, params.genre_id)
    else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if !store.authors.contains_key(&author_id) || !store.genres.contains_key(&genre_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok((title, author_id, genre_id))
}

async fn create_book(
    State(db): State<Db>,
    Form(params): Form<BookParams>,
) -> Result<Json<Book>, StatusCode> {
    let mut store = db.write().await;
    let (title, author_id, genre_id) = check_book_params(&store, params)?;
    let id = store.insert_book(title, author_id, genre_id);
    tracing::info!(id, "book created");
    store.book(id).map(Json).ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Form(params): Form<BookParams>,
) -> Result<Json<Book>, StatusCode> {
    let mut store = db.write().await;
    let (title, author_id, genre_id) = check_book_params(&store, params)?;
    let record = store.books.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    record.title = title;
    record.author_id = author_id;
    record.genre_id = genre_id;
    tracing::info!(id, "book updated");
    store.book(id).map(Json).ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    if store.books.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.comments.retain(|_, c| c.book_id != id);
    tracing::info!(id, "book deleted");
    StatusCode::NO_CONTENT
}

async fn list_book_comments(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(
        store
            .comments
            .values()
            .filter(|c| c.book_id == id)
            .cloned()
            .collect(),
    )
}

async fn create_comment(
    State(db): State<Db>,
    Form(params): Form<CommentParams>,
) -> Result<Json<Comment>, StatusCode> {
    let (Some(book_id), Some(text)) = (params.book_id, params.text) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let mut store = db.write().await;
    if !store.books.contains_key(&book_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let comment = store.insert_comment(book_id, text);
    tracing::info!(id = comment.id, book_id, "comment created");
    Ok(Json(comment))
}

async fn delete_comment(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    if store.comments.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    tracing::info!(id, "comment deleted");
    StatusCode::NO_CONTENT
}
