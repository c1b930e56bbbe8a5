mod config;
mod terminal;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use library_core::view::{AlwaysConfirm, Confirm};
use library_core::{
    ApiClient, AuthorService, BookDraft, BookService, CommentService, GenreService, Outcome,
    UreqTransport,
};
use tracing_subscriber::EnvFilter;

use config::Config;
use terminal::{PromptConfirm, TerminalView};

#[derive(Debug, Parser)]
#[command(name = "library-cli", version, about = "Browse and edit the library catalog")]
struct Cli {
    /// Backend base URL; overrides LIBRARY_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all books.
    Books,
    /// Show one book with its comments.
    Book { id: i64 },
    /// List authors.
    Authors,
    /// List genres.
    Genres,
    /// Create a book.
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author_id: Option<i64>,
        #[arg(long)]
        genre_id: Option<i64>,
    },
    /// Load a book, overlay the given fields and save it.
    EditBook {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author_id: Option<i64>,
        #[arg(long)]
        genre_id: Option<i64>,
    },
    /// Delete a book.
    DeleteBook { id: i64 },
    /// Comment on a book.
    Comment { book_id: i64, text: String },
    /// Delete a comment and list the remaining comments of its book.
    DeleteComment {
        id: i64,
        #[arg(long = "book")]
        book_id: i64,
    },
}

fn init_tracing() {
    let default_filter = format!("{}=info,library_core=info,ureq=warn", env!("CARGO_CRATE_NAME"));
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load()
        .context("failed to load configuration")?
        .with_base_url(cli.base_url.clone());
    config.validate()?;
    tracing::debug!(base_url = %config.base_url, "configured library client");

    let client = Arc::new(ApiClient::new(&config.base_url, UreqTransport::new()));
    let mut view = TerminalView::new(io::stdout().lock());
    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(PromptConfirm::new(io::stdin().lock(), io::stderr()))
    };

    let outcome = run(cli.command, client, &mut view, &mut confirm)?;
    view.into_inner().flush().context("failed to flush stdout")?;

    Ok(match outcome {
        Outcome::Failed(_) => ExitCode::FAILURE,
        Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
    })
}

fn run<W: Write>(
    command: Command,
    client: Arc<ApiClient<UreqTransport>>,
    view: &mut TerminalView<W>,
    confirm: &mut impl Confirm,
) -> anyhow::Result<Outcome> {
    let books = BookService::new(client.clone());
    let comments = CommentService::new(client.clone());

    let outcome = match command {
        Command::Books => books.load_books(view),
        Command::Book { id } => match books.load_book_details(id, view) {
            Outcome::Done => comments.load_comments(id, view),
            other => other,
        },
        Command::Authors => AuthorService::new(client).load_authors(view),
        Command::Genres => GenreService::new(client).load_genres(view),
        Command::AddBook {
            title,
            author_id,
            genre_id,
        } => {
            let draft = BookDraft {
                id: None,
                title,
                author_id,
                genre_id,
            };
            books.save_book(&draft, view)
        }
        Command::EditBook {
            id,
            title,
            author_id,
            genre_id,
        } => {
            if let Outcome::Failed(e) = books.load_book_for_edit(id, view) {
                return Ok(Outcome::Failed(e));
            }
            let Some(mut draft) = view.editing.take() else {
                bail!("book #{id} was loaded but no edit form was populated");
            };
            if let Some(title) = title {
                draft.title = title;
            }
            if author_id.is_some() {
                draft.author_id = author_id;
            }
            if genre_id.is_some() {
                draft.genre_id = genre_id;
            }
            books.save_book(&draft, view)
        }
        Command::DeleteBook { id } => books.delete_book(id, confirm, view),
        Command::Comment { book_id, text } => comments.add_comment(book_id, &text, view),
        Command::DeleteComment { id, book_id } => {
            comments.delete_comment(id, book_id, confirm, view)
        }
    };
    Ok(outcome)
}
