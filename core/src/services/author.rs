use std::sync::Arc;

use tracing::error;

use crate::client::ApiClient;
use crate::http::Transport;
use crate::services::Outcome;
use crate::types::Author;
use crate::view::{author_option, OptionList};

/// Loads the author picker. Failures are logged and never shown.
pub struct AuthorService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: Transport> AuthorService<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    pub fn load_authors(&self, select: &mut impl OptionList) -> Outcome {
        match self.client.get::<Vec<Author>>("/authors") {
            Ok(authors) => {
                for author in &authors {
                    let (value, label) = author_option(author);
                    select.push_option(value, label);
                }
                Outcome::Done
            }
            Err(e) => {
                error!(error = %e, "error loading authors");
                Outcome::Failed(e)
            }
        }
    }
}
