use std::sync::Arc;

use tracing::error;

use crate::client::ApiClient;
use crate::http::Transport;
use crate::services::Outcome;
use crate::types::Genre;
use crate::view::{genre_option, OptionList};

/// Loads the genre picker. Failures are logged and never shown.
pub struct GenreService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: Transport> GenreService<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    pub fn load_genres(&self, select: &mut impl OptionList) -> Outcome {
        match self.client.get::<Vec<Genre>>("/genres") {
            Ok(genres) => {
                for genre in &genres {
                    let (value, label) = genre_option(genre);
                    select.push_option(value, label);
                }
                Outcome::Done
            }
            Err(e) => {
                error!(error = %e, "error loading genres");
                Outcome::Failed(e)
            }
        }
    }
}
