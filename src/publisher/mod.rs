pub mod graphql;

pub use graphql::GraphqlPublisher;

use async_trait::async_trait;

use crate::app::Result;

/// State every imported note is saved with.
pub const ARCHIVED_STATE: &str = "ARCHIVED";

/// Fields shared by both save mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInput {
    /// Idempotency key understood by the remote service.
    pub client_request_id: String,
    pub url: String,
    /// `YYYY-MM-DD`; omitted from the request when the note had no usable
    /// creation timestamp.
    pub saved_at: Option<String>,
    pub labels: Vec<String>,
    pub source: String,
}

/// Both operations return the service's response body on success.
#[async_trait]
pub trait Publisher {
    /// Save the captured note content (title + body) under `input.url`.
    async fn publish_article(
        &self,
        input: &SaveInput,
        title: &str,
        content: &str,
    ) -> Result<String>;

    /// Save the link only; the service fetches the page itself.
    async fn publish_url(&self, input: &SaveInput) -> Result<String>;
}
