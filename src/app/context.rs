use std::sync::Arc;

use crate::app::error::{MigrateError, Result};
use crate::config::Config;
use crate::normalizer::UrlNormalizer;
use crate::probe::{HttpProber, Prober};
use crate::publisher::{GraphqlPublisher, Publisher};
use crate::store::TextFileStore;

pub struct AppContext {
    pub config: Config,
    pub normalizer: UrlNormalizer,
    pub prober: Arc<dyn Prober + Send + Sync>,
    pub publisher: Arc<dyn Publisher + Send + Sync>,
    pub store: TextFileStore,
}

impl AppContext {
    /// Wire up all components from `config`.
    ///
    /// An API key is only mandatory when something will actually be
    /// published, so preview runs can go without one.
    pub fn new(config: Config, require_api_key: bool) -> Result<Self> {
        let api_key = match config.omnivore.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ if require_api_key => return Err(MigrateError::MissingApiKey),
            _ => String::new(),
        };

        let normalizer =
            UrlNormalizer::with_extra_patterns(&config.migration.extra_tracking_patterns)?;
        let prober: Arc<dyn Prober + Send + Sync> = Arc::new(HttpProber::new(&config.http)?);
        let publisher: Arc<dyn Publisher + Send + Sync> = Arc::new(GraphqlPublisher::new(
            &config.omnivore.endpoint,
            &api_key,
            &config.http,
        )?);
        let store = TextFileStore::open(&config.migration.cache_file);

        Ok(Self {
            config,
            normalizer,
            prober,
            publisher,
            store,
        })
    }
}
