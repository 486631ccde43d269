//! Note migration controller.
//!
//! ```text
//! Note → normalize URL → derive identifier → skip / resume gate
//!      → probe → choose mode → publish → record in dedup store
//! ```
//!
//! Notes are handled strictly one after another. All run state lives in a
//! [`RunContext`] owned by [`Migrator::run`].

pub mod context;

pub use context::RunContext;

use std::collections::{HashMap, HashSet};

use crate::app::Result;
use crate::config::{Config, DEFAULT_LABEL, DEFAULT_PLACEHOLDER_URL, DEFAULT_SOURCE};
use crate::domain::{derive_identifier, Note, ProcessingResult, PublishMode, RunSummary, SkipReason};
use crate::normalizer::UrlNormalizer;
use crate::probe::Prober;
use crate::publisher::{Publisher, SaveInput};
use crate::store::Store;

/// Per-run inputs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Classify and report, but never publish or write the dedup store.
    pub preview: bool,
    /// Skip everything up to and including this identifier.
    pub resume_from: Option<String>,
    pub skip_ids: HashSet<String>,
    /// Stop after this many successful publishes.
    pub process_count: Option<usize>,
    pub label: String,
    pub source: String,
    pub placeholder_url: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            preview: false,
            resume_from: None,
            skip_ids: HashSet::new(),
            process_count: None,
            label: DEFAULT_LABEL.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            label: config.migration.label.clone(),
            source: config.migration.source.clone(),
            placeholder_url: config.migration.placeholder_url.clone(),
            ..Default::default()
        }
    }
}

/// What a finished run leaves behind.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub results: HashMap<String, ProcessingResult>,
}

pub struct Migrator<'a> {
    normalizer: &'a UrlNormalizer,
    prober: &'a (dyn Prober + Send + Sync),
    publisher: &'a (dyn Publisher + Send + Sync),
    store: &'a mut dyn Store,
    options: RunOptions,
}

impl<'a> Migrator<'a> {
    pub fn new(
        normalizer: &'a UrlNormalizer,
        prober: &'a (dyn Prober + Send + Sync),
        publisher: &'a (dyn Publisher + Send + Sync),
        store: &'a mut dyn Store,
        options: RunOptions,
    ) -> Self {
        Self {
            normalizer,
            prober,
            publisher,
            store,
            options,
        }
    }

    /// Consume `notes` until it ends or the process-count limit is hit.
    ///
    /// A fatal `Err` coming out of `notes`, or a failed identifier
    /// construction, aborts the run. Other stream errors are logged and the
    /// run continues.
    pub async fn run<I>(&mut self, notes: I) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = Result<Note>>,
    {
        let mut ctx = RunContext::new(self.options.resume_from.as_deref());

        for note in notes {
            let note = match note {
                Ok(note) => note,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable note");
                    continue;
                }
            };
            self.process_note(&mut ctx, &note).await?;

            if ctx.limit_reached(self.options.process_count) {
                println!(
                    "Stopping, as [{}] entries have been processed",
                    ctx.published
                );
                break;
            }
        }

        Ok(RunOutcome {
            summary: ctx.summary(),
            results: ctx.results,
        })
    }

    async fn process_note(&mut self, ctx: &mut RunContext, note: &Note) -> Result<()> {
        let canonical = self.normalizer.normalize(&note.source_url);
        let has_source_url = !canonical.is_empty();
        let (id, url) = if has_source_url {
            (derive_identifier(&canonical)?, canonical)
        } else {
            (
                derive_identifier(&note.title)?,
                self.options.placeholder_url.clone(),
            )
        };

        let skip = self.skip_reason(&id).or_else(|| {
            ctx.awaiting_marker()
                .then_some(SkipReason::BeforeResumeMarker)
        });

        match skip {
            Some(reason) => {
                ctx.results
                    .entry(id.clone())
                    .or_insert_with(|| ProcessingResult::skipped(&id, &url, reason));
                println!();
                println!("{} | SKIPPED ({}) | {}", id, reason, url);
            }
            None => {
                let result = self.migrate(note, &id, &url, has_source_url).await;
                if result.published() {
                    ctx.published += 1;
                    self.store.record(&id);
                }
                ctx.results.insert(id.clone(), result);
            }
        }

        ctx.observe(&id);
        Ok(())
    }

    fn skip_reason(&self, id: &str) -> Option<SkipReason> {
        if self.options.skip_ids.contains(id) {
            Some(SkipReason::SkipList)
        } else if self.store.contains(id) {
            Some(SkipReason::Cache)
        } else {
            None
        }
    }

    async fn migrate(
        &self,
        note: &Note,
        id: &str,
        url: &str,
        has_source_url: bool,
    ) -> ProcessingResult {
        let mut result = ProcessingResult::processed(id, url);
        let saved_at = note.saved_at();
        if saved_at.is_none() {
            tracing::warn!(id, created = %note.created, "unparseable creation timestamp, savedAt omitted");
        }

        println!();
        println!("{} | {} | {}", id, self.options.label, url);

        let mode = if !has_source_url {
            println!("  > [WARNING] No source URL, will save as article");
            PublishMode::Article
        } else {
            let reachability = self.prober.probe(url).await;
            result.still_online = reachability.reachable;
            if reachability.reachable {
                println!("  > [INFO] url [{}] still accessible, will save as URL", url);
                PublishMode::Url
            } else {
                println!(
                    "  > [WARNING] url [{}] is not accessible anymore (error {}), will save as article",
                    url, reachability.status
                );
                PublishMode::Article
            }
        };

        if self.options.preview {
            return result;
        }

        let input = SaveInput {
            client_request_id: id.to_string(),
            url: url.to_string(),
            saved_at,
            labels: vec![self.options.label.clone()],
            source: self.options.source.clone(),
        };

        let outcome = match mode {
            PublishMode::Article => {
                result.processed_as_article = true;
                self.publisher
                    .publish_article(&input, &note.title, &note.content)
                    .await
            }
            PublishMode::Url => {
                result.processed_as_url = true;
                self.publisher.publish_url(&input).await
            }
        };

        match outcome {
            Ok(body) => {
                match mode {
                    PublishMode::Article => result.saved_as_article_successful = true,
                    PublishMode::Url => result.saved_as_url_successful = true,
                }
                println!("  > [INFO] Correctly saved ({:?}) : {}", mode, body);
            }
            Err(e) => {
                println!("  > [ERROR] {}", e);
                tracing::error!(id, url, error = %e, "publish failed");
            }
        }

        result
    }
}
