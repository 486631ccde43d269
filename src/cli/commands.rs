use crate::app::{AppContext, Result};
use crate::cli::Cli;
use crate::decoder::NoteSource;
use crate::domain::RunSummary;
use crate::pipeline::Migrator;

/// Run the migration described by `cli` and return the end-of-run tallies.
pub async fn migrate(ctx: &mut AppContext, cli: &Cli) -> Result<RunSummary> {
    let options = cli.run_options(&ctx.config);
    let files = cli.input_files();

    match options.process_count {
        Some(count) => println!("Only [{}] items will be processed before stopping", count),
        None => println!("All items will be processed (except skipped ones)"),
    }

    if options.preview {
        println!(
            "Preview mode activated : nothing will be sent to OMNIVORE, but full parsing of input file will be done"
        );
    }

    println!(
        "Files to be processed : {}",
        files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "OMNIVORE URL [{}], OMNIVORE APIKey [{}]",
        ctx.config.omnivore.endpoint,
        mask_key(ctx.config.omnivore.api_key.as_deref().unwrap_or_default())
    );
    println!(
        "Dedup cache [{}] ({} known IDs)",
        ctx.store.path().display(),
        ctx.store.len()
    );

    if let Some(marker) = &options.resume_from {
        println!("Only notes *after* this ID will be processed [{}]", marker);
    }

    if !options.skip_ids.is_empty() {
        let mut ids: Vec<&str> = options.skip_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        println!("IDs to be skipped : {}", ids.join(", "));
    }

    let mut migrator = Migrator::new(
        &ctx.normalizer,
        ctx.prober.as_ref(),
        ctx.publisher.as_ref(),
        &mut ctx.store,
        options,
    );
    let outcome = migrator.run(NoteSource::new(files)).await?;
    if outcome.summary.has_errors() {
        tracing::warn!(
            url_errors = outcome.summary.url_errors,
            article_errors = outcome.summary.article_errors,
            "some notes could not be saved and will be retried on the next run"
        );
    }

    Ok(outcome.summary)
}

/// Show only the first four characters of a secret.
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "<none>".to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}
