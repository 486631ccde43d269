//! # omniport
//!
//! Migrates notes from Evernote ENEX exports into the Omnivore read-it-later
//! service, at most once per note across repeated runs.
//!
//! ## Architecture
//!
//! ```text
//! Decoder → Normalizer → Identity → Probe → Publisher → Store
//! ```
//!
//! Each note gets a deterministic identifier derived from its cleaned source
//! URL (or its title when it has none). Notes whose page is still online are
//! saved as links; the others are uploaded with their captured content.
//! Identifiers of published notes are appended to a plain-text dedup cache so
//! later runs skip them.
//!
//! ## Quick Start
//!
//! ```bash
//! # Dry run: parse, classify and report without sending anything
//! omniport -i notes.enex --preview
//!
//! # Publish the first 10 notes
//! omniport -a $OMNIVORE_API_KEY -i notes.enex,more.enex -c 10
//!
//! # Continue after a given note
//! omniport -a $OMNIVORE_API_KEY -i notes.enex -r 39303031-3530-3938-3363-643234666230
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// normalizer, probe, publisher, dedup store.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/omniport/config.toml`.
pub mod config;

/// ENEX decoding into a lazy, multi-file note stream.
pub mod decoder;

/// Core domain models.
///
/// - [`Note`](domain::Note): a decoded note
/// - [`derive_identifier`](domain::derive_identifier): deterministic UUID-shaped IDs
/// - [`ProcessingResult`](domain::ProcessingResult) and
///   [`RunSummary`](domain::RunSummary): per-run reporting
pub mod domain;

/// Tracking-parameter stripping for source URLs.
pub mod normalizer;

/// The per-note migration controller.
pub mod pipeline;

/// Reachability probing.
///
/// - [`Prober`](probe::Prober): async trait for a single probe
/// - [`HttpProber`](probe::HttpProber): reqwest-based implementation
pub mod probe;

/// Save mutations against the Omnivore GraphQL API.
pub mod publisher;

/// Dedup cache of already published identifiers.
///
/// - [`Store`](store::Store): trait
/// - [`TextFileStore`](store::TextFileStore): append-only text file
pub mod store;
