pub mod commands;

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::pipeline::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "omniport")]
#[command(about = "Migrate Evernote ENEX exports into Omnivore", long_about = None)]
pub struct Cli {
    /// Omnivore API key
    #[arg(
        short = 'a',
        long = "api-key",
        visible_alias = "api",
        env = "OMNIVORE_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Omnivore GraphQL HTTP endpoint
    #[arg(short = 'u', long = "url", env = "OMNIVORE_URL")]
    pub url: Option<String>,

    /// Input files, comma separated (like '-i file1.enex,file2.enex')
    #[arg(short, long, value_delimiter = ',')]
    pub input: Vec<String>,

    /// Preview mode: parse and classify everything, send nothing
    #[arg(short, long)]
    pub preview: bool,

    /// ID of the last valid note: only the following notes will be processed
    #[arg(short, long = "resume-from")]
    pub resume_from: Option<String>,

    /// IDs to be skipped, comma separated (like '-s ID1,ID2')
    #[arg(short, long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Number of items to publish before stopping
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Dedup cache file (default: .cache)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Config file (default: ~/.config/omniport/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn tokens(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl Cli {
    pub fn input_files(&self) -> Vec<PathBuf> {
        tokens(&self.input).map(PathBuf::from).collect()
    }

    pub fn skip_ids(&self) -> HashSet<String> {
        tokens(&self.skip).map(String::from).collect()
    }

    pub fn resume_marker(&self) -> Option<String> {
        self.resume_from
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
    }

    /// Command-line values take precedence over the config file.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(key) = &self.api_key {
            config.omnivore.api_key = Some(key.clone());
        }
        if let Some(url) = &self.url {
            config.omnivore.endpoint = url.clone();
        }
        if let Some(cache) = &self.cache {
            config.migration.cache_file = cache.clone();
        }
    }

    pub fn run_options(&self, config: &Config) -> RunOptions {
        RunOptions {
            preview: self.preview,
            resume_from: self.resume_marker(),
            skip_ids: self.skip_ids(),
            process_count: self.count.map(|c| c as usize),
            ..RunOptions::from_config(config)
        }
    }
}
