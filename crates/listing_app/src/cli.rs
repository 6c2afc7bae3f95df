use std::path::PathBuf;

use clap::Parser;
use listing_core::{AppliedAction, EngineSettings, SortPolicy};

use crate::logging::LogDestination;
use crate::persistence::SETTINGS_FILENAME;

/// Reorder a saved job-listing page by status and recency.
#[derive(Debug, Parser)]
#[command(name = "listing-sorter", version)]
pub(crate) struct Cli {
    /// Saved listing page (HTML).
    #[arg(long)]
    pub page: PathBuf,

    /// Extra items appended to the list as if loaded by scrolling, in order.
    #[arg(long = "batch")]
    pub batches: Vec<PathBuf>,

    /// Settings file; created or updated when a setting flag is given.
    #[arg(long, default_value = SETTINGS_FILENAME)]
    pub settings: PathBuf,

    /// RON file describing where items, status and posting time live.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Sort policy: default, recent, viewed-first or viewed-last.
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, value_parser = parse_applied_action)]
    pub applied_action: Option<AppliedAction>,

    #[arg(long)]
    pub highlight_viewed: Option<bool>,

    /// Where to write the reordered page. Without it only stats are printed.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub(crate) fn has_overrides(&self) -> bool {
        self.sort.is_some() || self.applied_action.is_some() || self.highlight_viewed.is_some()
    }

    /// Stored settings with any command-line values laid over them.
    pub(crate) fn merge_into(&self, stored: EngineSettings) -> EngineSettings {
        EngineSettings {
            sort_by: self
                .sort
                .as_deref()
                .map(SortPolicy::from_name)
                .unwrap_or(stored.sort_by),
            applied_action: self.applied_action.unwrap_or(stored.applied_action),
            highlight_viewed: self.highlight_viewed.unwrap_or(stored.highlight_viewed),
        }
    }
}

fn parse_applied_action(raw: &str) -> Result<AppliedAction, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "normal" => Ok(AppliedAction::Normal),
        "dim" => Ok(AppliedAction::Dim),
        "hide" => Ok(AppliedAction::Hide),
        other => Err(format!("expected normal, dim or hide, got {other:?}")),
    }
}
