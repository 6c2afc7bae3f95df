use std::time::Duration;

use url::Url;

use crate::EngineSettings;

/// Coalescing window for bursts of inserted items.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Query parameters that change while the user stays on the same list
/// (selected job, tracking ids) and therefore do not identify a page.
const VOLATILE_PARAMS: &[&str] = &["currentjobid", "refid", "trackingid", "origin", "eblid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    PendingReprocess,
}

/// Identity of a listing page, used to decide when the ledger must restart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingPage(String);

impl ListingPage {
    /// Normalize a page URL: lowercase origin, path without trailing slash,
    /// stable (sorted) query without volatile parameters, no fragment.
    pub fn from_url(raw: &str) -> Option<Self> {
        let url = Url::parse(raw.trim()).ok()?;
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !VOLATILE_PARAMS.contains(&key.to_ascii_lowercase().as_str()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        params.sort();

        let mut key = url.origin().ascii_serialization();
        key.push_str(url.path().trim_end_matches('/'));
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            key.push('?');
            key.push_str(&query);
        }
        Some(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State of the change reactor. Holds the settings copy it acts on and the
/// page the current ledger belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorState {
    phase: Phase,
    settings: EngineSettings,
    page: Option<ListingPage>,
    debounce: Duration,
}

impl ReactorState {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_debounce(settings, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(settings: EngineSettings, debounce: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            settings,
            page: None,
            debounce,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn page(&self) -> Option<&ListingPage> {
        self.page.as_ref()
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_settings(&mut self, settings: EngineSettings) {
        self.settings = settings;
    }

    /// Returns true when the page differs from the one previously seen.
    pub(crate) fn enter_page(&mut self, page: ListingPage) -> bool {
        if self.page.as_ref() == Some(&page) {
            return false;
        }
        self.page = Some(page);
        true
    }
}

impl Default for ReactorState {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
