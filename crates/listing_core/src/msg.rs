#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Engine attached to the page; run the initial full pass.
    Started,
    /// The container reported newly inserted listing items.
    ItemsInserted { count: usize },
    /// The debounce window opened by the first insertion has closed.
    DebounceElapsed,
    /// Control surface pushed new settings.
    SettingsApplied(crate::EngineSettings),
    /// Control surface asked for counts.
    StatsRequested,
    /// Host navigated to the given listing page.
    Navigated(crate::ListingPage),
}
