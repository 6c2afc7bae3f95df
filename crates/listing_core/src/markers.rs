use crate::{AppliedAction, Classification, EngineSettings};

/// Visual marker the engine may attach to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Viewed,
    AppliedDim,
    Hidden,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Viewed, Marker::AppliedDim, Marker::Hidden];

    pub fn class_name(self) -> &'static str {
        match self {
            Marker::Viewed => "listing-sorter-viewed",
            Marker::AppliedDim => "listing-sorter-applied-dim",
            Marker::Hidden => "listing-sorter-hidden",
        }
    }
}

/// Which markers an item carries after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerSet {
    pub viewed: bool,
    pub applied_dim: bool,
    pub hidden: bool,
}

impl MarkerSet {
    pub fn contains(&self, marker: Marker) -> bool {
        match marker {
            Marker::Viewed => self.viewed,
            Marker::AppliedDim => self.applied_dim,
            Marker::Hidden => self.hidden,
        }
    }
}

/// Hide wins over dim, dim wins over nothing; only applied items are affected.
pub fn markers_for(classification: &Classification, settings: &EngineSettings) -> MarkerSet {
    let applied = classification.is_applied();
    MarkerSet {
        viewed: settings.highlight_viewed && classification.is_viewed(),
        applied_dim: applied && settings.applied_action == AppliedAction::Dim,
        hidden: applied && settings.applied_action == AppliedAction::Hide,
    }
}
