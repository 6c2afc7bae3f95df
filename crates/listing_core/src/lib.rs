//! Listing core: classification rules, order ledger, sort policies and the
//! pure change-reactor state machine.
mod effect;
mod ledger;
mod markers;
mod msg;
pub mod policy;
mod settings;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use ledger::OrderLedger;
pub use markers::{markers_for, Marker, MarkerSet};
pub use msg::Msg;
pub use policy::{order, prepare_ledger, ClassifiedItem};
pub use settings::{AppliedAction, EngineSettings, SortPolicy};
pub use state::{ListingPage, Phase, ReactorState, DEFAULT_DEBOUNCE};
pub use status::{classify_fragments, parse_relative_age, parse_status, Classification, Status};
pub use update::update;
pub use view_model::ListingStats;
