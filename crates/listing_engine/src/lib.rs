//! Listing engine: page model, classification, reordering and the
//! event-driven engine task.
mod apply;
mod channel;
mod classify;
mod decode;
mod document;
mod engine;
mod layout;
mod pass;
mod persist;
mod store;

pub use apply::apply;
pub use channel::{
    decode_request, encode_response, ApplySettingsResponse, ChannelError, Request, Response,
};
pub use classify::{Classifier, SelectorClassifier};
pub use decode::{decode_snapshot, encode_snapshot, DecodeError, DecodedSnapshot};
pub use document::{ItemId, ListingDocument};
pub use engine::EngineHandle;
pub use layout::{CompiledLayout, LayoutError, PageLayout};
pub use pass::{Clock, EngineConfig, ListingEngine, PassReport};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use store::{MemorySettingsStore, SettingsStore};
