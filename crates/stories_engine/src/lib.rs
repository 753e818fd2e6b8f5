//! Hacker stories engine: remote search on a background runtime.
mod decode;
mod engine;
mod search;
mod types;

pub use decode::decode_hits;
pub use engine::{EngineEvents, EngineHandle};
pub use search::{ReqwestStorySearch, SearchSettings, StorySearch, DEFAULT_SEARCH_URL};
pub use types::{EngineEvent, FailureKind, RequestId, SearchError, StoryHit};
