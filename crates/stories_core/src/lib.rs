//! Hacker stories core: pure state machine, fetch orchestration and view-model helpers.
mod action;
mod aggregate;
mod effect;
mod error;
mod msg;
mod reducer;
mod search_term;
mod state;
mod story;
mod update;
mod view_model;

pub use action::{ActionKind, StoriesAction};
pub use aggregate::{sum_comments, Memo};
pub use effect::Effect;
pub use error::{CoreError, StoreError};
pub use msg::Msg;
pub use reducer::{reduce_serialized, stories_reducer};
pub use search_term::{MemoryValueStore, SearchTermHolder, ValueStore, SEARCH_TERM_KEY};
pub use state::{AppState, RequestId, StoriesState};
pub use story::Story;
pub use update::update;
pub use view_model::{AppViewModel, StoryRowView, LIST_LIMIT};
