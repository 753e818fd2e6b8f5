use crate::{RequestId, StoriesAction, Story};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Draft query loaded from the persistent store at startup.
    SearchTermRestored(String),
    /// User edited the search input.
    InputChanged(String),
    /// User submitted a query; carries the value to confirm.
    QuerySubmitted(String),
    /// Remote search returned stories for a fetch cycle.
    StoriesFetched {
        request_id: RequestId,
        stories: Vec<Story>,
    },
    /// Remote search failed for a fetch cycle.
    StoriesFetchFailed { request_id: RequestId },
    /// User dismissed a story.
    DeleteClicked(Story),
    /// Action relayed straight to the stories reducer.
    ActionDispatched(StoriesAction),
}
