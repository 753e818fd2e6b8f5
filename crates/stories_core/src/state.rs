use crate::{sum_comments, AppViewModel, Memo, StoriesAction, Story};

/// Identifies one fetch cycle. Increases monotonically per session.
pub type RequestId = u64;

/// Output of the stories state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoriesState {
    pub items: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl StoriesState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stories: StoriesState,
    draft_query: String,
    confirmed_query: String,
    latest_request: Option<RequestId>,
    next_request_id: RequestId,
    comment_sum: Memo<Vec<Story>, u64>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn stories(&self) -> &StoriesState {
        &self.stories
    }

    pub fn draft_query(&self) -> &str {
        &self.draft_query
    }

    pub fn confirmed_query(&self) -> &str {
        &self.confirmed_query
    }

    /// The fetch cycle whose completion will still be applied, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    pub fn comment_sum(&self) -> u64 {
        self.comment_sum.cached().copied().unwrap_or(0)
    }

    pub fn comment_sum_computations(&self) -> u64 {
        self.comment_sum.computations()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn dispatch(&mut self, action: StoriesAction) {
        let stories = std::mem::take(&mut self.stories);
        self.stories = crate::stories_reducer(stories, action);
        self.mark_dirty();
    }

    pub(crate) fn set_draft_query(&mut self, query: String) -> bool {
        if self.draft_query == query {
            return false;
        }
        self.draft_query = query;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_confirmed_query(&mut self, query: String) -> bool {
        if self.confirmed_query == query {
            return false;
        }
        self.confirmed_query = query;
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request = Some(request_id);
        request_id
    }

    /// Closes the cycle if `request_id` is current. Stale completions return false.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.latest_request != Some(request_id) {
            return false;
        }
        self.latest_request = None;
        true
    }

    pub(crate) fn refresh_comment_sum(&mut self) {
        self.comment_sum
            .get_or_compute(&self.stories.items, |items| sum_comments(items));
    }
}
