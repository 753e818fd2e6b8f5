use crate::{AppState, Story};

/// Maximum number of stories rendered in the list.
pub const LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub comment_sum: u64,
    pub draft_query: String,
    pub confirmed_query: String,
    pub can_submit: bool,
    pub is_loading: bool,
    pub is_error: bool,
    /// Number of stories held, including those beyond [`LIST_LIMIT`].
    pub story_count: usize,
    pub rows: Vec<StoryRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRowView {
    /// 1-based position in the rendered list.
    pub position: usize,
    pub story: Story,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let stories = state.stories();
        let rows = stories
            .items
            .iter()
            .take(LIST_LIMIT)
            .enumerate()
            .map(|(index, story)| StoryRowView {
                position: index + 1,
                story: story.clone(),
            })
            .collect();

        Self {
            comment_sum: state.comment_sum(),
            draft_query: state.draft_query().to_string(),
            confirmed_query: state.confirmed_query().to_string(),
            can_submit: !state.draft_query().is_empty(),
            is_loading: stories.is_loading,
            is_error: stories.is_error,
            story_count: stories.items.len(),
            rows,
        }
    }

    /// Story shown at a 1-based list position.
    pub fn story_at(&self, position: usize) -> Option<&Story> {
        self.rows
            .iter()
            .find(|row| row.position == position)
            .map(|row| &row.story)
    }
}
