use crate::{CoreError, StoriesAction, StoriesState};

/// Pure transition function for the story list.
pub fn stories_reducer(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess(items) => StoriesState {
            items,
            is_loading: false,
            is_error: false,
        },
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::RemoveStory(story) => {
            let mut state = state;
            state.items.retain(|item| item.id != story.id);
            state
        }
    }
}

/// Applies a serialized action.
///
/// Unknown or malformed actions abort with an error and produce no state.
pub fn reduce_serialized(state: &StoriesState, raw: &str) -> Result<StoriesState, CoreError> {
    let action = StoriesAction::from_json(raw)?;
    Ok(stories_reducer(state.clone(), action))
}
