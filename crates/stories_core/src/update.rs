use crate::{AppState, Effect, Msg, StoriesAction};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchTermRestored(term) => {
            // Reflects the stored value; writing it back would be redundant.
            state.set_draft_query(term);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            if state.set_draft_query(text.clone()) {
                vec![Effect::PersistSearchTerm(text)]
            } else {
                Vec::new()
            }
        }
        Msg::QuerySubmitted(query) => {
            if !state.set_confirmed_query(query.clone()) || query.is_empty() {
                return finish(state, Vec::new());
            }
            let request_id = state.begin_request();
            state.dispatch(StoriesAction::FetchInit);
            vec![Effect::FetchStories { request_id, query }]
        }
        Msg::StoriesFetched {
            request_id,
            stories,
        } => {
            if state.finish_request(request_id) {
                state.dispatch(StoriesAction::FetchSuccess(stories));
            }
            Vec::new()
        }
        Msg::StoriesFetchFailed { request_id } => {
            if state.finish_request(request_id) {
                state.dispatch(StoriesAction::FetchFailure);
            }
            Vec::new()
        }
        Msg::DeleteClicked(story) => {
            state.dispatch(StoriesAction::RemoveStory(story));
            Vec::new()
        }
        Msg::ActionDispatched(action) => {
            state.dispatch(action);
            Vec::new()
        }
    };

    finish(state, effects)
}

fn finish(mut state: AppState, effects: Vec<Effect>) -> (AppState, Vec<Effect>) {
    state.refresh_comment_sum();
    (state, effects)
}
