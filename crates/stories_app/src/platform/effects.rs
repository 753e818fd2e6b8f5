use std::sync::mpsc;
use std::thread;

use stories_core::{Effect, Msg, SearchTermHolder, Story, ValueStore};
use stories_engine::{EngineEvent, EngineEvents, EngineHandle, StoryHit};
use stories_logging::{stories_error, stories_info};

use super::app::AppInput;

/// Executes core effects: searches go to the engine, search terms to the store.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    search_term: SearchTermHolder<S>,
}

impl<S: ValueStore> EffectRunner<S> {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        search_term: SearchTermHolder<S>,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Self {
        spawn_event_loop(events, input_tx);
        Self {
            engine,
            search_term,
        }
    }

    pub fn search_term(&self) -> &str {
        self.search_term.read()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchStories { request_id, query } => {
                    self.engine.search(request_id, query);
                }
                Effect::PersistSearchTerm(term) => {
                    if let Err(err) = self.search_term.write(term) {
                        stories_error!("Failed to persist search term: {}", err);
                    }
                }
            }
        }
    }
}

/// Forwards engine completions as messages until the engine or the app goes away.
fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let msg = match event {
                EngineEvent::SearchCompleted { request_id, result } => match result {
                    Ok(hits) => Msg::StoriesFetched {
                        request_id,
                        stories: hits.into_iter().map(story_from_hit).collect(),
                    },
                    Err(_) => Msg::StoriesFetchFailed { request_id },
                },
            };
            if input_tx.send(AppInput::Msg(msg)).is_err() {
                break;
            }
        }
        stories_info!("Engine event loop stopped");
    });
}

fn story_from_hit(hit: StoryHit) -> Story {
    Story {
        id: hit.object_id,
        url: hit.url,
        title: hit.title,
        author: hit.author,
        comment_count: hit.num_comments,
        points: hit.points,
    }
}
