use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use stories_core::{update, AppState, Msg, SearchTermHolder, StoriesAction, ValueStore, SEARCH_TERM_KEY};
use stories_engine::EngineHandle;
use stories_logging::{stories_info, stories_warn};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::persistence::RonValueStore;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to.
pub enum AppInput {
    Msg(Msg),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_err) = match AppConfig::load(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    stories_logging::initialize(config.log_destination, &config.log_path);
    if let Some(err) = config_err {
        stories_warn!("Using default configuration: {}", err);
    }

    let store = RonValueStore::open(&config.store_path);
    let search_term = SearchTermHolder::load(store, SEARCH_TERM_KEY, &config.default_search_term);
    let (engine, events) = EngineHandle::new(config.search_settings())?;

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let effects = EffectRunner::new(engine, events, search_term, input_tx.clone());
    spawn_stdin_reader(input_tx);

    let mut app = App::new(effects, io::stdout());
    app.start()?;
    while let Ok(input) = input_rx.recv() {
        if app.handle_input(input)? == Flow::Quit {
            break;
        }
    }
    stories_info!("Session ended");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx
                .send(AppInput::Command(parse_command(&line)))
                .is_err()
            {
                return;
            }
        }
        let _ = input_tx.send(AppInput::Command(Command::Quit));
    });
}

struct App<S, W> {
    state: AppState,
    effects: EffectRunner<S>,
    out: W,
}

impl<S: ValueStore, W: Write> App<S, W> {
    fn new(effects: EffectRunner<S>, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        let term = self.effects.search_term().to_string();
        self.dispatch(Msg::SearchTermRestored(term))?;
        writeln!(self.out, "Type `help` for commands.")
    }

    fn handle_input(&mut self, input: AppInput) -> io::Result<Flow> {
        match input {
            AppInput::Msg(msg) => self.dispatch(msg).map(|()| Flow::Continue),
            AppInput::Command(command) => self.handle_command(command),
        }
    }

    fn handle_command(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Type(text) => self.dispatch(Msg::InputChanged(text))?,
            Command::Submit => self.submit()?,
            Command::Search(text) => {
                self.dispatch(Msg::InputChanged(text))?;
                self.submit()?;
            }
            Command::Dismiss(position) => {
                let story = self.state.view().story_at(position).cloned();
                match story {
                    Some(story) => self.dispatch(Msg::DeleteClicked(story))?,
                    None => writeln!(self.out, "No story at position {position}.")?,
                }
            }
            Command::Action(raw) => match StoriesAction::from_json(&raw) {
                Ok(action) => self.dispatch(Msg::ActionDispatched(action))?,
                Err(err) => {
                    stories_warn!("Rejected action: {}", err);
                    writeln!(self.out, "Rejected action: {err}")?;
                }
            },
            Command::Show => self.render()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(line) => {
                writeln!(self.out, "Unknown command: {line}. Type `help` for commands.")?
            }
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn submit(&mut self) -> io::Result<()> {
        let view = self.state.view();
        if !view.can_submit {
            return writeln!(self.out, "Nothing to search for.");
        }
        self.dispatch(Msg::QuerySubmitted(view.draft_query))
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        if let Msg::StoriesFetched { request_id, .. } | Msg::StoriesFetchFailed { request_id } = &msg {
            if self.state.latest_request() != Some(*request_id) {
                stories_info!("Ignoring stale response for request_id={}", request_id);
            }
        }

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);

        if self.state.consume_dirty() {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}\n", render(&self.state.view()))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use stories_core::MemoryValueStore;
    use stories_engine::{FailureKind, SearchError, StoryHit, StorySearch};

    use super::*;

    struct FixedSearch;

    #[async_trait::async_trait]
    impl StorySearch for FixedSearch {
        async fn search(&self, query: &str) -> Result<Vec<StoryHit>, SearchError> {
            if query == "broken" {
                return Err(SearchError {
                    kind: FailureKind::HttpStatus(500),
                    message: "500 Internal Server Error".to_string(),
                });
            }
            Ok(vec![
                StoryHit {
                    object_id: "0".to_string(),
                    url: "https://reactjs.org/".to_string(),
                    title: format!("{query} one"),
                    author: "Jordan Walke".to_string(),
                    num_comments: 3,
                    points: 4,
                },
                StoryHit {
                    object_id: "1".to_string(),
                    url: "https://redux.js.org/".to_string(),
                    title: format!("{query} two"),
                    author: "Dan Abramov".to_string(),
                    num_comments: 2,
                    points: 5,
                },
            ])
        }
    }

    fn test_app() -> (App<MemoryValueStore, Vec<u8>>, mpsc::Receiver<AppInput>) {
        let (input_tx, input_rx) = mpsc::channel();
        let (engine, events) = EngineHandle::with_search(Arc::new(FixedSearch));
        let search_term = SearchTermHolder::load(MemoryValueStore::new(), SEARCH_TERM_KEY, "React");
        let effects = EffectRunner::new(engine, events, search_term, input_tx);
        (App::new(effects, Vec::new()), input_rx)
    }

    fn output(app: &mut App<MemoryValueStore, Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut app.out)).unwrap()
    }

    #[test]
    fn search_renders_loading_then_results() {
        let (mut app, input_rx) = test_app();
        app.start().unwrap();
        assert!(output(&mut app).contains("Search: React"));

        app.handle_command(Command::Search("rust".to_string())).unwrap();
        assert!(output(&mut app).contains("Loading..."));
        assert_eq!(app.effects.search_term(), "rust");

        let input = input_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        app.handle_input(input).unwrap();
        let text = output(&mut app);
        assert!(text.contains("My Hacker Stories with 5 comments."));
        assert!(text.contains(" 1. rust one"));

        app.handle_command(Command::Dismiss(1)).unwrap();
        let text = output(&mut app);
        assert!(text.contains("My Hacker Stories with 2 comments."));
        assert!(!text.contains("rust one"));
    }

    #[test]
    fn failed_search_shows_error_instead_of_loading() {
        let (mut app, input_rx) = test_app();
        app.start().unwrap();

        app.handle_command(Command::Search("broken".to_string())).unwrap();
        assert!(output(&mut app).contains("Loading..."));

        let input = input_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        app.handle_input(input).unwrap();
        let text = output(&mut app);
        assert!(text.contains("Something went wrong..."));
        assert!(!text.contains("Loading..."));
        assert!(!app.state.view().is_loading);
    }

    #[test]
    fn startup_does_not_fetch_or_persist() {
        let (mut app, input_rx) = test_app();
        app.start().unwrap();

        assert_eq!(app.state.latest_request(), None);
        assert!(input_rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn empty_draft_cannot_be_submitted() {
        let (mut app, _input_rx) = test_app();
        app.start().unwrap();
        output(&mut app);

        app.handle_command(Command::Type(String::new())).unwrap();
        app.handle_command(Command::Submit).unwrap();

        assert!(output(&mut app).contains("Nothing to search for."));
        assert_eq!(app.state.latest_request(), None);
    }

    #[test]
    fn unknown_action_is_rejected_without_state_change() {
        let (mut app, _input_rx) = test_app();
        app.start().unwrap();
        let before = app.state.view();

        app.handle_command(Command::Action(r#"{"type": "STORIES_SORT"}"#.to_string()))
            .unwrap();

        assert!(output(&mut app).contains("Rejected action: unknown action kind: STORIES_SORT"));
        assert_eq!(app.state.view(), before);
    }

    #[test]
    fn quit_ends_the_loop() {
        let (mut app, _input_rx) = test_app();
        assert_eq!(app.handle_command(Command::Quit).unwrap(), Flow::Quit);
        assert_eq!(app.handle_command(Command::Show).unwrap(), Flow::Continue);
    }
}
