use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use stories_logging::{stories_error, stories_info, stories_warn};

use crate::search::{ReqwestStorySearch, SearchSettings, StorySearch};
use crate::{EngineEvent, FailureKind, RequestId, SearchError};

enum EngineCommand {
    Search { request_id: RequestId, query: String },
}

/// Submits searches to a background tokio runtime.
///
/// Searches are never cancelled. Every request produces exactly one
/// `SearchCompleted` event, a failed one if the runtime cannot run it.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
}

/// Receiving end of the engine, in completion order.
///
/// Closes once every [`EngineHandle`] is dropped and in-flight searches have finished.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SearchSettings) -> Result<(Self, EngineEvents), SearchError> {
        let search = ReqwestStorySearch::new(settings)?;
        Ok(Self::with_search(Arc::new(search)))
    }

    pub fn with_search(search: Arc<dyn StorySearch>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            run_commands(tokio::runtime::Runtime::new(), search, cmd_rx, worker_tx);
        });

        (Self { cmd_tx, event_tx }, EngineEvents { event_rx })
    }

    pub fn search(&self, request_id: RequestId, query: impl Into<String>) {
        let query = query.into();
        stories_info!(
            "Search request_id={} query_len={}",
            request_id,
            query.len()
        );
        if self
            .cmd_tx
            .send(EngineCommand::Search { request_id, query })
            .is_err()
        {
            stories_warn!("Search engine stopped; failing request {}", request_id);
            let _ = self.event_tx.send(engine_stopped(request_id));
        }
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. Returns `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_commands(
    runtime: io::Result<tokio::runtime::Runtime>,
    search: Arc<dyn StorySearch>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(err) => {
            stories_error!("Failed to start search runtime: {}", err);
            while let Ok(EngineCommand::Search { request_id, .. }) = cmd_rx.recv() {
                let _ = event_tx.send(engine_stopped(request_id));
            }
            return;
        }
    };
    let mut in_flight = Vec::new();
    while let Ok(command) = cmd_rx.recv() {
        in_flight.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
        let search = search.clone();
        let event_tx = event_tx.clone();
        in_flight.push(runtime.spawn(async move {
            handle_command(search.as_ref(), command, event_tx).await;
        }));
    }
    // Dropping the runtime would cancel searches that still owe a completion.
    runtime.block_on(async {
        for task in in_flight {
            let _ = task.await;
        }
    });
}

fn engine_stopped(request_id: RequestId) -> EngineEvent {
    EngineEvent::SearchCompleted {
        request_id,
        result: Err(SearchError::new(
            FailureKind::Network,
            "search engine stopped",
        )),
    }
}

async fn handle_command(
    search: &dyn StorySearch,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Search { request_id, query } => {
            let result = search.search(&query).await;
            match &result {
                Ok(hits) => stories_info!(
                    "Search request_id={} returned {} hits",
                    request_id,
                    hits.len()
                ),
                Err(err) => stories_warn!("Search request_id={} failed: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::SearchCompleted { request_id, result });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoryHit;

    struct NeverCalled;

    #[async_trait::async_trait]
    impl StorySearch for NeverCalled {
        async fn search(&self, _query: &str) -> Result<Vec<StoryHit>, SearchError> {
            unreachable!("no runtime to run searches on")
        }
    }

    fn failed_ids(event_rx: &mpsc::Receiver<EngineEvent>) -> Vec<RequestId> {
        event_rx
            .try_iter()
            .map(|EngineEvent::SearchCompleted { request_id, result }| {
                assert_eq!(result.unwrap_err().kind, FailureKind::Network);
                request_id
            })
            .collect()
    }

    #[test]
    fn request_sent_to_stopped_engine_fails_once() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        drop(cmd_rx);
        let handle = EngineHandle { cmd_tx, event_tx };

        handle.search(3, "rust");

        assert_eq!(failed_ids(&event_rx), vec![3]);
    }

    #[test]
    fn missing_runtime_fails_every_queued_request() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        for request_id in [1, 2] {
            cmd_tx
                .send(EngineCommand::Search {
                    request_id,
                    query: "rust".to_string(),
                })
                .unwrap();
        }
        drop(cmd_tx);

        run_commands(
            Err(io::Error::other("no threads")),
            Arc::new(NeverCalled),
            cmd_rx,
            event_tx,
        );

        assert_eq!(failed_ids(&event_rx), vec![1, 2]);
    }
}
