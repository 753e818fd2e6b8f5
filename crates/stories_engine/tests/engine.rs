use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use stories_engine::{
    EngineEvent, EngineEvents, EngineHandle, FailureKind, SearchError, StoryHit, StorySearch,
};

struct ScriptedSearch {
    delays: HashMap<String, Duration>,
}

#[async_trait::async_trait]
impl StorySearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<Vec<StoryHit>, SearchError> {
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if query == "broken" {
            return Err(SearchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(vec![StoryHit {
            object_id: query.to_string(),
            url: String::new(),
            title: query.to_string(),
            author: "tester".to_string(),
            num_comments: 1,
            points: 1,
        }])
    }
}

fn scripted(delays: HashMap<String, Duration>) -> (EngineHandle, EngineEvents) {
    EngineHandle::with_search(Arc::new(ScriptedSearch { delays }))
}

fn next_event(events: &EngineEvents) -> EngineEvent {
    events
        .recv_timeout(Duration::from_secs(2))
        .expect("no engine event within timeout")
}

#[test]
fn every_request_completes_once() {
    let (engine, events) = scripted(HashMap::new());

    engine.search(1, "react");
    let EngineEvent::SearchCompleted { request_id, result } = next_event(&events);
    assert_eq!(request_id, 1);
    assert_eq!(result.unwrap()[0].object_id, "react");

    engine.search(2, "broken");
    let EngineEvent::SearchCompleted { request_id, result } = next_event(&events);
    assert_eq!(request_id, 2);
    assert_eq!(result.unwrap_err().kind, FailureKind::Network);

    assert!(events.recv_timeout(Duration::from_millis(100)).is_none());
}

#[test]
fn slow_request_is_not_cancelled_by_a_newer_one() {
    let mut delays = HashMap::new();
    delays.insert("slow".to_string(), Duration::from_millis(200));
    let (engine, events) = scripted(delays);

    engine.search(1, "slow");
    engine.search(2, "fast");

    let EngineEvent::SearchCompleted { request_id: first, .. } = next_event(&events);
    let EngineEvent::SearchCompleted { request_id: second, .. } = next_event(&events);
    assert_eq!((first, second), (2, 1));
}

#[test]
fn events_close_after_handles_are_dropped() {
    let (engine, events) = scripted(HashMap::new());
    let second = engine.clone();

    engine.search(1, "react");
    drop(engine);
    drop(second);

    let EngineEvent::SearchCompleted { request_id, .. } = next_event(&events);
    assert_eq!(request_id, 1);
    assert!(events.recv().is_none());
}
