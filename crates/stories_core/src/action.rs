use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Story};

/// Input to [`crate::stories_reducer`]. Consumed once, never stored.
///
/// The serialized form is `{"type": <tag>, "payload": <value>}`; the payload
/// is absent for `FetchInit` and `FetchFailure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StoriesAction {
    #[serde(rename = "STORIES_FETCH_INIT")]
    FetchInit,
    #[serde(rename = "STORIES_FETCH_SUCCESS")]
    FetchSuccess(Vec<Story>),
    #[serde(rename = "STORIES_FETCH_FAILURE")]
    FetchFailure,
    #[serde(rename = "REMOVE_STORY")]
    RemoveStory(Story),
}

impl StoriesAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            StoriesAction::FetchInit => ActionKind::FetchInit,
            StoriesAction::FetchSuccess(_) => ActionKind::FetchSuccess,
            StoriesAction::FetchFailure => ActionKind::FetchFailure,
            StoriesAction::RemoveStory(_) => ActionKind::RemoveStory,
        }
    }

    /// Parse a serialized action.
    ///
    /// An unrecognized `type` tag is reported as [`CoreError::UnknownAction`],
    /// distinct from a known tag with a bad payload.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if ActionKind::from_tag(tag).is_none() {
            return Err(CoreError::UnknownAction(tag.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    FetchInit,
    FetchSuccess,
    FetchFailure,
    RemoveStory,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::FetchInit,
        ActionKind::FetchSuccess,
        ActionKind::FetchFailure,
        ActionKind::RemoveStory,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::FetchInit => "STORIES_FETCH_INIT",
            ActionKind::FetchSuccess => "STORIES_FETCH_SUCCESS",
            ActionKind::FetchFailure => "STORIES_FETCH_FAILURE",
            ActionKind::RemoveStory => "REMOVE_STORY",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
