use serde::{Deserialize, Serialize};

/// A single search result. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub id: String,
    pub url: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "num_comments")]
    pub comment_count: u32,
    pub points: i64,
}
